//! C-FFI layer for the token contract — used by Go (cgo) and other FFI consumers.
//!
//! ZERO logic here. All calls delegate to `token-core`.
//!
//! # Memory Contract
//!
//! All functions that return `*mut c_char` allocate via `CString`.
//! The caller MUST free the returned string by calling `token_free_string()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Result from a token FFI call.
/// If `error` is null, the call succeeded and `result` contains the output.
/// If `error` is non-null, the call failed and `error` contains the error message.
/// The caller MUST free both `result` and `error` with `token_free_string()`.
#[repr(C)]
pub struct TokenResult {
    pub result: *mut c_char,
    pub error: *mut c_char,
}

impl TokenResult {
    /// A result that cannot cross the C boundary is reported as an error.
    fn ok(value: String) -> Self {
        match CString::new(value) {
            Ok(c) => TokenResult {
                result: c.into_raw(),
                error: std::ptr::null_mut(),
            },
            Err(_) => Self::err("result contains an interior NUL byte".into()),
        }
    }

    fn err(msg: String) -> Self {
        let c = CString::new(msg)
            .or_else(|_| CString::new("unknown error"))
            .unwrap_or_default();
        TokenResult {
            result: std::ptr::null_mut(),
            error: c.into_raw(),
        }
    }
}

/// Helper: convert a C string pointer to a Rust &str.
/// Returns None if the pointer is null or not valid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Verify a token transaction.
/// Returns JSON: { "verified": bool, "transaction_id": "...", "error": null | {...} }
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `token_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn token_verify(text: *const c_char) -> TokenResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return TokenResult::err("null or invalid UTF-8 input".into()),
    };

    let verdict = match token_core::verifier::verify_json(text) {
        Ok(v) => v,
        Err(e) => return TokenResult::err(e.to_string()),
    };

    match serde_json::to_string_pretty(&verdict) {
        Ok(json) => TokenResult::ok(json),
        Err(e) => TokenResult::err(format!("Serialization error: {}", e)),
    }
}

/// Normalize transaction JSON to canonical form.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `token_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn token_normalize(text: *const c_char) -> TokenResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return TokenResult::err("null or invalid UTF-8 input".into()),
    };

    match token_core::normalizer::normalize(text) {
        Ok(normalized) => TokenResult::ok(normalized),
        Err(e) => TokenResult::err(e.to_string()),
    }
}

/// Compute the SHA-256 transaction id of a transaction.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
/// The caller must free the returned strings with `token_free_string()`.
#[no_mangle]
pub unsafe extern "C" fn token_transaction_id(text: *const c_char) -> TokenResult {
    let text = match cstr_to_str(text) {
        Some(s) => s,
        None => return TokenResult::err("null or invalid UTF-8 input".into()),
    };

    match token_core::LedgerTransaction::from_json(text).and_then(|tx| tx.id()) {
        Ok(id) => TokenResult::ok(id),
        Err(e) => TokenResult::err(e.to_string()),
    }
}

/// Free a string previously returned by a token FFI function.
///
/// # Safety
/// `ptr` must be a pointer previously returned by a token FFI function,
/// or null (in which case this is a no-op).
#[no_mangle]
pub unsafe extern "C" fn token_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
