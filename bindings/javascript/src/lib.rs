//! JavaScript/TypeScript bindings for the fungible token contract
//!
//! Thin wrapper around `token-core` compiled to WebAssembly.
//! ZERO logic here — all behavior from the canonical Rust implementation.

use wasm_bindgen::prelude::*;

/// Verify a token transaction.
///
/// @param text - transaction JSON
/// @returns JSON string: { verified: boolean, transaction_id: string, error: null | { kind, message } }
/// @throws Error if the text is not a valid transaction document
#[wasm_bindgen]
pub fn verify(text: &str) -> Result<String, JsError> {
    let verdict = token_core::verifier::verify_json(text)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_json::to_string_pretty(&verdict)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Normalize transaction JSON to canonical form.
///
/// Guarantees:
///   - Deterministic: same input → same output
///   - Idempotent: normalize(normalize(x)) === normalize(x)
///
/// @param text - transaction JSON
/// @returns Canonical compact JSON
/// @throws Error if the text is not a valid transaction document
#[wasm_bindgen]
pub fn normalize(text: &str) -> Result<String, JsError> {
    token_core::normalizer::normalize(text).map_err(|e| JsError::new(&e.to_string()))
}

/// Compute the SHA-256 transaction id.
///
/// @param text - transaction JSON
/// @returns Hex-encoded SHA-256 hash string
/// @throws Error if the text is not a valid transaction document
#[wasm_bindgen(js_name = "transactionId")]
pub fn transaction_id(text: &str) -> Result<String, JsError> {
    token_core::LedgerTransaction::from_json(text)
        .and_then(|tx| tx.id())
        .map_err(|e| JsError::new(&e.to_string()))
}
