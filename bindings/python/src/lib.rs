//! Python bindings for the fungible token contract
//!
//! Thin wrapper around `token-core` — ZERO logic here.
//! All behavior comes from the canonical Rust implementation.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Verify a token transaction.
///
/// Args:
///     text: transaction JSON
///
/// Returns:
///     JSON string with the verdict:
///     {
///         "verified": bool,
///         "transaction_id": "<64 hex chars>",
///         "error": null | {"kind": "...", "message": "..."}
///     }
///
/// Raises:
///     ValueError: If the text is not a valid transaction document
#[pyfunction]
fn verify(text: &str) -> PyResult<String> {
    let verdict = token_core::verifier::verify_json(text)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    serde_json::to_string_pretty(&verdict)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

/// Normalize transaction JSON to canonical form.
///
/// Guarantees:
///   - Deterministic: same input → same output
///   - Idempotent: normalize(normalize(x)) == normalize(x)
///
/// Raises:
///     ValueError: If the text is not a valid transaction document
#[pyfunction]
fn normalize(text: &str) -> PyResult<String> {
    token_core::normalizer::normalize(text).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Compute the SHA-256 transaction id (hex) of the canonical form.
///
/// Raises:
///     ValueError: If the text is not a valid transaction document
#[pyfunction]
fn transaction_id(text: &str) -> PyResult<String> {
    token_core::LedgerTransaction::from_json(text)
        .and_then(|tx| tx.id())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Token contract Python module
#[pymodule]
fn token_contract(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(verify, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(transaction_id, m)?)?;
    m.add("TOKEN_CONTRACT_ID", token_core::TOKEN_CONTRACT_ID)?;
    Ok(())
}
