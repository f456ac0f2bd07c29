//! Canonical normalizer — converts transactions to a deterministic canonical form
//!
//! The canonical form is the single serialization used for hashing and
//! comparison. Input and output order is meaningful (outputs are addressed by
//! index once committed) and is preserved; signer sets are already ordered.
//!
//! # Pipeline
//!
//! `JSON → LedgerTransaction → serialize_canonical → SHA-256`
//!
//! # Guarantees
//!
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)`
//! - **Deterministic**: same input always produces same output
//! - **Whitespace-insensitive**: formatting of the source JSON does not affect the id

use sha2::{Digest, Sha256};

use crate::transaction::LedgerTransaction;
use crate::{Error, Result};

/// Normalize transaction JSON to canonical form
///
/// # Errors
/// Returns `ParseError` for input that is not a valid transaction.
pub fn normalize(json: &str) -> Result<String> {
    let tx = LedgerTransaction::from_json(json)?;
    serialize_canonical(&tx)
}

/// Serialize a transaction to compact canonical JSON
///
/// Field order follows the struct declarations, no insignificant whitespace.
pub fn serialize_canonical(tx: &LedgerTransaction) -> Result<String> {
    serde_json::to_string(tx).map_err(|e| Error::SerializationError(e.to_string()))
}

/// Compute the SHA-256 transaction id over the canonical serialization
pub fn compute_transaction_id(tx: &LedgerTransaction) -> Result<String> {
    let canonical = serialize_canonical(tx)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
