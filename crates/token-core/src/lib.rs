//! Token Core - Canonical verifier for a fungible token contract
//!
//! This is the single source of truth for token contract semantics.
//! The CLI and all language bindings (Python, JavaScript, Go) call this same core.
//!
//! # Architecture
//!
//! ```text
//! JSON → LedgerTransaction → Normalizer → Canonical Form → SHA-256 id
//!                 ↓
//!              Verifier → Command dispatch + Issue / Move / Redeem rules
//!                 ↓
//!              Ledger → unspent → spent bookkeeping (test harness)
//! ```
//!
//! # Guarantees
//!
//! - **Pure**: the verifier performs no I/O, holds no state and never logs
//! - **Deterministic**: same transaction always produces the same verdict
//! - **Checked**: conservation sums never wrap; overflow is its own error
//! - **Stable diagnostics**: failure messages form a frozen vocabulary

pub mod error;
pub mod ledger;
pub mod normalizer;
pub mod state;
pub mod testing;
pub mod transaction;
pub mod verifier;

pub use error::{Error, Result, Violation};
pub use ledger::{Ledger, StateRef, TransactionProposal};
pub use state::{Party, TokenState};
pub use transaction::{Command, CommandData, LedgerTransaction, TokenCommand};
pub use verifier::verify;

/// Version of the core library, reported by the CLI and bindings.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifier of the token contract, as it appears in diagnostics.
pub const TOKEN_CONTRACT_ID: &str = "token_core.contracts.TokenContract";
