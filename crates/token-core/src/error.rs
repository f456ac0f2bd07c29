//! Error types for the token contract runtime
//!
//! All fallible operations return `Result<T, Error>`.
//! Rule violations carry the canonical diagnostic text; callers match on it,
//! so the `Violation` messages below must not change.

use thiserror::Error;

use crate::ledger::StateRef;
use crate::state::Party;
use crate::TOKEN_CONTRACT_ID;

/// A contract rule broken by a transaction.
///
/// `Display` yields exactly the frozen diagnostic string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// Zero or several token commands on the transaction
    #[error("Required {contract}.Commands command", contract = TOKEN_CONTRACT_ID)]
    MissingCommand,

    #[error("All quantities must be above 0.")]
    NonPositiveQuantity,

    #[error("The current holders should sign.")]
    HoldersMustSign,

    #[error("The issuers should sign.")]
    IssuersMustSign,

    // ── Move ──
    #[error("There should be tokens to move.")]
    NoTokensToMove,

    #[error("There should be moved tokens.")]
    NoMovedTokens,

    #[error("Consumed and created issuers should be identical.")]
    IssuerMismatch,

    #[error("The sum of quantities for each issuer should be conserved.")]
    SumNotConserved,

    // ── Issue ──
    #[error("No tokens should be consumed, in inputs, when issuing.")]
    InputsWhenIssuing,

    #[error("There should be issued tokens, in outputs.")]
    NoIssuedTokens,

    // ── Redeem ──
    #[error("There should be tokens to redeem.")]
    NoTokensToRedeem,

    #[error("No tokens should be issued, in outputs, when redeeming.")]
    OutputsWhenRedeeming,
}

/// Token runtime error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The transaction breaks a contract rule
    #[error(transparent)]
    Violation(#[from] Violation),

    /// A per-issuer sum left the signed 64-bit range
    #[error("Arithmetic overflow: quantities issued by {issuer} exceed the i64 range")]
    ArithmeticOverflow { issuer: Party },

    /// Malformed transaction document
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Input reference not known to the ledger
    #[error("Unknown state: {0}")]
    UnknownState(StateRef),

    /// Input reference already consumed by an earlier transaction
    #[error("State already spent: {0}")]
    AlreadySpent(StateRef),

    /// Same input reference listed twice in one proposal
    #[error("Duplicate input: {0}")]
    DuplicateInput(StateRef),

    /// A transaction with this id is already on the ledger
    #[error("Duplicate transaction: {0}")]
    DuplicateTransaction(String),

    /// Output indices of a committed transaction must fit in a `u32`
    #[error("Too many outputs: {0}")]
    TooManyOutputs(usize),
}

impl Error {
    /// Stable short tag used in JSON output of the CLI and bindings.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Violation(_) => "violation",
            Error::ArithmeticOverflow { .. } => "overflow",
            Error::ParseError(_) => "parse",
            Error::SerializationError(_) => "serialization",
            Error::UnknownState(_)
            | Error::AlreadySpent(_)
            | Error::DuplicateInput(_)
            | Error::DuplicateTransaction(_)
            | Error::TooManyOutputs(_) => "ledger",
        }
    }

    /// The rule violation, if this error is one.
    pub fn violation(&self) -> Option<Violation> {
        match self {
            Error::Violation(v) => Some(*v),
            _ => None,
        }
    }
}

/// Result type alias for token operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_is_bare_message() {
        let err = Error::from(Violation::SumNotConserved);
        assert_eq!(
            err.to_string(),
            "The sum of quantities for each issuer should be conserved."
        );
        assert_eq!(err.kind(), "violation");
        assert_eq!(err.violation(), Some(Violation::SumNotConserved));
    }

    #[test]
    fn test_violation_has_no_separate_source() {
        let err = Error::from(Violation::HoldersMustSign);
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_overflow_is_not_a_violation() {
        let err = Error::ArithmeticOverflow {
            issuer: Party::new("Alice"),
        };
        assert_eq!(err.kind(), "overflow");
        assert!(err.violation().is_none());
        assert!(err.to_string().contains("Alice"));
    }

    #[test]
    fn test_ledger_errors_share_kind() {
        let r = StateRef::new("ab".repeat(32), 0);
        assert_eq!(Error::UnknownState(r.clone()).kind(), "ledger");
        assert_eq!(Error::AlreadySpent(r.clone()).kind(), "ledger");
        assert_eq!(Error::DuplicateInput(r).kind(), "ledger");
        assert_eq!(Error::TooManyOutputs(usize::MAX).kind(), "ledger");
    }
}
