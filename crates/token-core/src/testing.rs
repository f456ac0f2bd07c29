//! Test harness — builds transactions and checks verdicts
//!
//! ```
//! use token_core::testing::{alice, bob, carly, token, transaction};
//! use token_core::TokenCommand;
//!
//! transaction(|tx| {
//!     tx.input(token(&alice(), &bob(), 10));
//!     tx.output(token(&alice(), &carly(), 10));
//!     tx.command([alice()], TokenCommand::Move);
//!     tx.fails_with("The current holders should sign.");
//!     tx.command([bob()], TokenCommand::Move);
//!     tx.fails_with("Required");
//! });
//! ```
//!
//! Assertions panic, so they are meant for tests and examples only.

use crate::state::{Party, TokenState};
use crate::transaction::{Command, CommandData, LedgerTransaction};
use crate::{verifier, Error, Result};

// ── Fixtures ──────────────────────────────────────────────

pub fn alice() -> Party {
    Party::new("Alice")
}

pub fn bob() -> Party {
    Party::new("Bob")
}

pub fn carly() -> Party {
    Party::new("Carly")
}

pub fn token(issuer: &Party, holder: &Party, quantity: i64) -> TokenState {
    TokenState::new(issuer.clone(), holder.clone(), quantity)
}

/// A command belonging to some other contract.
pub fn dummy_command() -> CommandData {
    CommandData::Other {
        contract: "dummy.contracts.DummyContract".into(),
        name: "Create".into(),
    }
}

// ── Transaction DSL ───────────────────────────────────────

/// Mutable transaction under construction.
///
/// Components may be added between assertions; every assertion verifies
/// the transaction as it stands at that point.
#[derive(Debug, Clone, Default)]
pub struct TransactionDsl {
    tx: LedgerTransaction,
}

impl TransactionDsl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&mut self, state: TokenState) -> &mut Self {
        self.tx.inputs.push(state);
        self
    }

    pub fn output(&mut self, state: TokenState) -> &mut Self {
        self.tx.outputs.push(state);
        self
    }

    pub fn command(
        &mut self,
        signers: impl IntoIterator<Item = Party>,
        value: impl Into<CommandData>,
    ) -> &mut Self {
        self.tx.commands.push(Command::new(signers, value));
        self
    }

    pub fn transaction(&self) -> &LedgerTransaction {
        &self.tx
    }

    pub fn verify(&self) -> Result<()> {
        verifier::verify(&self.tx)
    }

    /// Assert the transaction is accepted.
    #[track_caller]
    pub fn verifies(&self) -> &Self {
        if let Err(err) = self.verify() {
            panic!("expected transaction to verify, but it failed with: {}", err);
        }
        self
    }

    /// Assert a rule violation whose message contains `expected`.
    #[track_caller]
    pub fn fails_with(&self, expected: &str) -> &Self {
        match self.verify() {
            Ok(()) => panic!(
                "expected failure containing '{}', but transaction verified",
                expected
            ),
            Err(Error::Violation(v)) => {
                let message = v.to_string();
                assert!(
                    message.contains(expected),
                    "expected failure containing '{}', got '{}'",
                    expected,
                    message
                );
            }
            Err(other) => panic!(
                "expected failure containing '{}', but verification raised {}: {}",
                expected,
                other.kind(),
                other
            ),
        }
        self
    }

    /// Assert verification aborted on a conservation sum overflow.
    #[track_caller]
    pub fn fails_with_overflow(&self) -> &Self {
        match self.verify() {
            Err(Error::ArithmeticOverflow { .. }) => {}
            other => panic!("expected arithmetic overflow, got {:?}", other),
        }
        self
    }
}

/// Build and check a transaction in one closure.
pub fn transaction(build: impl FnOnce(&mut TransactionDsl)) -> TransactionDsl {
    let mut dsl = TransactionDsl::new();
    build(&mut dsl);
    dsl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenCommand;

    #[test]
    fn test_fixture_identities_distinct() {
        assert_ne!(alice(), bob());
        assert_ne!(bob(), carly());
        assert_ne!(alice(), carly());
    }

    #[test]
    fn test_dsl_accumulates_components() {
        let dsl = transaction(|tx| {
            tx.input(token(&alice(), &bob(), 1))
                .output(token(&alice(), &bob(), 1))
                .command([bob()], TokenCommand::Move);
        });
        assert_eq!(dsl.transaction().inputs.len(), 1);
        assert_eq!(dsl.transaction().outputs.len(), 1);
        assert_eq!(dsl.transaction().commands.len(), 1);
        dsl.verifies();
    }

    #[test]
    #[should_panic(expected = "but transaction verified")]
    fn test_fails_with_panics_on_success() {
        transaction(|tx| {
            tx.input(token(&alice(), &bob(), 1));
            tx.output(token(&alice(), &bob(), 1));
            tx.command([bob()], TokenCommand::Move);
            tx.fails_with("anything");
        });
    }

    #[test]
    #[should_panic(expected = "got 'There should be moved tokens.'")]
    fn test_fails_with_panics_on_other_message() {
        transaction(|tx| {
            tx.input(token(&alice(), &bob(), 1));
            tx.command([bob()], TokenCommand::Move);
            tx.fails_with("There should be tokens to move.");
        });
    }

    #[test]
    #[should_panic(expected = "raised overflow")]
    fn test_fails_with_does_not_swallow_overflow() {
        transaction(|tx| {
            tx.input(token(&alice(), &bob(), i64::MAX));
            tx.input(token(&alice(), &bob(), 1));
            tx.output(token(&alice(), &bob(), 1));
            tx.command([bob()], TokenCommand::Move);
            tx.fails_with("The sum of quantities for each issuer should be conserved.");
        });
    }
}
