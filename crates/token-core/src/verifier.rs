//! Contract verifier — decides whether a token transaction is valid
//!
//! The verifier is a pure function of the transaction: no I/O, no logging,
//! no state between calls. It stops at the first rule a transaction breaks,
//! so a rejection always carries exactly one diagnostic.
//!
//! # Rule blocks
//!
//! Exactly one token command must be present; its tag selects the block.
//!
//! - **Issue**: no inputs, some outputs, positive quantities, issuers sign
//! - **Move**: some inputs and outputs, positive quantities, identical issuer
//!   sets, per-issuer sums conserved, current holders sign
//! - **Redeem**: some inputs, no outputs, positive quantities, holders and
//!   issuers sign
//!
//! Conservation sums use checked `i64` addition. Overflow is reported as
//! `Error::ArithmeticOverflow`, never as a rule violation.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::state::{Party, TokenState};
use crate::transaction::{LedgerTransaction, TokenCommand};
use crate::{Error, Result, Violation};

// ── Public API ────────────────────────────────────────────

/// Verify a transaction against the token contract.
///
/// Returns `Ok(())` when every rule of the selected block holds,
/// `Err(Error::Violation(_))` naming the first broken rule otherwise.
pub fn verify(tx: &LedgerTransaction) -> Result<()> {
    let (command, signers) = require_single_token_command(tx)?;
    match command {
        TokenCommand::Issue => verify_issue(tx, signers),
        TokenCommand::Move => verify_move(tx, signers),
        TokenCommand::Redeem => verify_redeem(tx, signers),
    }
}

/// Sum quantities per issuer with overflow detection.
///
/// Ordered by issuer so iteration never depends on hashing.
pub fn sum_by_issuer(states: &[TokenState]) -> Result<BTreeMap<&Party, i64>> {
    let mut sums: BTreeMap<&Party, i64> = BTreeMap::new();
    for state in states {
        let total = sums.entry(&state.issuer).or_insert(0);
        *total = total
            .checked_add(state.quantity)
            .ok_or_else(|| Error::ArithmeticOverflow {
                issuer: state.issuer.clone(),
            })?;
    }
    Ok(sums)
}

// ── Command dispatch ──────────────────────────────────────

fn require_single_token_command(tx: &LedgerTransaction) -> Result<(TokenCommand, &BTreeSet<Party>)> {
    let mut found = tx.token_commands();
    match (found.next(), found.next()) {
        (Some((command, c)), None) => Ok((command, &c.signers)),
        _ => Err(Violation::MissingCommand.into()),
    }
}

// ── Rule blocks ───────────────────────────────────────────

fn verify_issue(tx: &LedgerTransaction, signers: &BTreeSet<Party>) -> Result<()> {
    require(tx.inputs.is_empty(), Violation::InputsWhenIssuing)?;
    require(!tx.outputs.is_empty(), Violation::NoIssuedTokens)?;
    require(all_positive(&tx.outputs), Violation::NonPositiveQuantity)?;
    require(
        all_signed(tx.outputs.iter().map(|s| &s.issuer), signers),
        Violation::IssuersMustSign,
    )
}

fn verify_move(tx: &LedgerTransaction, signers: &BTreeSet<Party>) -> Result<()> {
    require(!tx.inputs.is_empty(), Violation::NoTokensToMove)?;
    require(!tx.outputs.is_empty(), Violation::NoMovedTokens)?;
    require(
        all_positive(&tx.inputs) && all_positive(&tx.outputs),
        Violation::NonPositiveQuantity,
    )?;
    require(
        issuers(&tx.inputs) == issuers(&tx.outputs),
        Violation::IssuerMismatch,
    )?;

    let consumed = sum_by_issuer(&tx.inputs)?;
    let created = sum_by_issuer(&tx.outputs)?;
    require(consumed == created, Violation::SumNotConserved)?;

    require(
        all_signed(tx.inputs.iter().map(|s| &s.holder), signers),
        Violation::HoldersMustSign,
    )
}

fn verify_redeem(tx: &LedgerTransaction, signers: &BTreeSet<Party>) -> Result<()> {
    require(!tx.inputs.is_empty(), Violation::NoTokensToRedeem)?;
    require(tx.outputs.is_empty(), Violation::OutputsWhenRedeeming)?;
    require(all_positive(&tx.inputs), Violation::NonPositiveQuantity)?;
    require(
        all_signed(tx.inputs.iter().map(|s| &s.holder), signers),
        Violation::HoldersMustSign,
    )?;
    require(
        all_signed(tx.inputs.iter().map(|s| &s.issuer), signers),
        Violation::IssuersMustSign,
    )
}

// ── Helpers ───────────────────────────────────────────────

fn require(holds: bool, violation: Violation) -> Result<()> {
    if holds {
        Ok(())
    } else {
        Err(violation.into())
    }
}

fn all_positive(states: &[TokenState]) -> bool {
    states.iter().all(TokenState::is_positive)
}

fn issuers(states: &[TokenState]) -> BTreeSet<&Party> {
    states.iter().map(|s| &s.issuer).collect()
}

fn all_signed<'a>(
    mut parties: impl Iterator<Item = &'a Party>,
    signers: &BTreeSet<Party>,
) -> bool {
    parties.all(|p| signers.contains(p))
}

// ── JSON verdicts ─────────────────────────────────────────

/// Serializable outcome of a verification, shared by the CLI and bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub verified: bool,
    pub transaction_id: String,
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
}

impl From<&Error> for ErrorReport {
    fn from(err: &Error) -> Self {
        ErrorReport {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl Verdict {
    pub fn of(tx: &LedgerTransaction) -> Result<Self> {
        let transaction_id = tx.id()?;
        let error = verify(tx).err().as_ref().map(ErrorReport::from);
        Ok(Verdict {
            verified: error.is_none(),
            transaction_id,
            error,
        })
    }
}

/// Parse transaction JSON and verify it.
///
/// Only malformed input is an `Err`; a rejected transaction is an `Ok`
/// verdict with `verified == false`.
pub fn verify_json(json: &str) -> Result<Verdict> {
    let tx = LedgerTransaction::from_json(json)?;
    Verdict::of(&tx)
}

// ── Tests ─────────────────────────────────────────────────
