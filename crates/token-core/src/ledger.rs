//! In-memory ledger — tracks the unspent → spent lifecycle of token states
//!
//! The verifier only judges a fully resolved transaction. The ledger does the
//! bookkeeping around it: it resolves input references to unspent states,
//! runs the verifier, then consumes the inputs and registers the outputs.
//!
//! # Guarantees
//!
//! - **Atomic**: a rejected proposal leaves the ledger untouched
//! - **No double spend**: a consumed state can never be an input again
//! - **Logged**: every committed transaction is appended to the provenance log
//!
//! Nothing is persisted; this is the harness hosts and tests drive the
//! contract with, not a storage engine.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::state::{Party, TokenState};
use crate::transaction::{Command, LedgerTransaction};
use crate::{verifier, Error, Result};

// ── Core Types ────────────────────────────────────────────

/// Pointer to one output of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateRef {
    pub tx_id: String,
    pub index: u32,
}

impl StateRef {
    pub fn new(tx_id: impl Into<String>, index: u32) -> Self {
        StateRef {
            tx_id: tx_id.into(),
            index,
        }
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.tx_id, self.index)
    }
}

/// A transaction whose inputs are still references into the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionProposal {
    #[serde(default)]
    pub inputs: Vec<StateRef>,
    #[serde(default)]
    pub outputs: Vec<TokenState>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl TransactionProposal {
    /// Parse a JSON array of proposals.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| Error::ParseError(e.to_string()))
    }
}

// ── Provenance Log ────────────────────────────────────────

/// Record of one committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    /// Commit order, 0-indexed
    pub sequence: u64,
    pub transaction_id: String,
    /// Display form of each command on the transaction
    pub commands: Vec<String>,
    pub consumed: Vec<StateRef>,
    pub created: Vec<StateRef>,
}

/// A replay stopped at the proposal with this index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transaction #{index} rejected: {error}")]
pub struct ReplayError {
    pub index: usize,
    pub error: Error,
}

// ── Ledger ────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    unspent: BTreeMap<StateRef, TokenState>,
    spent: BTreeSet<StateRef>,
    committed: BTreeSet<String>,
    provenance: Vec<ProvenanceEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve, verify and apply a proposal. Returns the new transaction id.
    pub fn commit(&mut self, proposal: &TransactionProposal) -> Result<String> {
        let tx = self.resolve(proposal)?;
        let tx_id = tx.id()?;

        if let Err(err) = verifier::verify(&tx) {
            warn!(tx_id = %tx_id, kind = err.kind(), "transaction rejected: {}", err);
            return Err(err);
        }

        if self.committed.contains(&tx_id) {
            warn!(tx_id = %tx_id, "transaction already committed");
            return Err(Error::DuplicateTransaction(tx_id));
        }
        let count = output_count(tx.outputs.len())?;

        for input in &proposal.inputs {
            self.unspent.remove(input);
            self.spent.insert(input.clone());
        }

        let mut created = Vec::with_capacity(tx.outputs.len());
        for (index, output) in (0..count).zip(tx.outputs) {
            let state_ref = StateRef::new(tx_id.clone(), index);
            debug!(state = %state_ref, "created {}", output);
            self.unspent.insert(state_ref.clone(), output);
            created.push(state_ref);
        }

        let entry = ProvenanceEntry {
            sequence: self.provenance.len() as u64,
            transaction_id: tx_id.clone(),
            commands: tx.commands.iter().map(|c| c.value.to_string()).collect(),
            consumed: proposal.inputs.clone(),
            created,
        };
        info!(
            tx_id = %tx_id,
            sequence = entry.sequence,
            consumed = entry.consumed.len(),
            created = entry.created.len(),
            "transaction committed"
        );
        self.provenance.push(entry);
        self.committed.insert(tx_id.clone());

        Ok(tx_id)
    }

    /// Commit proposals in order, stopping at the first rejection.
    ///
    /// Proposals before the failing one stay committed.
    pub fn replay(
        &mut self,
        proposals: &[TransactionProposal],
    ) -> std::result::Result<Vec<String>, ReplayError> {
        proposals
            .iter()
            .enumerate()
            .map(|(index, proposal)| {
                self.commit(proposal)
                    .map_err(|error| ReplayError { index, error })
            })
            .collect()
    }

    /// Turn input references into the states they point at.
    pub fn resolve(&self, proposal: &TransactionProposal) -> Result<LedgerTransaction> {
        let mut seen = BTreeSet::new();
        let mut inputs = Vec::with_capacity(proposal.inputs.len());
        for input in &proposal.inputs {
            if !seen.insert(input) {
                return Err(Error::DuplicateInput(input.clone()));
            }
            if self.spent.contains(input) {
                return Err(Error::AlreadySpent(input.clone()));
            }
            let state = self
                .unspent
                .get(input)
                .ok_or_else(|| Error::UnknownState(input.clone()))?;
            inputs.push(state.clone());
        }

        Ok(LedgerTransaction {
            inputs,
            outputs: proposal.outputs.clone(),
            commands: proposal.commands.clone(),
        })
    }

    pub fn unspent(&self) -> impl Iterator<Item = (&StateRef, &TokenState)> {
        self.unspent.iter()
    }

    pub fn state(&self, state_ref: &StateRef) -> Option<&TokenState> {
        self.unspent.get(state_ref)
    }

    pub fn is_spent(&self, state_ref: &StateRef) -> bool {
        self.spent.contains(state_ref)
    }

    /// Unspent quantity of `issuer`'s tokens held by `holder`.
    pub fn balance(&self, issuer: &Party, holder: &Party) -> Result<i64> {
        self.unspent
            .values()
            .filter(|s| &s.issuer == issuer && &s.holder == holder)
            .try_fold(0i64, |acc, s| {
                acc.checked_add(s.quantity)
                    .ok_or_else(|| Error::ArithmeticOverflow {
                        issuer: issuer.clone(),
                    })
            })
    }

    pub fn provenance(&self) -> &[ProvenanceEntry] {
        &self.provenance
    }
}

/// Outputs are addressed by a `u32` index.
fn output_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::TooManyOutputs(len))
}

// ── Tests ─────────────────────────────────────────────────
