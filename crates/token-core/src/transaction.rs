//! Transaction view handed to the verifier
//!
//! A `LedgerTransaction` is fully resolved: its inputs are the token states
//! being consumed, not references to them. Hosts build it, the verifier reads it.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::{Party, TokenState};
use crate::{normalizer, Error, Result};

/// The token contract's command family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCommand {
    Issue,
    Move,
    Redeem,
}

impl fmt::Display for TokenCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCommand::Issue => write!(f, "Issue"),
            TokenCommand::Move => write!(f, "Move"),
            TokenCommand::Redeem => write!(f, "Redeem"),
        }
    }
}

/// Payload of a command: ours, or one belonging to another contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandData {
    Token(TokenCommand),
    Other { contract: String, name: String },
}

impl CommandData {
    pub fn as_token(&self) -> Option<TokenCommand> {
        match self {
            CommandData::Token(cmd) => Some(*cmd),
            CommandData::Other { .. } => None,
        }
    }
}

impl From<TokenCommand> for CommandData {
    fn from(cmd: TokenCommand) -> Self {
        CommandData::Token(cmd)
    }
}

impl fmt::Display for CommandData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandData::Token(cmd) => write!(f, "{}", cmd),
            CommandData::Other { contract, name } => write!(f, "{}.{}", contract, name),
        }
    }
}

/// A command together with the parties that authorized it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Command {
    pub value: CommandData,
    /// BTreeSet keeps signer order canonical for hashing
    pub signers: BTreeSet<Party>,
}

impl Command {
    pub fn new(signers: impl IntoIterator<Item = Party>, value: impl Into<CommandData>) -> Self {
        Command {
            value: value.into(),
            signers: signers.into_iter().collect(),
        }
    }

    pub fn is_signed_by(&self, party: &Party) -> bool {
        self.signers.contains(party)
    }
}

/// Read-only description of a proposed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerTransaction {
    #[serde(default)]
    pub inputs: Vec<TokenState>,
    #[serde(default)]
    pub outputs: Vec<TokenState>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl LedgerTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a transaction from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ParseError(e.to_string()))
    }

    /// Commands addressed to the token contract, in declaration order.
    pub fn token_commands(&self) -> impl Iterator<Item = (TokenCommand, &Command)> {
        self.commands
            .iter()
            .filter_map(|c| c.value.as_token().map(|cmd| (cmd, c)))
    }

    /// SHA-256 of the canonical serialization, lower-case hex.
    pub fn id(&self) -> Result<String> {
        normalizer::compute_transaction_id(self)
    }
}
