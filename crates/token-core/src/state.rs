//! Token state and party identity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of an issuer, holder or signer.
///
/// Compared by value. The ordering exists only so collections of parties
/// iterate deterministically; it carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Party(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Party {
    fn from(name: &str) -> Self {
        Party::new(name)
    }
}

impl From<String> for Party {
    fn from(name: String) -> Self {
        Party(name)
    }
}

/// An amount of fungible tokens minted by `issuer` and controlled by `holder`.
///
/// The quantity is kept signed as received; the verifier rejects anything
/// that is not strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenState {
    pub issuer: Party,
    pub holder: Party,
    pub quantity: i64,
}

impl TokenState {
    pub const DEFAULT_QUANTITY: i64 = 1;

    pub fn new(issuer: Party, holder: Party, quantity: i64) -> Self {
        TokenState {
            issuer,
            holder,
            quantity,
        }
    }

    pub fn with_default_quantity(issuer: Party, holder: Party) -> Self {
        Self::new(issuer, holder, Self::DEFAULT_QUANTITY)
    }

    pub fn is_positive(&self) -> bool {
        self.quantity > 0
    }

    /// Same tokens under a new holder; issuer and quantity are kept.
    pub fn with_holder(&self, holder: Party) -> Self {
        TokenState {
            issuer: self.issuer.clone(),
            holder,
            quantity: self.quantity,
        }
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} held by {}",
            self.quantity, self.issuer, self.holder
        )
    }
}
