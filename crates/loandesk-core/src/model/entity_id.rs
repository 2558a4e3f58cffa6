// ── Record identity ──
//
// The servicing backend keys records by integer, but a few endpoints
// (and older imports) hand back string identifiers. EntityId hides the
// difference from consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use loandesk_api::RawId;

/// Canonical identifier for any customer, loan, or interaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Text(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

// ── Wire conversions ────────────────────────────────────────────────

impl From<RawId> for EntityId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => Self::Numeric(n),
            RawId::Text(s) => Self::from(s),
        }
    }
}

impl From<&EntityId> for RawId {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Numeric(n) => RawId::Number(*n),
            EntityId::Text(s) => RawId::Text(s.clone()),
        }
    }
}
