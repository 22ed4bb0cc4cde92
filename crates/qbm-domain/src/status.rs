//! Progress status values shared by catalog and ledger rows.

use serde::{Deserialize, Serialize};

/// Position of a catalog unit or ledger entry in a player's journey.
///
/// Stored and serialized as SCREAMING_SNAKE_CASE strings
/// (`"NEW"` / `"CURRENT"` / `"VALIDATED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    New,
    Current,
    Validated,
}

impl ProgressStatus {
    /// Database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Current => "CURRENT",
            Self::Validated => "VALIDATED",
        }
    }

    /// Parse a stored value. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(Self::New),
            "CURRENT" => Some(Self::Current),
            "VALIDATED" => Some(Self::Validated),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
