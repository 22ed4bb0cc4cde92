//! Content locale.

use serde::{Deserialize, Serialize};

/// Language track of catalog content and user accounts.
///
/// Wire format: UPPERCASE ISO-ish tags (`"FR"`, `"EN"`, …), matching what is
/// stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "PT")]
    Pt,
    #[serde(rename = "DE")]
    De,
}

impl Locale {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fr => "FR",
            Self::En => "EN",
            Self::Es => "ES",
            Self::Pt => "PT",
            Self::De => "DE",
        }
    }

    /// Parse a stored or submitted tag. Case-insensitive; returns `None`
    /// for unsupported languages.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FR" => Some(Self::Fr),
            "EN" => Some(Self::En),
            "ES" => Some(Self::Es),
            "PT" => Some(Self::Pt),
            "DE" => Some(Self::De),
            _ => None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::Fr
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
