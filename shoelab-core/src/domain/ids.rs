use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key of an isolated game session (e.g. "G1").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameLabel(pub String);

impl GameLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The six tables the operator switches between.
    pub fn defaults() -> Vec<GameLabel> {
        (1..=6).map(|n| GameLabel(format!("G{n}"))).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GameLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// BLAKE3 digest of a derived table, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableDigest(pub String);

impl fmt::Display for TableDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
