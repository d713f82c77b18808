//! Outcome, Side and Decision: the small enums everything else is keyed on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result of one completed trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Player,
    Banker,
    Tie,
}

impl Outcome {
    /// Contribution to the cumulative score: +1 Player, -1 Banker, 0 Tie.
    pub fn score(self) -> i64 {
        match self {
            Outcome::Player => 1,
            Outcome::Banker => -1,
            Outcome::Tie => 0,
        }
    }

    pub fn is_tie(self) -> bool {
        matches!(self, Outcome::Tie)
    }

    /// The bettable side this outcome corresponds to, `None` for a tie.
    pub fn side(self) -> Option<Side> {
        match self {
            Outcome::Player => Some(Side::Player),
            Outcome::Banker => Some(Side::Banker),
            Outcome::Tie => None,
        }
    }

    /// Single-letter symbol used by the operator surface.
    pub fn symbol(self) -> char {
        match self {
            Outcome::Player => 'P',
            Outcome::Banker => 'B',
            Outcome::Tie => 'T',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Player => "Player",
            Outcome::Banker => "Banker",
            Outcome::Tie => "Tie",
        };
        f.write_str(s)
    }
}

/// Rejected operator symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid result symbol {0:?} (expected Player, Banker or Tie)")]
pub struct InvalidOutcome(pub String);

impl FromStr for Outcome {
    type Err = InvalidOutcome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "player" => Ok(Outcome::Player),
            "b" | "banker" => Ok(Outcome::Banker),
            "t" | "tie" => Ok(Outcome::Tie),
            _ => Err(InvalidOutcome(s.to_string())),
        }
    }
}

impl TryFrom<char> for Outcome {
    type Error = InvalidOutcome;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'P' => Ok(Outcome::Player),
            'B' => Ok(Outcome::Banker),
            'T' => Ok(Outcome::Tie),
            _ => Err(InvalidOutcome(c.to_string())),
        }
    }
}

/// One of the two bettable sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Banker,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Banker,
            Side::Banker => Side::Player,
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            Side::Player => Outcome::Player,
            Side::Banker => Outcome::Banker,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.outcome().fmt(f)
    }
}

/// Recommendation for the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Decision {
    #[default]
    NoBet,
    Bet(Side),
}

impl Decision {
    pub fn side(self) -> Option<Side> {
        match self {
            Decision::NoBet => None,
            Decision::Bet(side) => Some(side),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::NoBet => f.write_str("No Bet"),
            Decision::Bet(side) => side.fmt(f),
        }
    }
}
