//! Session ledger.
//!
//! A [`Session`] owns one game's history together with the table derived
//! from it. Every operator action builds a candidate history, recomputes the
//! full table and commits both only if the recompute succeeds. The
//! [`SessionBook`] holds independent sessions keyed by game label.

pub mod book;
pub mod game;

pub use book::SessionBook;
pub use game::Session;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{GameLabel, InvalidOutcome, Outcome};
use crate::engine::{RoundRecord, RoundTable};
use crate::indicators::Proportions;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Rejected before anything was touched.
    #[error(transparent)]
    InvalidResult(#[from] InvalidOutcome),

    /// The session's history can no longer be trusted.
    #[error("session {label} is corrupted: {detail}")]
    StateCorruption { label: GameLabel, detail: String },

    #[error("session {0} has no rounds to undo")]
    EmptyHistory(GameLabel),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Snapshot returned after every action: the newest row plus the full table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView {
    pub latest: Option<RoundRecord>,
    pub table: RoundTable,
}

/// Per-outcome round counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tallies {
    pub player: usize,
    pub banker: usize,
    pub tie: usize,
}

impl Tallies {
    pub fn from_outcomes<'a, I: IntoIterator<Item = &'a Outcome>>(outcomes: I) -> Self {
        let mut tallies = Tallies::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Player => tallies.player += 1,
                Outcome::Banker => tallies.banker += 1,
                Outcome::Tie => tallies.tie += 1,
            }
        }
        tallies
    }

    pub fn total(&self) -> usize {
        self.player + self.banker + self.tie
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub label: GameLabel,
    pub tallies: Tallies,
    /// Proportions as of the newest round (all zero before any transition).
    pub proportions: Proportions,
    pub bankroll: f64,
    pub profit: f64,
    pub table: RoundTable,
}
