//! Round and History, the only authoritative state of a game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Outcome;

/// One completed trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based, sequential, no gaps.
    pub round_num: usize,
    pub outcome: Outcome,
}

/// History invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("round at position {index} has round_num {found}, expected {expected}")]
    RoundGap {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Ordered, append-only sequence of rounds.
///
/// Every derived series is a pure function of a history prefix, so the
/// history is the only thing that needs to be kept between operator actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    rounds: Vec<Round>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from bare outcomes, numbering rounds from 1.
    pub fn from_outcomes<I: IntoIterator<Item = Outcome>>(outcomes: I) -> Self {
        let mut history = Self::new();
        for outcome in outcomes {
            history.push(outcome);
        }
        history
    }

    /// Build a history from pre-numbered rounds without renumbering.
    ///
    /// Used when restoring a ledger from an external store; call
    /// [`History::validate`] before trusting it.
    pub fn from_rounds(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }

    /// Append the next round and return it.
    pub fn push(&mut self, outcome: Outcome) -> Round {
        let round = Round {
            round_num: self.rounds.len() + 1,
            outcome,
        };
        self.rounds.push(round);
        round
    }

    pub fn pop(&mut self) -> Option<Round> {
        self.rounds.pop()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.rounds.iter().map(|r| r.outcome).collect()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Check the `round_num == position + 1` invariant.
    pub fn validate(&self) -> Result<(), HistoryError> {
        for (index, round) in self.rounds.iter().enumerate() {
            if round.round_num != index + 1 {
                return Err(HistoryError::RoundGap {
                    index,
                    expected: index + 1,
                    found: round.round_num,
                });
            }
        }
        Ok(())
    }
}
