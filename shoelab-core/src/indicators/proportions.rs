//! Proportion tracker: rolling share of each transition class.
//!
//! Counts are inclusive of the current round. Proportions are only written on
//! non-tie rounds once more than one non-tie round has been seen; every other
//! round (ties, the first non-tie round) carries the previous row forward,
//! zeros when there is none.
//!
//! The default denominator is `non_tie_rounds - 1`. Since the first non-tie
//! round never gets a class, that makes P1..P4 sum to exactly 1. Dividing by
//! the inclusive non-tie count or by the total number of rounds is available
//! through [`DenominatorPolicy`].

use serde::{Deserialize, Serialize};

use super::transition::TransitionClass;
use crate::domain::Outcome;

/// What the class counts are divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominatorPolicy {
    /// `non_tie_rounds - 1` (excludes the just-processed round).
    #[default]
    PriorNonTie,
    /// `non_tie_rounds`.
    NonTie,
    /// Every round so far, ties included.
    AllRounds,
}

impl DenominatorPolicy {
    fn denominator(self, non_tie_rounds: usize, total_rounds: usize) -> f64 {
        match self {
            DenominatorPolicy::PriorNonTie => (non_tie_rounds - 1) as f64,
            DenominatorPolicy::NonTie => non_tie_rounds as f64,
            DenominatorPolicy::AllRounds => total_rounds as f64,
        }
    }
}

/// P1..P4 for one round.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Proportions(pub [f64; 4]);

impl Proportions {
    /// Proportion of class `k` (1-based, as in P1..P4).
    pub fn p(&self, k: usize) -> f64 {
        self.0[k - 1]
    }

    pub fn of(&self, class: TransitionClass) -> f64 {
        self.0[class.slot()]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProportionTracker {
    policy: DenominatorPolicy,
}

impl ProportionTracker {
    pub fn new(policy: DenominatorPolicy) -> Self {
        Self { policy }
    }

    /// One row of proportions per round.
    ///
    /// `classes` must come from [`super::classify`] over the same `outcomes`.
    pub fn compute(
        &self,
        outcomes: &[Outcome],
        classes: &[Option<TransitionClass>],
    ) -> Vec<Proportions> {
        debug_assert_eq!(outcomes.len(), classes.len());

        let mut counts = [0usize; 4];
        let mut non_tie_rounds = 0usize;
        let mut current = Proportions::default();
        let mut result = Vec::with_capacity(outcomes.len());

        for (i, (outcome, class)) in outcomes.iter().zip(classes).enumerate() {
            if !outcome.is_tie() {
                non_tie_rounds += 1;
                if let Some(class) = class {
                    counts[class.slot()] += 1;
                }
                if non_tie_rounds > 1 {
                    let denom = self.policy.denominator(non_tie_rounds, i + 1);
                    current = Proportions(counts.map(|c| c as f64 / denom));
                }
            }
            result.push(current);
        }

        result
    }
}
