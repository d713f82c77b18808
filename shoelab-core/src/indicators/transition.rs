//! Transition classifier.
//!
//! Each non-tie round is labelled by comparing it with the previous non-tie
//! round. Ties are transparent: they get no class and do not move the
//! previous-non-tie pointer. The first non-tie round has no predecessor and
//! gets no class either.

use serde::{Deserialize, Serialize};

use crate::domain::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionClass {
    /// Banker then Player.
    BankerToPlayer = 1,
    /// Player then Banker.
    PlayerToBanker = 2,
    /// Banker then Banker.
    BankerToBanker = 3,
    /// Player then Player.
    PlayerToPlayer = 4,
}

impl TransitionClass {
    pub fn between(previous: Outcome, current: Outcome) -> Option<Self> {
        match (previous, current) {
            (Outcome::Banker, Outcome::Player) => Some(Self::BankerToPlayer),
            (Outcome::Player, Outcome::Banker) => Some(Self::PlayerToBanker),
            (Outcome::Banker, Outcome::Banker) => Some(Self::BankerToBanker),
            (Outcome::Player, Outcome::Player) => Some(Self::PlayerToPlayer),
            _ => None,
        }
    }

    /// Numeric code 1..=4.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Zero-based slot into a `[_; 4]` array.
    pub fn slot(self) -> usize {
        self as usize - 1
    }
}

/// Numeric code of an optional class, 0 when absent.
pub fn class_code(class: Option<TransitionClass>) -> u8 {
    class.map_or(0, TransitionClass::code)
}

/// Classify every round of `outcomes`.
pub fn classify(outcomes: &[Outcome]) -> Vec<Option<TransitionClass>> {
    let mut last_non_tie: Option<Outcome> = None;
    outcomes
        .iter()
        .map(|&outcome| {
            if outcome.is_tie() {
                return None;
            }
            let class = last_non_tie.and_then(|prev| TransitionClass::between(prev, outcome));
            last_non_tie = Some(outcome);
            class
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::outcomes;

    fn codes(s: &str) -> Vec<u8> {
        classify(&outcomes(s)).into_iter().map(class_code).collect()
    }

    #[test]
    fn worked_example() {
        assert_eq!(codes("PBPPB"), vec![0, 2, 1, 4, 2]);
    }

    #[test]
    fn banker_streak_is_class_three() {
        assert_eq!(codes("BBB"), vec![0, 3, 3]);
    }

    #[test]
    fn ties_are_transparent() {
        // Tie between P and B: B still compares against P.
        assert_eq!(codes("PTB"), vec![0, 0, 2]);
        assert_eq!(codes("TTP"), vec![0, 0, 0]);
        assert_eq!(codes("PTTTP"), vec![0, 0, 0, 0, 4]);
    }

    #[test]
    fn empty_history() {
        assert!(classify(&[]).is_empty());
    }

    #[test]
    fn slots_are_zero_based() {
        assert_eq!(TransitionClass::BankerToPlayer.slot(), 0);
        assert_eq!(TransitionClass::PlayerToPlayer.slot(), 3);
        assert_eq!(class_code(None), 0);
    }
}
