//! Decision rules: turn the indicator columns into a next-round decision.
//!
//! A rule is evaluated once per round, in order, over the whole history. It
//! receives the precomputed columns, the round index and the mutable
//! [`DecisionState`] left by the previous round, and returns the decision for
//! the following round. The engine records the returned decision as
//! `previous_decision` before moving on. State never survives a pass: every
//! recompute starts from [`DecisionState::new`].

pub mod bounce;
pub mod cascade;
pub mod proportion_threshold;
pub mod slope_cross;
pub mod staking;
pub mod streak_follow;

pub use bounce::BounceParams;
pub use cascade::Cascade;
pub use proportion_threshold::{ProportionThreshold, ProportionThresholdParams};
pub use slope_cross::SlopeCrossParams;
pub use staking::{settle_flat, settle_ladder, Settlement, StakingParams};
pub use streak_follow::{StreakFollow, StreakFollowParams};

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::domain::Decision;
use crate::engine::IndicatorSeries;

/// Mutable state threaded through one recompute pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionState {
    pub bounce_active: bool,
    pub slope_active: bool,
    /// `None` before the first round.
    pub previous_decision: Option<Decision>,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
    /// Net wins: +1 per win, -1 per loss. Never reset within a pass.
    pub wins_total: i64,
    pub bankroll: f64,
    /// Stake debited if the pending bet loses.
    pub next_bet_size: f64,
}

impl DecisionState {
    pub fn new(staking: &StakingParams) -> Self {
        Self {
            bounce_active: false,
            slope_active: false,
            previous_decision: None,
            consecutive_wins: 0,
            consecutive_losses: 0,
            wins_total: 0,
            bankroll: staking.starting_bankroll,
            next_bet_size: staking.base_bet(),
        }
    }
}

/// Trait for decision rules.
///
/// # Causality
/// `decide` at `index` may only read columns at `0..=index`. The columns are
/// causal themselves, so reading `series.x[index]` and earlier lags is safe.
pub trait DecisionRule: Send + Sync {
    /// Human-readable name (e.g., "bounce_slope").
    fn name(&self) -> &str;

    /// Rounds before the rule can open a position. The engine does not call
    /// `decide` below this index and records No Bet instead, so a rule must
    /// produce No Bet there without touching `state`.
    fn warmup_rounds(&self) -> usize;

    /// Settle the previous decision against the outcome at `index`, update
    /// `state` and return the decision for the next round.
    fn decide(
        &self,
        series: &IndicatorSeries,
        index: usize,
        state: &mut DecisionState,
    ) -> Decision;
}

/// Build the configured rule.
pub fn create_rule(config: &StrategyConfig, staking: &StakingParams) -> Box<dyn DecisionRule> {
    match config {
        StrategyConfig::BounceSlope {
            bounce,
            slope_cross,
        } => Box::new(Cascade::bounce_slope(
            bounce.clone(),
            slope_cross.clone(),
            staking.clone(),
        )),
        StrategyConfig::Bounce { bounce } => {
            Box::new(Cascade::bounce_only(bounce.clone(), staking.clone()))
        }
        StrategyConfig::SlopeCross { slope_cross } => {
            Box::new(Cascade::slope_cross_only(slope_cross.clone(), staking.clone()))
        }
        StrategyConfig::ProportionThreshold { params } => {
            Box::new(ProportionThreshold::new(params.clone(), staking.clone()))
        }
        StrategyConfig::StreakFollow { params } => {
            Box::new(StreakFollow::new(params.clone(), staking.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_uses_staking_defaults() {
        let s = DecisionState::new(&StakingParams::default());
        assert_eq!(s.bankroll, 5000.0);
        assert_eq!(s.next_bet_size, 50.0);
        assert!(s.previous_decision.is_none());
        assert!(!s.bounce_active && !s.slope_active);
    }

    #[test]
    fn factory_names() {
        let staking = StakingParams::default();
        let cases = [
            (StrategyConfig::default(), "bounce_slope"),
            (
                StrategyConfig::Bounce {
                    bounce: BounceParams::default(),
                },
                "bounce",
            ),
            (
                StrategyConfig::SlopeCross {
                    slope_cross: SlopeCrossParams::default(),
                },
                "slope_cross",
            ),
            (
                StrategyConfig::ProportionThreshold {
                    params: ProportionThresholdParams::default(),
                },
                "proportion_threshold",
            ),
            (
                StrategyConfig::StreakFollow {
                    params: StreakFollowParams::default(),
                },
                "streak_follow",
            ),
        ];
        for (config, name) in cases {
            assert_eq!(create_rule(&config, &staking).name(), name);
        }
    }
}
