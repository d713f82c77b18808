//! Bounce / slope-cross rule cascade with a geometric staking ladder.
//!
//! Per round, in fixed order:
//! 1. bounce entry (if not active)
//! 2. bounce continuation: repeat the previous side while active
//! 3. slope-cross entry, only if nothing above produced a bet
//! 4. slope continuation: repeat the previous side while active
//! 5. settle the previous decision on the ladder
//! 6. stop conditions
//!
//! A bounce stop deactivates the bounce and drops the stake to base; the
//! decision already produced this round stands. A slope stop deactivates and
//! replaces this round's decision with No Bet.

use super::bounce::BounceParams;
use super::slope_cross::SlopeCrossParams;
use super::staking::{settle_ladder, StakingParams};
use super::{DecisionRule, DecisionState};
use crate::domain::{Decision, Side};
use crate::engine::IndicatorSeries;

#[derive(Debug, Clone)]
pub struct Cascade {
    bounce: Option<BounceParams>,
    slope_cross: Option<SlopeCrossParams>,
    staking: StakingParams,
    name: &'static str,
}

impl Cascade {
    /// Both entries, bounce first.
    pub fn bounce_slope(
        bounce: BounceParams,
        slope_cross: SlopeCrossParams,
        staking: StakingParams,
    ) -> Self {
        Self {
            bounce: Some(bounce),
            slope_cross: Some(slope_cross),
            staking,
            name: "bounce_slope",
        }
    }

    pub fn bounce_only(bounce: BounceParams, staking: StakingParams) -> Self {
        Self {
            bounce: Some(bounce),
            slope_cross: None,
            staking,
            name: "bounce",
        }
    }

    pub fn slope_cross_only(slope_cross: SlopeCrossParams, staking: StakingParams) -> Self {
        Self {
            bounce: None,
            slope_cross: Some(slope_cross),
            staking,
            name: "slope_cross",
        }
    }

    /// Win-count, loss-streak and bankroll-band stops shared by both strategies.
    fn run_exhausted(&self, state: &DecisionState) -> bool {
        state.wins_total >= self.staking.max_wins
            || state.consecutive_losses >= self.staking.max_losses
            || self.staking.outside_bands(state.bankroll)
    }
}

/// Repeat the previous side, if the previous decision was a bet.
fn continuation(state: &DecisionState, current: Decision) -> Decision {
    match state.previous_decision {
        Some(Decision::Bet(side)) => Decision::Bet(side),
        _ => current,
    }
}

impl DecisionRule for Cascade {
    fn name(&self) -> &str {
        self.name
    }

    fn warmup_rounds(&self) -> usize {
        let bounce = self.bounce.as_ref().map_or(usize::MAX, |b| b.min_index);
        let slope = self.slope_cross.as_ref().map_or(usize::MAX, |s| s.min_index);
        bounce.min(slope)
    }

    fn decide(
        &self,
        series: &IndicatorSeries,
        index: usize,
        state: &mut DecisionState,
    ) -> Decision {
        let outcome = series.outcomes[index];
        let score = series.cumulative[index];
        let (support, resistance) = (series.support[index], series.resistance[index]);
        let (rsi_p3, rsi_p4) = (series.rsi_p3[index], series.rsi_p4[index]);

        let mut next = Decision::NoBet;

        if let Some(bounce) = &self.bounce {
            if !state.bounce_active {
                if let Some(side) = bounce.entry(series, index) {
                    next = Decision::Bet(side);
                    state.bounce_active = true;
                }
            }
        }
        if state.bounce_active {
            next = continuation(state, next);
        }

        if next == Decision::NoBet {
            if let Some(slope_cross) = &self.slope_cross {
                if !state.slope_active {
                    if let Some(side) = slope_cross.entry(series, index) {
                        next = Decision::Bet(side);
                        state.slope_active = true;
                    }
                }
            }
            if state.slope_active {
                next = continuation(state, next);
            }
        }

        settle_ladder(&self.staking, state, outcome);

        // Bounce stop. The band checks apply whether or not a bounce is open
        // and also drop the pending stake back to base.
        let recrossed = state.bounce_active
            && match next {
                Decision::Bet(Side::Player) => rsi_p4 <= rsi_p3,
                Decision::Bet(Side::Banker) => rsi_p3 <= rsi_p4,
                Decision::NoBet => false,
            };
        let band_reached = score >= resistance || score <= support;
        if recrossed || band_reached || self.run_exhausted(state) {
            state.bounce_active = false;
            state.next_bet_size = self.staking.base_bet();
        }

        if state.slope_active {
            let recrossed = match next {
                Decision::Bet(Side::Player) => rsi_p3 >= rsi_p4,
                Decision::Bet(Side::Banker) => rsi_p3 <= rsi_p4,
                Decision::NoBet => false,
            };
            if recrossed || self.run_exhausted(state) {
                state.slope_active = false;
                next = Decision::NoBet;
            }
        }

        next
    }
}
