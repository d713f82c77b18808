//! Proportion threshold rule (flat stake).
//!
//! After a Player round the continuation share is P4 (Player -> Player) and the
//! switch share is P2 (Player -> Banker); after a Banker round they are P3 and
//! P1. Bet the side of whichever share is larger, provided it reaches
//! `threshold`. Ties look through to the last non-tie round.

use serde::{Deserialize, Serialize};

use super::staking::{settle_flat, StakingParams};
use super::{DecisionRule, DecisionState};
use crate::domain::{Decision, Outcome, Side};
use crate::engine::IndicatorSeries;
use crate::indicators::TransitionClass;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProportionThresholdParams {
    pub threshold: f64,
    pub min_index: usize,
}

impl Default for ProportionThresholdParams {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            min_index: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProportionThreshold {
    params: ProportionThresholdParams,
    staking: StakingParams,
}

impl ProportionThreshold {
    pub fn new(params: ProportionThresholdParams, staking: StakingParams) -> Self {
        Self { params, staking }
    }

    fn signal(&self, series: &IndicatorSeries, index: usize) -> Decision {
        if index < self.params.min_index {
            return Decision::NoBet;
        }
        let p = &series.proportions[index];
        let (stay, switch, side) = match series.last_non_tie(index) {
            Some(Outcome::Player) => (
                p.of(TransitionClass::PlayerToPlayer),
                p.of(TransitionClass::PlayerToBanker),
                Side::Player,
            ),
            Some(Outcome::Banker) => (
                p.of(TransitionClass::BankerToBanker),
                p.of(TransitionClass::BankerToPlayer),
                Side::Banker,
            ),
            _ => return Decision::NoBet,
        };

        if stay >= self.params.threshold && stay > switch {
            Decision::Bet(side)
        } else if switch >= self.params.threshold && switch > stay {
            Decision::Bet(side.opposite())
        } else {
            Decision::NoBet
        }
    }
}

impl DecisionRule for ProportionThreshold {
    fn name(&self) -> &str {
        "proportion_threshold"
    }

    fn warmup_rounds(&self) -> usize {
        self.params.min_index
    }

    fn decide(
        &self,
        series: &IndicatorSeries,
        index: usize,
        state: &mut DecisionState,
    ) -> Decision {
        settle_flat(&self.staking, state, series.outcomes[index]);
        self.signal(series, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorConfig;
    use crate::engine::precompute::compute_series;
    use crate::indicators::{assert_approx, outcomes};

    fn rule(min_index: usize) -> ProportionThreshold {
        ProportionThreshold::new(
            ProportionThresholdParams {
                threshold: 0.6,
                min_index,
            },
            StakingParams::default(),
        )
    }

    #[test]
    fn follows_dominant_player_streaks() {
        // transitions: P->P dominates
        let s = compute_series(&outcomes("PPPPPBPPPP"), &IndicatorConfig::default());
        assert_eq!(rule(0).signal(&s, 9), Decision::Bet(Side::Player));
    }

    #[test]
    fn bets_switch_when_alternation_dominates() {
        let s = compute_series(&outcomes("PBPBPBPBPB"), &IndicatorConfig::default());
        // last is Banker; B->B share is 0 and B->P share 4/9, below 0.6
        assert_eq!(rule(0).signal(&s, 9), Decision::NoBet);
        let s = compute_series(&outcomes("BPBPBPBPBPBPPB"), &IndicatorConfig::default());
        // last is Banker: B->P (P1) share 6/13 > B->B (P3) share 0
        let loose = ProportionThreshold::new(
            ProportionThresholdParams {
                threshold: 0.4,
                min_index: 0,
            },
            StakingParams::default(),
        );
        assert_eq!(loose.signal(&s, 13), Decision::Bet(Side::Player));
    }

    #[test]
    fn silent_before_min_index() {
        let s = compute_series(&outcomes("PPPPP"), &IndicatorConfig::default());
        assert_eq!(rule(10).signal(&s, 4), Decision::NoBet);
    }

    #[test]
    fn settles_flat_stake() {
        let s = compute_series(&outcomes("PPPPPPPPPPPP"), &IndicatorConfig::default());
        let r = rule(0);
        let mut state = DecisionState::new(&StakingParams::default());
        for i in 0..s.len() {
            let d = r.decide(&s, i, &mut state);
            state.previous_decision = Some(d);
        }
        // bets Player from round 2 on (index 1), wins every following round
        assert_approx(state.bankroll, 5000.0 + 10.0, 1e-9);
    }
}
