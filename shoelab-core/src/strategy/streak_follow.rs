//! Streak-follow rule (flat stake).
//!
//! Once `streak_len` identical non-tie results have come in a row (ties are
//! skipped), bet the same side again. A loss necessarily breaks the run, so
//! betting stops until a fresh streak of the required length forms.
//! `max_run` caps how long a single streak is followed.

use serde::{Deserialize, Serialize};

use super::staking::{settle_flat, StakingParams};
use super::{DecisionRule, DecisionState};
use crate::domain::Decision;
use crate::engine::IndicatorSeries;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakFollowParams {
    pub streak_len: usize,
    /// Stop following once the run is longer than this. 0 = no cap.
    pub max_run: usize,
}

impl Default for StreakFollowParams {
    fn default() -> Self {
        Self {
            streak_len: 3,
            max_run: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StreakFollow {
    params: StreakFollowParams,
    staking: StakingParams,
}

impl StreakFollow {
    pub fn new(params: StreakFollowParams, staking: StakingParams) -> Self {
        assert!(params.streak_len >= 1, "streak_len must be >= 1");
        Self { params, staking }
    }
}

impl DecisionRule for StreakFollow {
    fn name(&self) -> &str {
        "streak_follow"
    }

    fn warmup_rounds(&self) -> usize {
        self.params.streak_len - 1
    }

    fn decide(
        &self,
        series: &IndicatorSeries,
        index: usize,
        state: &mut DecisionState,
    ) -> Decision {
        settle_flat(&self.staking, state, series.outcomes[index]);

        let Some((outcome, len)) = series.non_tie_run(index) else {
            return Decision::NoBet;
        };
        let capped = self.params.max_run > 0 && len > self.params.max_run;
        match outcome.side() {
            Some(side) if len >= self.params.streak_len && !capped => Decision::Bet(side),
            _ => Decision::NoBet,
        }
    }
}
