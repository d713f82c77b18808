//! Slope-cross (trend-following) entry.
//!
//! Player: P4 slopes up and P3 slopes down on both the short and the long
//! offset, the P4 oscillator leads P3 by more than `rsi_gap`, and the score has
//! broken at least `distance` above resistance while gaining at least
//! `distance` over the last `lookback` rounds. Banker mirrors it below support.
//!
//! The slope pattern picks the direction first; if its gates fail the other
//! direction is not examined (the patterns are mutually exclusive anyway).

use serde::{Deserialize, Serialize};

use crate::domain::Side;
use crate::engine::precompute::value_at;
use crate::engine::IndicatorSeries;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopeCrossParams {
    pub min_index: usize,
    pub rsi_gap: f64,
    pub distance: f64,
    pub lookback: usize,
}

impl Default for SlopeCrossParams {
    fn default() -> Self {
        Self {
            min_index: 20,
            rsi_gap: 1.0,
            distance: 3.0,
            lookback: 4,
        }
    }
}

/// `rising` slopes up and `falling` slopes down on both offsets.
fn diverging(
    rising_short: f64,
    falling_short: f64,
    rising_long: f64,
    falling_long: f64,
) -> bool {
    rising_short > 0.0 && falling_short < 0.0 && rising_long > 0.0 && falling_long < 0.0
}

impl SlopeCrossParams {
    pub fn entry(&self, series: &IndicatorSeries, index: usize) -> Option<Side> {
        if index < self.min_index {
            return None;
        }
        let score = series.cumulative[index];
        let momentum = score - value_at(&series.cumulative, index.checked_sub(self.lookback));
        let (rsi_p3, rsi_p4) = (series.rsi_p3[index], series.rsi_p4[index]);

        if diverging(
            series.slope_p4[index],
            series.slope_p3[index],
            series.slope_p4_long[index],
            series.slope_p3_long[index],
        ) {
            let fires = rsi_p4 - self.rsi_gap > rsi_p3
                && score - series.resistance[index] >= self.distance
                && momentum >= self.distance;
            return fires.then_some(Side::Player);
        }

        if diverging(
            series.slope_p3[index],
            series.slope_p4[index],
            series.slope_p3_long[index],
            series.slope_p4_long[index],
        ) {
            let fires = rsi_p3 - self.rsi_gap > rsi_p4
                && score <= series.support[index] - self.distance
                && momentum <= -self.distance;
            return fires.then_some(Side::Banker);
        }

        None
    }
}
