//! Bounce (mean-reversion) entry.
//!
//! Player bounce: the cumulative score sits within `band` above verified
//! support, the P4 oscillator was at or below the P3 oscillator at one of the
//! last `rsi_lags` rounds, and the long P4 slope rises while the long P3 slope
//! falls. Banker bounce is the mirror image against resistance.

use serde::{Deserialize, Serialize};

use crate::domain::Side;
use crate::engine::precompute::value_at;
use crate::engine::IndicatorSeries;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceParams {
    /// First round index (0-based) at which an entry may open.
    pub min_index: usize,
    /// Maximum distance between the score and the band.
    pub band: f64,
    /// Oscillator lags checked for the crossing (1..=rsi_lags).
    pub rsi_lags: usize,
    /// Only ever open Player bounces; the Banker mirror is never checked.
    pub player_side_only: bool,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            min_index: 20,
            band: 2.0,
            rsi_lags: 3,
            player_side_only: false,
        }
    }
}

/// `a <= b` at any of the lags 1..=lags before `index`.
fn crossed_within(a: &[f64], b: &[f64], index: usize, lags: usize) -> bool {
    (1..=lags).any(|lag| {
        let at = index.checked_sub(lag);
        value_at(a, at) <= value_at(b, at)
    })
}

fn within_band(distance: f64, band: f64) -> bool {
    (0.0..=band).contains(&distance)
}

impl BounceParams {
    /// Side of a fresh bounce at `index`, if one triggers. Player is checked
    /// first; NaN anywhere makes a condition false.
    pub fn entry(&self, series: &IndicatorSeries, index: usize) -> Option<Side> {
        if index < self.min_index {
            return None;
        }
        let score = series.cumulative[index];

        let player = within_band(score - series.support[index], self.band)
            && crossed_within(&series.rsi_p4, &series.rsi_p3, index, self.rsi_lags)
            && series.slope_p4_long[index] > 0.0
            && series.slope_p3_long[index] < 0.0;
        if player {
            return Some(Side::Player);
        }
        if self.player_side_only {
            return None;
        }

        let banker = within_band(series.resistance[index] - score, self.band)
            && crossed_within(&series.rsi_p3, &series.rsi_p4, index, self.rsi_lags)
            && series.slope_p3_long[index] > 0.0
            && series.slope_p4_long[index] < 0.0;
        banker.then_some(Side::Banker)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::Outcome;

    /// Flat series of `n` rounds with every column defined and neutral.
    pub(crate) fn neutral_series(n: usize) -> IndicatorSeries {
        IndicatorSeries {
            outcomes: vec![Outcome::Player; n],
            classes: vec![None; n],
            proportions: vec![Default::default(); n],
            cumulative: vec![0.0; n],
            rsi_p3: vec![50.0; n],
            rsi_p4: vec![50.0; n],
            support: vec![-10.0; n],
            resistance: vec![10.0; n],
            slope_p3: vec![0.0; n],
            slope_p4: vec![0.0; n],
            slope_p3_long: vec![0.0; n],
            slope_p4_long: vec![0.0; n],
        }
    }

    fn player_setup(index: usize) -> IndicatorSeries {
        let mut s = neutral_series(index + 1);
        s.cumulative[index] = 1.0;
        s.support[index] = 0.0;
        s.rsi_p4[index - 2] = 40.0;
        s.slope_p4_long[index] = 0.01;
        s.slope_p3_long[index] = -0.01;
        s
    }

    #[test]
    fn player_bounce_near_support() {
        let s = player_setup(25);
        assert_eq!(BounceParams::default().entry(&s, 25), Some(Side::Player));
    }

    #[test]
    fn no_entry_before_min_index() {
        let s = player_setup(19);
        assert_eq!(BounceParams::default().entry(&s, 19), None);
    }

    #[test]
    fn no_entry_when_score_far_from_support() {
        let mut s = player_setup(25);
        s.cumulative[25] = 3.0;
        assert_eq!(BounceParams::default().entry(&s, 25), None);
    }

    #[test]
    fn nan_support_blocks_entry() {
        let mut s = player_setup(25);
        s.support[25] = f64::NAN;
        assert_eq!(BounceParams::default().entry(&s, 25), None);
    }

    #[test]
    fn oscillator_crossing_must_be_recent() {
        let mut s = player_setup(25);
        s.rsi_p4[23] = 50.0;
        // equal counts as crossed; make p4 strictly above p3 on every lag
        for i in 22..25 {
            s.rsi_p4[i] = 60.0;
        }
        assert_eq!(BounceParams::default().entry(&s, 25), None);
    }

    fn banker_setup(index: usize) -> IndicatorSeries {
        let mut s = neutral_series(index + 1);
        s.cumulative[index] = 4.0;
        s.resistance[index] = 5.0;
        s.rsi_p3[index - 1] = 30.0;
        s.slope_p3_long[index] = 0.02;
        s.slope_p4_long[index] = -0.02;
        s
    }

    #[test]
    fn banker_bounce_near_resistance() {
        let s = banker_setup(30);
        assert_eq!(BounceParams::default().entry(&s, 30), Some(Side::Banker));
    }

    #[test]
    fn player_side_only_suppresses_banker() {
        let s = banker_setup(30);
        let params = BounceParams {
            player_side_only: true,
            ..BounceParams::default()
        };
        assert_eq!(params.entry(&s, 30), None);
    }
}
