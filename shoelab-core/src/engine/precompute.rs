//! Indicator precomputation.
//!
//! Every column is computed once per recompute pass, in dependency order:
//! transition classes -> proportions -> cumulative score -> oscillators,
//! support/resistance, slopes. Decision rules then read the columns by index.

use crate::config::IndicatorConfig;
use crate::domain::Outcome;
use crate::indicators::{
    classify, cumulative_score, support_resistance, ProportionTracker, Proportions, Rsi,
    SeriesIndicator, Slope, TransitionClass,
};

/// All derived columns for one history, one entry per round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSeries {
    pub outcomes: Vec<Outcome>,
    pub classes: Vec<Option<TransitionClass>>,
    pub proportions: Vec<Proportions>,
    pub cumulative: Vec<f64>,
    pub rsi_p3: Vec<f64>,
    pub rsi_p4: Vec<f64>,
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    /// Short-offset slopes of P3 / P4.
    pub slope_p3: Vec<f64>,
    pub slope_p4: Vec<f64>,
    /// Long-offset slopes of P3 / P4.
    pub slope_p3_long: Vec<f64>,
    pub slope_p4_long: Vec<f64>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Most recent non-tie outcome at or before `index`.
    pub fn last_non_tie(&self, index: usize) -> Option<Outcome> {
        self.outcomes[..=index]
            .iter()
            .rev()
            .copied()
            .find(|o| !o.is_tie())
    }

    /// Length of the run of identical non-tie outcomes ending at `index`,
    /// ties skipped. Returns the run's outcome with its length.
    pub fn non_tie_run(&self, index: usize) -> Option<(Outcome, usize)> {
        let mut run: Option<(Outcome, usize)> = None;
        for &o in self.outcomes[..=index].iter().rev() {
            if o.is_tie() {
                continue;
            }
            match run {
                None => run = Some((o, 1)),
                Some((side, len)) if side == o => run = Some((side, len + 1)),
                Some(_) => break,
            }
        }
        run
    }
}

/// Value at `index`, NaN when the index does not exist (e.g. a negative lag).
pub fn value_at(series: &[f64], index: Option<usize>) -> f64 {
    index
        .and_then(|i| series.get(i).copied())
        .unwrap_or(f64::NAN)
}

/// Compute every indicator column for `outcomes`.
pub fn compute_series(outcomes: &[Outcome], config: &IndicatorConfig) -> IndicatorSeries {
    let classes = classify(outcomes);
    let proportions = ProportionTracker::new(config.denominator).compute(outcomes, &classes);
    let cumulative = cumulative_score(outcomes);

    let p3: Vec<f64> = proportions.iter().map(|p| p.p(3)).collect();
    let p4: Vec<f64> = proportions.iter().map(|p| p.p(4)).collect();

    let rsi = Rsi::new(config.rsi_window);
    let short = Slope::new(config.slope_short);
    let long = Slope::new(config.slope_long);

    let sr = support_resistance(&cumulative);

    IndicatorSeries {
        outcomes: outcomes.to_vec(),
        classes,
        rsi_p3: rsi.compute(&p3),
        rsi_p4: rsi.compute(&p4),
        slope_p3: short.compute(&p3),
        slope_p4: short.compute(&p4),
        slope_p3_long: long.compute(&p3),
        slope_p4_long: long.compute(&p4),
        support: sr.support,
        resistance: sr.resistance,
        proportions,
        cumulative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::outcomes;

    #[test]
    fn all_columns_have_history_length() {
        let o = outcomes("PBPPBTBBPPTPBBBP");
        let s = compute_series(&o, &IndicatorConfig::default());
        let n = o.len();
        assert_eq!(s.len(), n);
        for col in [
            &s.cumulative,
            &s.rsi_p3,
            &s.rsi_p4,
            &s.support,
            &s.resistance,
            &s.slope_p3,
            &s.slope_p4,
            &s.slope_p3_long,
            &s.slope_p4_long,
        ] {
            assert_eq!(col.len(), n);
        }
        assert_eq!(s.proportions.len(), n);
        assert_eq!(s.classes.len(), n);
    }

    #[test]
    fn empty_history_gives_empty_series() {
        let s = compute_series(&[], &IndicatorConfig::default());
        assert!(s.is_empty());
    }

    #[test]
    fn last_non_tie_skips_ties() {
        let s = compute_series(&outcomes("PBTT"), &IndicatorConfig::default());
        assert_eq!(s.last_non_tie(3), Some(Outcome::Banker));
        let s = compute_series(&outcomes("TT"), &IndicatorConfig::default());
        assert_eq!(s.last_non_tie(1), None);
    }

    #[test]
    fn non_tie_run_counts_through_ties() {
        let s = compute_series(&outcomes("BPTPTP"), &IndicatorConfig::default());
        assert_eq!(s.non_tie_run(5), Some((Outcome::Player, 3)));
        assert_eq!(s.non_tie_run(0), Some((Outcome::Banker, 1)));
    }

    #[test]
    fn value_at_out_of_range_is_nan() {
        assert!(value_at(&[1.0], Some(3)).is_nan());
        assert!(value_at(&[1.0], None).is_nan());
        assert_eq!(value_at(&[1.0, 2.0], Some(1)), 2.0);
    }
}
