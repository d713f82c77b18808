//! Relative Strength Index (RSI) with simple-moving-average smoothing.
//!
//! delta[i] = x[i] - x[i-1]; gains and losses are averaged with a plain mean
//! over the trailing `period` deltas (no Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (first value at index `period`).
//! Division follows IEEE semantics: avg_loss == 0 with gains gives 100,
//! a flat window (0 / 0) gives NaN.

use super::SeriesIndicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl SeriesIndicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        // changes[0] is undefined, as with any first difference
        let changes: Vec<f64> = (0..n)
            .map(|i| if i == 0 { f64::NAN } else { series[i] - series[i - 1] })
            .collect();

        for i in self.period..n {
            let window = &changes[(i + 1 - self.period)..=i];
            if window.iter().any(|c| c.is_nan()) {
                continue;
            }
            let gain: f64 = window.iter().map(|&c| c.max(0.0)).sum();
            let loss: f64 = window.iter().map(|&c| (-c).max(0.0)).sum();
            let avg_gain = gain / self.period as f64;
            let avg_loss = loss / self.period as f64;
            result[i] = compute_rsi(avg_gain, avg_loss);
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_is_100() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(result[..3].iter().all(|v| v.is_nan()));
        assert_approx(result[3], 100.0, DEFAULT_EPSILON);
        assert_approx(result[4], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[5.0, 4.0, 3.0, 2.0]);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_flat_window_is_nan() {
        let rsi = Rsi::new(2);
        let result = rsi.compute(&[0.5, 0.5, 0.5, 0.5]);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_mixed() {
        // changes: +0.2, -0.1, +0.3, -0.2
        // window at index 3: gains 0.5, losses 0.1 -> rs = 5 -> 100 - 100/6
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[0.0, 0.2, 0.1, 0.4, 0.2]);
        assert_approx(result[3], 100.0 - 100.0 / 6.0, 1e-9);
        // window at index 4: gains 0.3, losses 0.3 -> 50
        assert_approx(result[4], 50.0, 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let rsi = Rsi::new(3);
        let result = rsi.compute(&[0.1, 0.5, 0.2, 0.9, 0.05, 0.6, 0.3, 0.7]);
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_nan_propagation() {
        let rsi = Rsi::new(2);
        let result = rsi.compute(&[1.0, f64::NAN, 2.0, 3.0, 4.0, 3.0]);
        // windows touching the NaN are undefined
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(!result[4].is_nan());
    }

    #[test]
    fn rsi_too_short() {
        let rsi = Rsi::new(10);
        assert!(rsi.compute(&[1.0; 10]).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_lookback_and_name() {
        let rsi = Rsi::new(14);
        assert_eq!(rsi.lookback(), 14);
        assert_eq!(rsi.name(), "rsi_14");
    }
}
