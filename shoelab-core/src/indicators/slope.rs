//! Slope: finite-difference trend over a fixed offset.
//!
//! slope[t] = (x[t] - x[t-offset]) / offset
//! Lookback: offset.

use super::SeriesIndicator;

#[derive(Debug, Clone)]
pub struct Slope {
    offset: usize,
    name: String,
}

impl Slope {
    pub fn new(offset: usize) -> Self {
        assert!(offset >= 1, "Slope offset must be >= 1");
        Self {
            offset,
            name: format!("slope_{offset}"),
        }
    }
}

impl SeriesIndicator for Slope {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.offset
    }

    fn compute(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let mut result = vec![f64::NAN; n];

        for i in self.offset..n {
            // NaN at either end propagates through the arithmetic
            result[i] = (series[i] - series[i - self.offset]) / self.offset as f64;
        }

        result
    }
}
