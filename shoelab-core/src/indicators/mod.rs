//! Indicator implementations.
//!
//! Round-level indicators (transition classes, proportions, cumulative score,
//! support/resistance) take the outcome history directly. Series indicators
//! (RSI, slope) implement [`SeriesIndicator`] and run over any `f64` column,
//! so the same slope code serves proportions and oscillator outputs.
//!
//! Every indicator is causal: the value at index `i` depends only on inputs
//! `0..=i`. Undefined values are `f64::NAN`.

pub mod cumulative;
pub mod proportions;
pub mod rsi;
pub mod slope;
pub mod support_resistance;
pub mod transition;

pub use cumulative::cumulative_score;
pub use proportions::{DenominatorPolicy, Proportions, ProportionTracker};
pub use rsi::Rsi;
pub use slope::Slope;
pub use support_resistance::{support_resistance, SupportResistance};
pub use transition::{classify, TransitionClass};

/// Trait for indicators computed over a numeric series.
///
/// Output has the same length as the input. The first `lookback()` values
/// are `f64::NAN` (warmup).
pub trait SeriesIndicator: Send + Sync {
    /// Human-readable name (e.g., "rsi_10", "slope_5").
    fn name(&self) -> &str;

    /// Number of leading samples that are always undefined.
    fn lookback(&self) -> usize;

    fn compute(&self, series: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Parse a compact result string ("PBT...") into outcomes for tests.
#[cfg(test)]
pub fn outcomes(s: &str) -> Vec<crate::domain::Outcome> {
    s.chars()
        .map(|c| crate::domain::Outcome::try_from(c).unwrap())
        .collect()
}
