//! Recompute engine: history in, derived table out.
//!
//! The engine keeps no state of its own. [`recompute`] precomputes every
//! indicator column, runs the configured decision rule over all rounds in
//! order and assembles one [`RoundRecord`] per round.

pub mod precompute;
pub mod recompute;
pub mod table;

pub use precompute::{compute_series, IndicatorSeries};
pub use recompute::{recompute, RecomputeError};
pub use table::{RoundRecord, RoundTable};
