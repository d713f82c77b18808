//! Domain types for shoelab

pub mod ids;
pub mod outcome;
pub mod round;

pub use ids::{GameLabel, TableDigest};
pub use outcome::{Decision, InvalidOutcome, Outcome, Side};
pub use round::{History, HistoryError, Round};
