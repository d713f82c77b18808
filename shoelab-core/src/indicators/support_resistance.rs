//! Verified support / resistance on the cumulative score.
//!
//! A new low only becomes support once the score is seen back above it;
//! a new high only becomes resistance once the score is seen back below it.
//! Between verifications the last verified level is carried (sticky).
//!
//! The scan starts at index 2; indices 0 and 1 are always NaN. It is strictly
//! sequential: each step depends on the tracker state left by the previous one.

use serde::{Deserialize, Serialize};

/// Support and resistance columns, same length as the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

/// First index the detector looks at.
pub const FIRST_INDEX: usize = 2;

/// One side of the detector (low tracker or high tracker).
#[derive(Debug, Clone, Copy)]
struct PivotTracker {
    extreme: f64,
    verified: bool,
    level: f64,
    /// `true` for the low side.
    lows: bool,
}

impl PivotTracker {
    fn lows() -> Self {
        Self {
            extreme: f64::INFINITY,
            verified: false,
            level: f64::NAN,
            lows: true,
        }
    }

    fn highs() -> Self {
        Self {
            extreme: f64::NEG_INFINITY,
            verified: false,
            level: f64::NAN,
            lows: false,
        }
    }

    /// `a` is beyond `b` in this tracker's direction.
    fn beyond(&self, a: f64, b: f64) -> bool {
        if self.lows {
            a < b
        } else {
            a > b
        }
    }

    fn step(&mut self, value: f64) -> f64 {
        if self.beyond(value, self.extreme) {
            self.extreme = value;
            self.verified = false;
        } else if !self.verified && self.beyond(self.extreme, value) {
            self.verified = true;
        }
        if self.verified {
            self.level = self.extreme;
        }
        self.level
    }
}

pub fn support_resistance(score: &[f64]) -> SupportResistance {
    let n = score.len();
    let mut out = SupportResistance {
        support: vec![f64::NAN; n],
        resistance: vec![f64::NAN; n],
    };

    let mut low = PivotTracker::lows();
    let mut high = PivotTracker::highs();
    for i in FIRST_INDEX..n {
        out.support[i] = low.step(score[i]);
        out.resistance[i] = high.step(score[i]);
    }

    out
}
