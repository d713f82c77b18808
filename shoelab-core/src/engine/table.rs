//! Derived per-round table. One fixed-shape record per round; undefined
//! indicators are NaN.

use serde::{Serialize, Serializer};
use std::fmt::Display;

use crate::domain::{Decision, Outcome, TableDigest};
use crate::indicators::Proportions;

fn display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub round_num: usize,
    #[serde(serialize_with = "display")]
    pub outcome: Outcome,
    /// Transition class 1..=4, 0 when undefined.
    pub class: u8,
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
    pub cumulative: f64,
    pub rsi_p3: f64,
    pub rsi_p4: f64,
    pub support: f64,
    pub resistance: f64,
    pub slope_p3: f64,
    pub slope_p4: f64,
    pub slope_p3_long: f64,
    pub slope_p4_long: f64,
    /// Recommendation for the following round.
    #[serde(serialize_with = "display")]
    pub decision: Decision,
    /// Bankroll after settling this round.
    pub bankroll: f64,
    /// Bankroll minus the starting bankroll.
    pub profit: f64,
}

impl RoundRecord {
    pub fn proportions(&self) -> Proportions {
        Proportions([self.p1, self.p2, self.p3, self.p4])
    }

    /// Every numeric field in declaration order.
    fn numeric_fields(&self) -> [f64; 17] {
        [
            self.p1,
            self.p2,
            self.p3,
            self.p4,
            self.cumulative,
            self.rsi_p3,
            self.rsi_p4,
            self.support,
            self.resistance,
            self.slope_p3,
            self.slope_p4,
            self.slope_p3_long,
            self.slope_p4_long,
            self.bankroll,
            self.profit,
            self.round_num as f64,
            self.class as f64,
        ]
    }

    fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hasher.update(&[self.outcome.symbol() as u8]);
        let decision = match self.decision {
            Decision::NoBet => b'N',
            Decision::Bet(side) => side.outcome().symbol() as u8,
        };
        hasher.update(&[decision]);
        for v in self.numeric_fields() {
            hasher.update(&v.to_bits().to_le_bytes());
        }
    }
}

/// Ordered derived table for a whole history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoundTable {
    records: Vec<RoundRecord>,
}

impl RoundTable {
    pub fn new(records: Vec<RoundRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// BLAKE3 over the raw bit patterns of every field.
    ///
    /// Two tables share a digest only if they are bit-identical, NaNs included,
    /// which `PartialEq` on `f64` cannot express.
    pub fn digest(&self) -> TableDigest {
        let mut hasher = blake3::Hasher::new();
        for record in &self.records {
            record.hash_into(&mut hasher);
        }
        TableDigest(hasher.finalize().to_hex().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;

    fn record(round_num: usize, rsi: f64) -> RoundRecord {
        RoundRecord {
            round_num,
            outcome: Outcome::Player,
            class: 0,
            p1: 0.0,
            p2: 0.0,
            p3: 0.0,
            p4: 0.0,
            cumulative: 1.0,
            rsi_p3: rsi,
            rsi_p4: f64::NAN,
            support: f64::NAN,
            resistance: f64::NAN,
            slope_p3: f64::NAN,
            slope_p4: f64::NAN,
            slope_p3_long: f64::NAN,
            slope_p4_long: f64::NAN,
            decision: Decision::Bet(Side::Banker),
            bankroll: 5000.0,
            profit: 0.0,
        }
    }

    #[test]
    fn digest_is_stable_with_nans() {
        let a = RoundTable::new(vec![record(1, f64::NAN)]);
        let b = RoundTable::new(vec![record(1, f64::NAN)]);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn digest_changes_with_any_field() {
        let a = RoundTable::new(vec![record(1, 40.0)]);
        let b = RoundTable::new(vec![record(1, 40.000000001)]);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn serializes_nan_as_null_and_labels_as_text() {
        let json = serde_json::to_value(record(1, f64::NAN)).unwrap();
        assert!(json["rsi_p3"].is_null());
        assert_eq!(json["decision"], "Banker");
        assert_eq!(json["outcome"], "Player");
    }
}
