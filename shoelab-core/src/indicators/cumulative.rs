//! Cumulative score: +1 per Player, -1 per Banker, unchanged on Tie.

use crate::domain::Outcome;

pub fn cumulative_score(outcomes: &[Outcome]) -> Vec<f64> {
    outcomes
        .iter()
        .scan(0i64, |acc, o| {
            *acc += o.score();
            Some(*acc as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::outcomes;

    #[test]
    fn worked_example() {
        assert_eq!(
            cumulative_score(&outcomes("PBPPB")),
            vec![1.0, 0.0, 1.0, 2.0, 1.0]
        );
    }

    #[test]
    fn ties_hold_the_score() {
        assert_eq!(
            cumulative_score(&outcomes("TBTT")),
            vec![0.0, -1.0, -1.0, -1.0]
        );
    }
}
