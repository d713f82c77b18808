//! Full-history recompute.

use thiserror::Error;
use tracing::debug;

use super::precompute::compute_series;
use super::table::{RoundRecord, RoundTable};
use crate::config::{ConfigError, EngineConfig};
use crate::domain::{Decision, History, HistoryError};
use crate::indicators::transition::class_code;
use crate::strategy::{create_rule, DecisionState};

#[derive(Debug, Error)]
pub enum RecomputeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Derive the whole table for `history`.
///
/// Pure: the same history and config always give a bit-identical table, and
/// row `i` depends only on rounds `0..=i`. Fails when the config does not
/// validate or the history's round numbering is broken; nothing is computed
/// in either case.
pub fn recompute(history: &History, config: &EngineConfig) -> Result<RoundTable, RecomputeError> {
    config.validate()?;
    history.validate()?;

    let outcomes = history.outcomes();
    let series = compute_series(&outcomes, &config.indicators);
    let rule = create_rule(&config.strategy, &config.staking);
    let mut state = DecisionState::new(&config.staking);
    let start = config.staking.starting_bankroll;
    // No entry can open before this, so there is nothing to settle either.
    let warmup = rule.warmup_rounds();

    let mut records = Vec::with_capacity(series.len());
    for (i, round) in history.rounds().iter().enumerate() {
        let decision = if i < warmup {
            Decision::NoBet
        } else {
            rule.decide(&series, i, &mut state)
        };
        state.previous_decision = Some(decision);

        let p = series.proportions[i];
        records.push(RoundRecord {
            round_num: round.round_num,
            outcome: round.outcome,
            class: class_code(series.classes[i]),
            p1: p.p(1),
            p2: p.p(2),
            p3: p.p(3),
            p4: p.p(4),
            cumulative: series.cumulative[i],
            rsi_p3: series.rsi_p3[i],
            rsi_p4: series.rsi_p4[i],
            support: series.support[i],
            resistance: series.resistance[i],
            slope_p3: series.slope_p3[i],
            slope_p4: series.slope_p4[i],
            slope_p3_long: series.slope_p3_long[i],
            slope_p4_long: series.slope_p4_long[i],
            decision,
            bankroll: state.bankroll,
            profit: state.bankroll - start,
        });
    }

    debug!(
        rule = rule.name(),
        rounds = records.len(),
        bankroll = state.bankroll,
        "recomputed table"
    );
    Ok(RoundTable::new(records))
}
