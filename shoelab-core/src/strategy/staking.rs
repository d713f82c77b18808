//! Staking and bankroll accounting.
//!
//! Two settlement modes share the same state:
//! - geometric ladder: a win pays `base * m^min(wins, max_power)` and sets the
//!   next stake to that payout times `m`; a loss debits the pending stake and
//!   drops it back to base.
//! - flat: every bet risks `unit_stake`.
//!
//! Banker wins are paid at `banker_payout` (0.95) for the commission.

use serde::{Deserialize, Serialize};

use super::DecisionState;
use crate::domain::{Outcome, Side};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingParams {
    pub starting_bankroll: f64,
    /// Share of the bankroll set aside for the session ("table budget").
    pub table_fraction: f64,
    /// Base stake is the table budget divided by this.
    pub base_divisor: f64,
    pub multiplier: f64,
    /// Ladder exponent cap (x1, xm, xm^2, xm^3 for 0/1/2/3+ wins).
    pub max_power: u32,
    /// Upper band = starting bankroll + win_threshold * table budget.
    pub win_threshold: f64,
    /// Lower band = starting bankroll - loss_threshold * table budget.
    pub loss_threshold: f64,
    pub banker_payout: f64,
    /// Stop once net wins reach this.
    pub max_wins: i64,
    /// Stop after this many losses in a row.
    pub max_losses: u32,
    /// Stake used by flat-stake rules.
    pub unit_stake: f64,
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            starting_bankroll: 5000.0,
            table_fraction: 0.2,
            base_divisor: 20.0,
            multiplier: 2.2,
            max_power: 3,
            win_threshold: 0.35,
            loss_threshold: 0.2,
            banker_payout: 0.95,
            max_wins: 3,
            max_losses: 2,
            unit_stake: 1.0,
        }
    }
}

impl StakingParams {
    pub fn table_budget(&self) -> f64 {
        self.starting_bankroll * self.table_fraction
    }

    pub fn base_bet(&self) -> f64 {
        self.table_budget() / self.base_divisor
    }

    pub fn upper_band(&self) -> f64 {
        self.starting_bankroll + self.win_threshold * self.table_budget()
    }

    pub fn lower_band(&self) -> f64 {
        self.starting_bankroll - self.loss_threshold * self.table_budget()
    }

    /// Bankroll at or beyond either band.
    pub fn outside_bands(&self, bankroll: f64) -> bool {
        bankroll >= self.upper_band() || bankroll <= self.lower_band()
    }

    /// Net payout of a winning bet of `stake` on `side`.
    pub fn payout(&self, side: Side, stake: f64) -> f64 {
        match side {
            Side::Player => stake,
            Side::Banker => self.banker_payout * stake,
        }
    }

    /// Ladder stake after `wins` consecutive wins.
    pub fn ladder_stake(&self, wins: u32) -> f64 {
        self.base_bet() * self.multiplier.powi(wins.min(self.max_power) as i32)
    }
}

/// How a settled bet ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Won,
    Lost,
    /// No bet was open, or the round was a tie.
    Void,
}

fn settlement(bet: Option<Side>, outcome: Outcome) -> (Settlement, Option<Side>) {
    match (bet, outcome.side()) {
        (Some(side), Some(result)) if side == result => (Settlement::Won, Some(side)),
        (Some(side), Some(_)) => (Settlement::Lost, Some(side)),
        _ => (Settlement::Void, None),
    }
}

fn record_streak(state: &mut DecisionState, settled: Settlement) {
    match settled {
        Settlement::Won => {
            state.consecutive_losses = 0;
            state.consecutive_wins += 1;
            state.wins_total += 1;
        }
        Settlement::Lost => {
            state.consecutive_losses += 1;
            state.consecutive_wins = 0;
            state.wins_total -= 1;
        }
        Settlement::Void => {}
    }
}

/// Settle the previous decision against `outcome` on the geometric ladder.
pub fn settle_ladder(
    params: &StakingParams,
    state: &mut DecisionState,
    outcome: Outcome,
) -> Settlement {
    let bet = state.previous_decision.and_then(|d| d.side());
    let (settled, side) = settlement(bet, outcome);
    match (settled, side) {
        (Settlement::Won, Some(side)) => {
            let stake = params.ladder_stake(state.consecutive_wins);
            state.bankroll += params.payout(side, stake);
            state.next_bet_size = stake * params.multiplier;
        }
        (Settlement::Lost, _) => {
            state.bankroll -= state.next_bet_size;
            state.next_bet_size = params.base_bet();
        }
        _ => {}
    }
    record_streak(state, settled);
    settled
}

/// Settle the previous decision against `outcome` with a flat stake.
pub fn settle_flat(
    params: &StakingParams,
    state: &mut DecisionState,
    outcome: Outcome,
) -> Settlement {
    let bet = state.previous_decision.and_then(|d| d.side());
    let (settled, side) = settlement(bet, outcome);
    match (settled, side) {
        (Settlement::Won, Some(side)) => state.bankroll += params.payout(side, params.unit_stake),
        (Settlement::Lost, _) => state.bankroll -= params.unit_stake,
        _ => {}
    }
    record_streak(state, settled);
    settled
}
