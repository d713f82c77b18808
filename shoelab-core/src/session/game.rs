//! One game's history and its derived table.

use tracing::{info, warn};

use super::{RoundView, SessionError, Summary, Tallies};
use crate::config::EngineConfig;
use crate::domain::{GameLabel, History, Outcome, Round, TableDigest};
use crate::engine::{recompute, RecomputeError, RoundTable};

#[derive(Debug, Clone)]
pub struct Session {
    label: GameLabel,
    config: EngineConfig,
    history: History,
    table: RoundTable,
    tallies: Tallies,
}

impl Session {
    /// An invalid `config` is reported by the first action, which then leaves
    /// the session empty.
    pub fn new(label: GameLabel, config: EngineConfig) -> Self {
        Self {
            label,
            config,
            history: History::new(),
            table: RoundTable::default(),
            tallies: Tallies::default(),
        }
    }

    /// Rebuild a session from rounds kept by an external store.
    ///
    /// Fails with `StateCorruption` when the stored numbering has gaps and
    /// with `Config` when `config` does not validate.
    pub fn restore(
        label: GameLabel,
        config: EngineConfig,
        rounds: Vec<Round>,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(label, config);
        session.commit(History::from_rounds(rounds))?;
        Ok(session)
    }

    pub fn label(&self) -> &GameLabel {
        &self.label
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn table(&self) -> &RoundTable {
        &self.table
    }

    pub fn tallies(&self) -> Tallies {
        self.tallies
    }

    /// Append one result and recompute.
    pub fn record(&mut self, outcome: Outcome) -> Result<RoundView, SessionError> {
        let mut candidate = self.history.clone();
        let round = candidate.push(outcome);
        self.commit(candidate)?;
        info!(
            game = %self.label,
            round = round.round_num,
            outcome = %outcome,
            "recorded result"
        );
        Ok(self.view())
    }

    /// Parse an operator symbol and record it.
    pub fn record_symbol(&mut self, symbol: &str) -> Result<RoundView, SessionError> {
        let outcome = symbol.parse::<Outcome>().map_err(|e| {
            warn!(game = %self.label, symbol, "rejected result symbol");
            SessionError::from(e)
        })?;
        self.record(outcome)
    }

    /// Drop the newest round and recompute from the shorter history.
    pub fn undo(&mut self) -> Result<RoundView, SessionError> {
        let mut candidate = self.history.clone();
        let Some(removed) = candidate.pop() else {
            warn!(game = %self.label, "undo on empty history");
            return Err(SessionError::EmptyHistory(self.label.clone()));
        };
        self.commit(candidate)?;
        info!(game = %self.label, round = removed.round_num, "undid result");
        Ok(self.view())
    }

    /// Clear history and all derived state. The config is kept.
    pub fn reset(&mut self) {
        self.history = History::new();
        self.table = RoundTable::default();
        self.tallies = Tallies::default();
        info!(game = %self.label, "session reset");
    }

    /// Swap the engine config and recompute the existing history under it.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<RoundView, SessionError> {
        config.validate()?;
        let previous = std::mem::replace(&mut self.config, config);
        if let Err(e) = self.commit(self.history.clone()) {
            self.config = previous;
            return Err(e);
        }
        info!(game = %self.label, "config replaced");
        Ok(self.view())
    }

    pub fn view(&self) -> RoundView {
        RoundView {
            latest: self.table.last().cloned(),
            table: self.table.clone(),
        }
    }

    pub fn summary(&self) -> Summary {
        let start = self.config.staking.starting_bankroll;
        let last = self.table.last();
        Summary {
            label: self.label.clone(),
            tallies: self.tallies,
            proportions: last.map(|r| r.proportions()).unwrap_or_default(),
            bankroll: last.map_or(start, |r| r.bankroll),
            profit: last.map_or(0.0, |r| r.profit),
            table: self.table.clone(),
        }
    }

    /// Digest of the current table; equal digests mean bit-identical tables.
    pub fn fingerprint(&self) -> TableDigest {
        self.table.digest()
    }

    /// Recompute `candidate` and, only if that succeeds, replace history,
    /// table and tallies together.
    fn commit(&mut self, candidate: History) -> Result<(), SessionError> {
        let table = recompute(&candidate, &self.config).map_err(|e| match e {
            RecomputeError::Config(e) => {
                warn!(game = %self.label, error = %e, "recompute rejected config");
                SessionError::Config(e)
            }
            RecomputeError::History(e) => {
                warn!(game = %self.label, error = %e, "recompute rejected history");
                SessionError::StateCorruption {
                    label: self.label.clone(),
                    detail: e.to_string(),
                }
            }
        })?;
        self.tallies = Tallies::from_outcomes(candidate.rounds().iter().map(|r| &r.outcome));
        self.history = candidate;
        self.table = table;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Decision;

    fn session() -> Session {
        Session::new(GameLabel::new("G1"), EngineConfig::default())
    }

    #[test]
    fn record_appends_and_returns_latest_row() {
        let mut s = session();
        let view = s.record(Outcome::Player).unwrap();
        let latest = view.latest.unwrap();
        assert_eq!(latest.round_num, 1);
        assert_eq!(latest.outcome, Outcome::Player);
        assert_eq!(latest.decision, Decision::NoBet);
        assert_eq!(view.table.len(), 1);
        assert_eq!(s.tallies().player, 1);
    }

    #[test]
    fn bad_symbol_leaves_state_untouched() {
        let mut s = session();
        s.record(Outcome::Banker).unwrap();
        let before = s.fingerprint();
        let err = s.record_symbol("Z").unwrap_err();
        assert!(matches!(err, SessionError::InvalidResult(_)));
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.fingerprint(), before);
    }

    #[test]
    fn symbols_are_case_insensitive() {
        let mut s = session();
        s.record_symbol("p").unwrap();
        s.record_symbol(" Banker ").unwrap();
        s.record_symbol("TIE").unwrap();
        let tallies = s.tallies();
        assert_eq!((tallies.player, tallies.banker, tallies.tie), (1, 1, 1));
    }

    #[test]
    fn undo_on_empty_is_an_error() {
        let mut s = session();
        assert!(matches!(s.undo(), Err(SessionError::EmptyHistory(_))));
    }

    #[test]
    fn undo_restores_previous_view() {
        let mut s = session();
        for o in [Outcome::Player, Outcome::Banker, Outcome::Player] {
            s.record(o).unwrap();
        }
        let before = s.view();
        let digest = s.fingerprint();
        s.record(Outcome::Banker).unwrap();
        let after_undo = s.undo().unwrap();
        assert_eq!(s.fingerprint(), digest);
        assert_eq!(after_undo.latest.map(|r| r.round_num), before.latest.map(|r| r.round_num));
        assert_eq!(s.tallies().banker, 1);
    }

    #[test]
    fn reset_restores_initial_summary() {
        let mut s = session();
        s.record(Outcome::Player).unwrap();
        s.reset();
        let summary = s.summary();
        assert!(summary.table.is_empty());
        assert_eq!(summary.tallies, Tallies::default());
        assert_eq!(summary.bankroll, 5000.0);
        assert_eq!(summary.profit, 0.0);
    }

    #[test]
    fn restore_rejects_gaps() {
        let rounds = vec![
            Round {
                round_num: 1,
                outcome: Outcome::Player,
            },
            Round {
                round_num: 3,
                outcome: Outcome::Player,
            },
        ];
        let err = Session::restore(GameLabel::new("G2"), EngineConfig::default(), rounds)
            .unwrap_err();
        match err {
            SessionError::StateCorruption { label, .. } => assert_eq!(label.as_str(), "G2"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn set_config_rejects_invalid_and_keeps_old() {
        let mut s = session();
        s.record(Outcome::Player).unwrap();
        let mut bad = EngineConfig::default();
        bad.indicators.rsi_window = 0;
        assert!(matches!(s.set_config(bad), Err(SessionError::Config(_))));
        assert_eq!(s.config(), &EngineConfig::default());
    }

    #[test]
    fn invalid_config_surfaces_on_first_record() {
        let mut config = EngineConfig::default();
        config.indicators.rsi_window = 0;
        let mut s = Session::new(GameLabel::new("G3"), config);
        assert!(matches!(
            s.record(Outcome::Banker),
            Err(SessionError::Config(_))
        ));
        assert!(s.history().is_empty());
        assert!(s.table().is_empty());
        assert_eq!(s.tallies(), Tallies::default());
    }

    #[test]
    fn restore_rejects_zero_slope_offset() {
        let mut config = EngineConfig::default();
        config.indicators.slope_long = 0;
        let rounds = vec![Round {
            round_num: 1,
            outcome: Outcome::Player,
        }];
        let err = Session::restore(GameLabel::new("G4"), config, rounds).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }
}
