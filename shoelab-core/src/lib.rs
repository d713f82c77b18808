//! shoelab core: round history, transition indicators, decision rules and the
//! session ledger.
//!
//! - Domain types (outcomes, rounds, history, game labels)
//! - Causal indicators over the outcome sequence: transition classes,
//!   proportions, cumulative score, oscillator, support/resistance, slopes
//! - Decision rules behind one trait, built from a serializable config
//! - Full-history recompute producing one table row per round
//! - Session ledger with atomic record/undo/reset per game label

pub mod config;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod session;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a front end might move to a worker
    /// thread is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::History>();
        require_sync::<domain::History>();
        require_send::<domain::GameLabel>();
        require_sync::<domain::GameLabel>();

        require_send::<config::EngineConfig>();
        require_sync::<config::EngineConfig>();

        require_send::<engine::IndicatorSeries>();
        require_sync::<engine::IndicatorSeries>();
        require_send::<engine::RoundTable>();
        require_sync::<engine::RoundTable>();

        require_send::<strategy::DecisionState>();
        require_sync::<strategy::DecisionState>();
        require_send::<Box<dyn strategy::DecisionRule>>();
        require_sync::<Box<dyn strategy::DecisionRule>>();

        require_send::<session::Session>();
        require_sync::<session::Session>();
        require_send::<session::SessionBook>();
        require_sync::<session::SessionBook>();
    }

    /// Rules see indicator columns and their own state, never the ledger.
    #[test]
    fn decision_rule_reads_only_series_and_state() {
        fn _check_trait_object_builds(
            rule: &dyn strategy::DecisionRule,
            series: &engine::IndicatorSeries,
            state: &mut strategy::DecisionState,
        ) -> domain::Decision {
            rule.decide(series, 0, state)
        }
    }
}
