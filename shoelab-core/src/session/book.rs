//! Independent sessions keyed by game label.

use std::collections::BTreeMap;

use super::{RoundView, Session, SessionError, Summary};
use crate::config::EngineConfig;
use crate::domain::{GameLabel, Outcome, TableDigest};

/// Holds every open game. Sessions are created on first use with the book's
/// default config and never share state.
#[derive(Debug, Clone, Default)]
pub struct SessionBook {
    default_config: EngineConfig,
    sessions: BTreeMap<GameLabel, Session>,
}

impl SessionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(default_config: EngineConfig) -> Self {
        Self {
            default_config,
            sessions: BTreeMap::new(),
        }
    }

    pub fn default_config(&self) -> &EngineConfig {
        &self.default_config
    }

    pub fn session(&self, label: &GameLabel) -> Option<&Session> {
        self.sessions.get(label)
    }

    pub fn session_mut(&mut self, label: &GameLabel) -> &mut Session {
        self.sessions
            .entry(label.clone())
            .or_insert_with(|| Session::new(label.clone(), self.default_config.clone()))
    }

    /// Labels of sessions created so far, in order.
    pub fn labels(&self) -> impl Iterator<Item = &GameLabel> {
        self.sessions.keys()
    }

    /// Adopt an already restored session, replacing any with the same label.
    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.label().clone(), session);
    }

    pub fn record_result(
        &mut self,
        label: &GameLabel,
        outcome: Outcome,
    ) -> Result<RoundView, SessionError> {
        self.session_mut(label).record(outcome)
    }

    pub fn record_symbol(
        &mut self,
        label: &GameLabel,
        symbol: &str,
    ) -> Result<RoundView, SessionError> {
        self.session_mut(label).record_symbol(symbol)
    }

    pub fn undo_last_result(&mut self, label: &GameLabel) -> Result<RoundView, SessionError> {
        self.session_mut(label).undo()
    }

    pub fn reset_session(&mut self, label: &GameLabel) {
        self.session_mut(label).reset();
    }

    /// Per-session config override.
    pub fn configure(
        &mut self,
        label: &GameLabel,
        config: EngineConfig,
    ) -> Result<RoundView, SessionError> {
        self.session_mut(label).set_config(config)
    }

    /// Summary of `label`; an unknown label reads as a fresh session.
    pub fn summary(&self, label: &GameLabel) -> Summary {
        match self.sessions.get(label) {
            Some(session) => session.summary(),
            None => Session::new(label.clone(), self.default_config.clone()).summary(),
        }
    }

    pub fn fingerprint(&self, label: &GameLabel) -> Option<TableDigest> {
        self.sessions.get(label).map(Session::fingerprint)
    }
}
