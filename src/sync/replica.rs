//! Peer side of a replicated match.
//!
//! Follows the authority's versioned updates and can run ahead with a
//! locally predicted state until the next update confirms or replaces it.

use tracing::{debug, warn};

use crate::core::{Action, Color, MatchState, RuleConfig, SyncError};
use crate::games::ludo::LudoRules;
use crate::rules::{RulesEngine, TurnEvent};

use super::StateUpdate;

/// What applying an authoritative update did to the local view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Local prediction (if any) matched the authority.
    Confirmed,
    /// Local prediction disagreed and was thrown away.
    Resynced,
}

/// A peer's read-only copy of a match.
///
/// Holds the last confirmed state plus an optional predicted state built by
/// applying local actions ahead of the authority. The authority always
/// wins.
#[derive(Clone, Debug)]
pub struct Replica {
    rules: LudoRules,
    confirmed: MatchState,
    predicted: Option<MatchState>,
    version: u64,
}

impl Replica {
    /// Start from an authority snapshot.
    pub fn from_snapshot(config: RuleConfig, snapshot: StateUpdate) -> Result<Self, SyncError> {
        Ok(Self {
            rules: LudoRules::new(config)?,
            confirmed: snapshot.state,
            predicted: None,
            version: snapshot.version,
        })
    }

    /// Version of the last applied update.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Last state confirmed by the authority.
    #[must_use]
    pub fn confirmed(&self) -> &MatchState {
        &self.confirmed
    }

    /// State to present: the prediction if there is one.
    #[must_use]
    pub fn view(&self) -> &MatchState {
        self.predicted.as_ref().unwrap_or(&self.confirmed)
    }

    #[must_use]
    pub fn has_prediction(&self) -> bool {
        self.predicted.is_some()
    }

    /// Apply a local action ahead of the authority.
    ///
    /// Illegal actions are rejected without touching the view.
    pub fn predict(&mut self, color: Color, action: &Action) -> Result<TurnEvent, SyncError> {
        let transition = self.rules.apply_action(self.view(), color, action)?;
        self.predicted = Some(transition.state);
        Ok(transition.event)
    }

    /// Apply an authoritative update.
    pub fn apply(&mut self, update: StateUpdate) -> Result<ApplyOutcome, SyncError> {
        if update.version <= self.version {
            return Err(SyncError::StaleUpdate {
                received: update.version,
                current: self.version,
            });
        }

        let outcome = match self.predicted.take() {
            Some(predicted) if predicted != update.state => {
                warn!(
                    version = update.version,
                    record = ?update.record,
                    "prediction diverged from authority, resyncing"
                );
                ApplyOutcome::Resynced
            }
            _ => ApplyOutcome::Confirmed,
        };

        debug!(from = self.version, to = update.version, "replica applied update");
        self.version = update.version;
        self.confirmed = update.state;
        Ok(outcome)
    }

    /// Adopt a full snapshot whatever its version, dropping any prediction.
    ///
    /// For recovery after the replica lost track (e.g. the authority was
    /// restarted and its versions began again).
    pub fn reset(&mut self, snapshot: StateUpdate) {
        warn!(from = self.version, to = snapshot.version, "replica reset from snapshot");
        self.version = snapshot.version;
        self.confirmed = snapshot.state;
        self.predicted = None;
    }

    /// Decode and apply an update from the wire.
    pub fn apply_bytes(&mut self, bytes: &[u8]) -> Result<ApplyOutcome, SyncError> {
        self.apply(StateUpdate::decode(bytes)?)
    }
}
