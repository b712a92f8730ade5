//! Authoritative side of a replicated match.
//!
//! Applies actions to the real `LudoMatch` and stamps each accepted one
//! with the next version.

use tracing::debug;

use crate::core::{Action, Color, SyncError};
use crate::games::ludo::LudoMatch;

use super::StateUpdate;

/// The single writer of a match.
#[derive(Clone, Debug)]
pub struct Authority {
    game: LudoMatch,
    version: u64,
}

impl Authority {
    pub fn new(game: LudoMatch) -> Self {
        Self { game, version: 0 }
    }

    #[must_use]
    pub fn game(&self) -> &LudoMatch {
        &self.game
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a peer's action and return the update to broadcast.
    ///
    /// Rolls are thrown with the authority's own dice; the face a peer
    /// sends is ignored.
    pub fn submit(&mut self, color: Color, action: &Action) -> Result<StateUpdate, SyncError> {
        match action {
            Action::Roll { .. } => {
                self.game.roll_dice(color)?;
            }
            _ => {
                self.game.apply(color, action)?;
            }
        }
        self.version += 1;
        debug!(version = self.version, %color, ?action, "authority accepted action");
        Ok(self.snapshot())
    }

    /// Apply the only possible outcome of a forced phase, if any.
    pub fn resolve_forced(&mut self) -> Result<Option<StateUpdate>, SyncError> {
        if self.game.resolve_forced()?.is_none() {
            return Ok(None);
        }
        self.version += 1;
        Ok(Some(self.snapshot()))
    }

    /// Current state for a peer joining late or recovering from a desync.
    #[must_use]
    pub fn snapshot(&self) -> StateUpdate {
        let state = self.game.state().clone();
        StateUpdate {
            version: self.version,
            record: state.history.last().cloned(),
            state,
        }
    }
}
