//! Single-writer replication.
//!
//! One `Authority` owns the match and is the only place actions are
//! applied for real. Every accepted action produces a `StateUpdate` with a
//! strictly increasing version. A `Replica` on each peer applies those
//! updates in order, optionally predicting its own actions in between.
//!
//! Updates carry the full state, so a replica never has to replay to catch
//! up and a lost update is healed by the next one.

mod authority;
mod replica;

use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, MatchState, SyncError};

pub use authority::Authority;
pub use replica::{ApplyOutcome, Replica};

/// Authoritative state after an accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    /// Monotonic version, 0 for the initial state.
    pub version: u64,
    /// Action that produced this state. `None` for the initial state.
    pub record: Option<ActionRecord>,
    /// Full state after the action.
    pub state: MatchState,
}

impl StateUpdate {
    /// Encode for the wire.
    pub fn encode(&self) -> Result<Vec<u8>, SyncError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the wire.
    pub fn decode(bytes: &[u8]) -> Result<Self, SyncError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
