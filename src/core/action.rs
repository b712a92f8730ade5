//! Action representation.
//!
//! Every state transition the engine accepts is one of four actions:
//! - `Roll`: the color on turn throws the die (the face is recorded so the
//!   action replays deterministically)
//! - `Move`: move one token by the rolled number of steps
//! - `Pass`: end a turn that has no legal move
//! - `Advance`: hand the turn on (or keep it, on an extra turn)

use serde::{Deserialize, Serialize};

use super::color::Color;

/// A single engine action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Throw the die and show `face`.
    Roll { face: u8 },
    /// Move token `token` by `steps`.
    Move { token: u8, steps: u8 },
    /// Give up a turn with no legal move.
    Pass,
    /// Leave a resolved turn. `extra_turn` must match what the move earned.
    Advance { extra_turn: bool },
}

impl Action {
    /// Create a move action.
    #[must_use]
    pub const fn move_token(token: u8, steps: u8) -> Self {
        Action::Move { token, steps }
    }

    /// Check if this is a roll.
    #[must_use]
    pub const fn is_roll(&self) -> bool {
        matches!(self, Action::Roll { .. })
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Deterministic replay
/// - Replicating accepted actions to peers
/// - Debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The color that took this action.
    pub color: Color,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(color: Color, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            color,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_constructors() {
        assert_eq!(Action::move_token(2, 5), Action::Move { token: 2, steps: 5 });
        assert!(Action::Roll { face: 3 }.is_roll());
        assert!(!Action::Pass.is_roll());
        assert!(!Action::Advance { extra_turn: true }.is_roll());
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(Color::Red, Action::Roll { face: 6 }, 3, 1);

        assert_eq!(record.color, Color::Red);
        assert_eq!(record.action, Action::Roll { face: 6 });
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 1);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::move_token(1, 4);
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"move":{"token":1,"steps":4}}"#);

        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }
}
