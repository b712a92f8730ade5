//! Rules engine trait.
//!
//! Rule sets implement `RulesEngine` to define:
//! - What actions are legal
//! - How actions transform state
//! - When the match is over
//!
//! `apply_action` is pure: it reads a `MatchState` and returns a new one,
//! so callers can keep, diff or discard either copy.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Color, MatchState, RuleConfig, RulesError};

use super::capture::Captures;
use super::movable::MovableSet;

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// First color to finish won outright.
    Winner(Color),
    /// Full finishing order, first place first.
    Ranked(Vec<Color>),
}

impl MatchResult {
    /// The first-placed color.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        match self {
            MatchResult::Winner(color) => Some(*color),
            MatchResult::Ranked(order) => order.first().copied(),
        }
    }

    /// 1-based place of a color, if it was placed.
    #[must_use]
    pub fn place_of(&self, color: Color) -> Option<usize> {
        match self {
            MatchResult::Winner(c) => (*c == color).then_some(1),
            MatchResult::Ranked(order) => order.iter().position(|&c| c == color).map(|i| i + 1),
        }
    }
}

/// What a move did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Index of the moved token.
    pub token: u8,
    /// Relative position before the move.
    pub from: i16,
    /// Relative position after the move.
    pub to: i16,
    /// Opposing tokens sent home.
    pub captured: Captures,
    /// The moved token reached the terminal slot.
    pub token_finished: bool,
    /// All of the mover's tokens are now finished.
    pub all_finished: bool,
    /// The mover rolls again.
    pub extra_turn: bool,
}

impl MoveOutcome {
    /// Check if at least one opposing token was captured.
    #[must_use]
    pub fn captured_opponent(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Observable effect of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEvent {
    /// Die thrown.
    Rolled { face: u8, movable: MovableSet },
    /// Token moved.
    Moved(MoveOutcome),
    /// Turn given up for lack of a legal move.
    Passed,
    /// Turn pointer moved on.
    Advanced { next: Color, extra_turn: bool },
}

/// New state plus what happened.
#[derive(Clone, Debug)]
pub struct Transition {
    /// State after the action.
    pub state: MatchState,
    /// Effect of the action.
    pub event: TurnEvent,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the color can't act
/// - `apply_action`: Must be deterministic; reject illegal actions with an
///   error and leave the input state untouched
/// - `is_terminal`: Return None if the match continues
pub trait RulesEngine {
    /// Get the rule configuration.
    fn config(&self) -> &RuleConfig;

    /// Enumerate every legal action for a color.
    ///
    /// While awaiting a roll this lists one `Roll` per die face (the die is a
    /// chance event; callers pick the face with a `DiceRng`).
    fn legal_actions(&self, state: &MatchState, color: Color) -> Vec<Action>;

    /// Apply an action, producing a new state.
    fn apply_action(
        &self,
        state: &MatchState,
        color: Color,
        action: &Action,
    ) -> Result<Transition, RulesError>;

    /// Check if the match is over.
    ///
    /// Returns `Some(result)` if the match has ended, `None` if it continues.
    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult>;

    // === Convenience Methods ===

    /// Check if an action is currently legal for a color.
    fn is_legal(&self, state: &MatchState, color: Color, action: &Action) -> bool {
        self.legal_actions(state, color).contains(action)
    }
}
