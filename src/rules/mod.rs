//! Ludo rules.
//!
//! - `movable`: which tokens can use a roll
//! - `movement`: where a token lands
//! - `capture`: sending opposing tokens home
//! - `turn`: the per-turn state machine, rotation and ranking
//! - `engine`: the `RulesEngine` trait tying them together
//!
//! Everything here is deterministic and free of I/O.

pub mod movable;
pub mod movement;
pub mod capture;
pub mod turn;
pub mod engine;

pub use movable::{compute_movable, is_movable, MovableSet};
pub use movement::{advance_token, Advance, Landing};
pub use capture::{check_and_capture, Capture, Captures};
pub use turn::{next_turn_index, retire_color, rotate, TurnPhase};
pub use engine::{MatchResult, MoveOutcome, RulesEngine, Transition, TurnEvent};
