//! # ludo-engine
//!
//! A deterministic rules engine for Ludo, built for simulation and
//! networked play.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Every rule operation reads a `MatchState` and
//!    returns a new one. Rejected actions leave the input untouched.
//!
//! 2. **N-Player First**: Any roster of 2-4 colors. Turn order, capture and
//!    ranking never assume two players.
//!
//! 3. **Configuration Over Convention**: Board size, safe cells, exit roll,
//!    finishing and extra-turn rules come from `RuleConfig`.
//!
//! ## Architecture
//!
//! - **Relative Positions**: Tokens store progress along their own color's
//!   route. `Topology` maps that to shared board cells for capture.
//!
//! - **Explicit Turn Phases**: `TurnPhase` encodes roll, choice and
//!   resolution so callers can tell what input the match is waiting for.
//!
//! - **Persistent History**: Actions are appended to an `im::Vector`, so
//!   cloning a state is cheap and any match can be replayed.
//!
//! ## Modules
//!
//! - `core`: Colors, configuration, dice, actions, state, errors
//! - `board`: Track topology and safe cells
//! - `rules`: Movable tokens, movement, capture, turn flow, `RulesEngine`
//! - `games`: The Ludo rule set and match facade, plus the sequence recall
//!   and number recall memory games
//! - `sync`: Single-writer replication of match state

pub mod core;
pub mod board;
pub mod rules;
pub mod games;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap,
    DiceRng, DiceRngState,
    RuleConfig, TimingConfig, ExtraTurnRules, FinishPolicy, WinMode,
    Action, ActionRecord,
    MatchState, Token, HOME, TOKENS_PER_COLOR,
    ConfigError, RulesError, SyncError, MemoryGameError,
};

pub use crate::board::{Topology, TokenLocation};

pub use crate::rules::{
    RulesEngine, MatchResult, MoveOutcome, Transition, TurnEvent, TurnPhase,
    MovableSet, Capture,
};

pub use crate::games::ludo::{LudoMatch, LudoRules, MatchBuilder, RollOutcome};
pub use crate::games::Difficulty;
pub use crate::games::number_recall::{ClickOutcome, NumberRecall};
pub use crate::games::sequence_recall::{HighScores, PressOutcome, RecallResult, SequenceRecall};

pub use crate::sync::{Authority, Replica, StateUpdate, ApplyOutcome};
