//! Core engine types: colors, tokens, state, actions, dice, configuration.
//!
//! This module contains the building blocks every other module shares.
//! Rule variants are expressed through `RuleConfig` rather than by
//! modifying the core.

pub mod color;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use color::{Color, ColorMap, PALETTE_SIZE};
pub use rng::{DiceRng, DiceRngState};
pub use config::{
    ExtraTurnRules, FinishPolicy, RuleConfig, TimingConfig, WinMode, BONUS_FACE, MAX_TERMINAL,
};
pub use action::{Action, ActionRecord};
pub use state::{home_tokens, ColorTokens, MatchState, Token, HOME, TOKENS_PER_COLOR};
pub use error::{ConfigError, MemoryGameError, RulesError, SyncError};
