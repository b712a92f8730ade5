//! Ludo.
//!
//! - Each color has four tokens that start at home
//! - A six releases a token onto the color's entry cell
//! - Tokens race clockwise around the shared path, then up the color's
//!   private home stretch to the centre
//! - Landing on an opponent outside a safe cell sends it home
//! - Sixes, captures and finishing a token earn another roll (configurable)
//!
//! Supports 2-4 seated colors.

mod game;
mod rules;

pub use game::{LudoMatch, MatchBuilder, RollOutcome};
pub use rules::LudoRules;
