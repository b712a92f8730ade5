//! Rule configuration.
//!
//! Ludo is played under several house-rule variants. Rather than hardcode
//! one, the engine reads every variable rule from a `RuleConfig`:
//! - Board shape: shared path length, home-stretch length, safe cells
//! - Dice: number of faces, the roll that releases a token from home
//! - Extra turns: which events let the same color roll again
//! - Finishing: exact landing or clamp-to-finish
//! - Match end: full ranking or first finisher wins
//!
//! `TimingConfig` holds cosmetic delays for callers. The engine never
//! waits on them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Largest terminal position a board may have. Relative positions are `i16`.
pub const MAX_TERMINAL: u16 = i16::MAX as u16;

/// Face that triggers the six bonus, whatever the die size.
pub const BONUS_FACE: u8 = 6;

/// How a token may reach the end of its home stretch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishPolicy {
    /// The roll must land exactly on (or short of) the terminal slot.
    /// Overshooting makes the token non-movable.
    #[default]
    Exact,
    /// Any roll that reaches or passes the terminal slot finishes the token.
    Clamp,
}

/// When the match ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinMode {
    /// Finished colors leave the rotation and are ranked in finishing order.
    /// The last remaining color is ranked last and the match ends.
    #[default]
    Ranking,
    /// The first color to finish all tokens wins and the match ends.
    FirstFinisher,
}

/// Events that grant the mover another roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraTurnRules {
    /// Rolling a 6 (`BONUS_FACE`). Dice without a six face never trigger it.
    pub on_six: bool,
    /// Sending at least one opposing token home.
    pub on_capture: bool,
    /// Moving a token into the terminal slot.
    pub on_finish: bool,
}

impl Default for ExtraTurnRules {
    fn default() -> Self {
        Self {
            on_six: true,
            on_capture: true,
            on_finish: true,
        }
    }
}

impl ExtraTurnRules {
    /// Only a six grants another roll.
    #[must_use]
    pub const fn six_only() -> Self {
        Self {
            on_six: true,
            on_capture: false,
            on_finish: false,
        }
    }

    /// Decide whether a resolved move earns an extra turn.
    #[must_use]
    pub fn grants(&self, rolled_six: bool, captured: bool, finished: bool) -> bool {
        (self.on_six && rolled_six) || (self.on_capture && captured) || (self.on_finish && finished)
    }
}

/// Complete rule set for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Cells on the shared circular path.
    pub path_length: u16,

    /// Cells in each color's private home stretch, excluding the terminal slot.
    pub stretch_length: u16,

    /// Absolute cells where tokens cannot be captured.
    pub safe_cells: Vec<u16>,

    /// Faces on the die (rolls are `1..=dice_faces`).
    pub dice_faces: u8,

    /// Roll required to bring a token out of home.
    pub exit_roll: u8,

    /// Extra-turn triggers.
    pub extra_turn: ExtraTurnRules,

    /// Overshoot handling at the end of the home stretch.
    pub finish_policy: FinishPolicy,

    /// Match end condition.
    pub win_mode: WinMode,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            path_length: 52,
            stretch_length: 6,
            safe_cells: vec![0, 8, 13, 21, 26, 34, 39, 47],
            dice_faces: 6,
            exit_roll: 6,
            extra_turn: ExtraTurnRules::default(),
            finish_policy: FinishPolicy::Exact,
            win_mode: WinMode::Ranking,
        }
    }
}

impl RuleConfig {
    /// The canonical rule set (same as `Default`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra turn on six only, first finisher wins.
    #[must_use]
    pub fn six_only() -> Self {
        Self::default()
            .with_extra_turn(ExtraTurnRules::six_only())
            .with_win_mode(WinMode::FirstFinisher)
    }

    /// Set the path and stretch lengths, recomputing the default safe cells.
    ///
    /// Safe cells become every color's entry cell plus a star cell eight
    /// steps past it (scaled to the path length).
    #[must_use]
    pub fn with_board(mut self, path_length: u16, stretch_length: u16) -> Self {
        self.path_length = path_length;
        self.stretch_length = stretch_length;
        self.safe_cells = Self::standard_safe_cells(path_length);
        self
    }

    /// Replace the safe-cell set.
    #[must_use]
    pub fn with_safe_cells(mut self, cells: impl IntoIterator<Item = u16>) -> Self {
        self.safe_cells = cells.into_iter().collect();
        self.safe_cells.sort_unstable();
        self.safe_cells.dedup();
        self
    }

    /// Set the extra-turn triggers.
    #[must_use]
    pub fn with_extra_turn(mut self, rules: ExtraTurnRules) -> Self {
        self.extra_turn = rules;
        self
    }

    /// Set the finishing policy.
    #[must_use]
    pub fn with_finish_policy(mut self, policy: FinishPolicy) -> Self {
        self.finish_policy = policy;
        self
    }

    /// Set the match end condition.
    #[must_use]
    pub fn with_win_mode(mut self, mode: WinMode) -> Self {
        self.win_mode = mode;
        self
    }

    /// Relative position of the terminal (finished) slot.
    #[must_use]
    pub const fn terminal(&self) -> u16 {
        self.path_length.saturating_add(self.stretch_length)
    }

    /// Distance between consecutive colors' entry cells.
    #[must_use]
    pub const fn quadrant_span(&self) -> u16 {
        self.path_length / 4
    }

    /// Entry cells plus the star cell that sits 8/13 of a quadrant past each.
    #[must_use]
    pub fn standard_safe_cells(path_length: u16) -> Vec<u16> {
        let span = u32::from(path_length / 4);
        let star = span * 8 / 13;
        // Every cell is below path_length, so the narrowing is lossless
        let mut cells: Vec<u16> = (0..4)
            .flat_map(|q| [q * span, q * span + star])
            .map(|cell| cell as u16)
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// Check that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path_length == 0 || self.path_length % 4 != 0 {
            return Err(ConfigError::PathLength(self.path_length));
        }
        if self.stretch_length == 0 {
            return Err(ConfigError::StretchLength);
        }
        if u32::from(self.path_length) + u32::from(self.stretch_length) > u32::from(MAX_TERMINAL) {
            return Err(ConfigError::BoardTooLarge {
                path_length: self.path_length,
                stretch_length: self.stretch_length,
            });
        }
        if let Some(&cell) = self.safe_cells.iter().find(|&&c| c >= self.path_length) {
            return Err(ConfigError::SafeCellOutOfRange {
                cell,
                path_length: self.path_length,
            });
        }
        if self.dice_faces < 2 {
            return Err(ConfigError::DiceFaces(self.dice_faces));
        }
        if self.exit_roll == 0 || self.exit_roll > self.dice_faces {
            return Err(ConfigError::ExitRoll {
                exit_roll: self.exit_roll,
                dice_faces: self.dice_faces,
            });
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RuleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Cosmetic delays a caller inserts between a transition and its effect.
///
/// Outcomes never depend on these values; all of them may be zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Dice animation before the rolled face is shown.
    pub dice_roll: Duration,
    /// Wait before a turn with no legal move is passed.
    pub auto_pass: Duration,
    /// Wait before the only legal move is applied.
    pub auto_move: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dice_roll: Duration::from_millis(600),
            auto_pass: Duration::from_millis(1500),
            auto_move: Duration::from_millis(500),
        }
    }
}

impl TimingConfig {
    /// All delays collapsed to zero (tests, simulations, replicas).
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            dice_roll: Duration::ZERO,
            auto_pass: Duration::ZERO,
            auto_move: Duration::ZERO,
        }
    }
}
