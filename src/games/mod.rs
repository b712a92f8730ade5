//! Game implementations built on the rules engine.
//!
//! `ludo` is the board game proper. `sequence_recall` and `number_recall`
//! are the two tile memory games that share its dice and error handling.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod ludo;
pub mod number_recall;
pub mod sequence_recall;

/// Difficulty level of the memory games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Sequence recall grid and playback pacing for this level.
    #[must_use]
    pub const fn sequence_settings(self) -> SequenceSettings {
        match self {
            Difficulty::Easy => SequenceSettings {
                grid_size: 3,
                initial_speed: Duration::from_millis(800),
                speed_decrease: Duration::from_millis(30),
                min_speed: Duration::from_millis(400),
            },
            Difficulty::Medium => SequenceSettings {
                grid_size: 3,
                initial_speed: Duration::from_millis(600),
                speed_decrease: Duration::from_millis(40),
                min_speed: Duration::from_millis(300),
            },
            Difficulty::Hard => SequenceSettings {
                grid_size: 4,
                initial_speed: Duration::from_millis(500),
                speed_decrease: Duration::from_millis(50),
                min_speed: Duration::from_millis(200),
            },
        }
    }
}

/// Grid and pacing of a sequence recall game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSettings {
    /// Tiles per grid side.
    pub grid_size: u8,
    /// How long each tile is lit in round 1.
    pub initial_speed: Duration,
    /// Shortened by this much every round.
    pub speed_decrease: Duration,
    /// Floor for the lit time.
    pub min_speed: Duration,
}

impl SequenceSettings {
    /// Tiles in the grid.
    #[must_use]
    pub const fn tile_count(&self) -> u8 {
        self.grid_size * self.grid_size
    }

    /// Lit time per tile in `round` (1-based).
    #[must_use]
    pub fn speed(&self, round: u32) -> Duration {
        let shortened = self.speed_decrease.saturating_mul(round.saturating_sub(1));
        self.initial_speed.saturating_sub(shortened).max(self.min_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_settings_per_level() {
        assert_eq!(Difficulty::Easy.sequence_settings().tile_count(), 9);
        assert_eq!(Difficulty::Medium.sequence_settings().tile_count(), 9);
        assert_eq!(Difficulty::Hard.sequence_settings().tile_count(), 16);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_speed_floors_at_minimum() {
        let medium = Difficulty::Medium.sequence_settings();
        assert_eq!(medium.speed(1), Duration::from_millis(600));
        assert_eq!(medium.speed(4), Duration::from_millis(480));
        assert_eq!(medium.speed(8), Duration::from_millis(320));
        assert_eq!(medium.speed(9), Duration::from_millis(300));
        assert_eq!(medium.speed(500), Duration::from_millis(300));
    }

    #[test]
    fn test_difficulty_serde() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        let level: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(level, Difficulty::Easy);
    }
}
