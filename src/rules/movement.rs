//! Move execution for a single token.
//!
//! Computes where a token ends up after a legal move. Capture resolution
//! is separate (see `capture`) because it reads and writes other colors'
//! tokens.

use serde::{Deserialize, Serialize};

use crate::board::Topology;
use crate::core::{Color, ConfigError, RuleConfig, RulesError, Token};

use super::movable::is_movable;

/// Where a moved token came to rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landing {
    /// Left home onto the color's entry cell. Never captures.
    Entry { cell: u16 },
    /// Shared path cell. Captures when `safe` is false.
    Track { cell: u16, safe: bool },
    /// Private home stretch cell (0-based). Never captures.
    Stretch { index: u16 },
    /// Terminal slot.
    Finished,
}

impl Landing {
    /// The absolute cell to run capture resolution on, if any.
    #[must_use]
    pub fn capture_cell(&self) -> Option<u16> {
        match *self {
            Landing::Track { cell, safe: false } => Some(cell),
            _ => None,
        }
    }
}

/// A token after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advance {
    /// Updated copy of the token.
    pub token: Token,
    /// Where it landed.
    pub landing: Landing,
}

/// Move a token `steps` cells.
///
/// Returns an updated copy; the input is left untouched. Fails with
/// `TokenNotMovable` if the roll cannot be used by this token.
pub fn advance_token(
    config: &RuleConfig,
    topology: &Topology,
    color: Color,
    token: &Token,
    steps: u8,
) -> Result<Advance, RulesError> {
    if !is_movable(config, token, steps) {
        return Err(RulesError::TokenNotMovable {
            token: token.id,
            roll: steps,
        });
    }

    let mut moved = *token;

    if token.is_home() {
        moved.relative_position = 0;
        return Ok(Advance {
            token: moved,
            landing: Landing::Entry {
                cell: topology.entry_offset(color),
            },
        });
    }

    let board_too_large = || ConfigError::BoardTooLarge {
        path_length: topology.path_length(),
        stretch_length: topology.stretch_length(),
    };
    let terminal = i16::try_from(topology.terminal()).map_err(|_| board_too_large())?;
    // Clamp overshoot to the terminal; Exact has already rejected it
    let target = token
        .relative_position
        .saturating_add(i16::from(steps))
        .min(terminal);
    let rel = u16::try_from(target).map_err(|_| board_too_large())?;

    moved.relative_position = target;
    let landing = if rel < topology.path_length() {
        let cell = topology
            .absolute_cell(color, target)
            .ok_or_else(board_too_large)?;
        Landing::Track {
            cell,
            safe: topology.is_safe(cell),
        }
    } else if target < terminal {
        Landing::Stretch {
            index: rel - topology.path_length(),
        }
    } else {
        moved.finished = true;
        Landing::Finished
    };

    Ok(Advance {
        token: moved,
        landing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FinishPolicy;

    fn setup() -> (RuleConfig, Topology) {
        let config = RuleConfig::default();
        let topology = Topology::new(&config);
        (config, topology)
    }

    fn at(relative_position: i16) -> Token {
        Token {
            id: 0,
            relative_position,
            finished: false,
        }
    }

    #[test]
    fn test_exit_home() {
        let (config, topology) = setup();
        let advance = advance_token(&config, &topology, Color::Red, &Token::at_home(1), 6).unwrap();

        assert_eq!(advance.token.relative_position, 0);
        assert_eq!(advance.token.id, 1);
        assert_eq!(advance.landing, Landing::Entry { cell: 13 });
        assert_eq!(advance.landing.capture_cell(), None);
    }

    #[test]
    fn test_exit_home_needs_six() {
        let (config, topology) = setup();
        let err = advance_token(&config, &topology, Color::Red, &Token::at_home(0), 5).unwrap_err();
        assert!(matches!(err, RulesError::TokenNotMovable { token: 0, roll: 5 }));
    }

    #[test]
    fn test_track_move() {
        let (config, topology) = setup();
        let advance = advance_token(&config, &topology, Color::Blue, &at(0), 4).unwrap();

        assert_eq!(advance.token.relative_position, 4);
        assert_eq!(advance.landing, Landing::Track { cell: 4, safe: false });
        assert_eq!(advance.landing.capture_cell(), Some(4));
    }

    #[test]
    fn test_track_move_onto_star() {
        let (config, topology) = setup();
        let advance = advance_token(&config, &topology, Color::Blue, &at(3), 5).unwrap();

        assert_eq!(advance.landing, Landing::Track { cell: 8, safe: true });
        assert_eq!(advance.landing.capture_cell(), None);
    }

    #[test]
    fn test_track_wraps_around_board() {
        let (config, topology) = setup();
        let advance = advance_token(&config, &topology, Color::Yellow, &at(10), 5).unwrap();

        assert_eq!(advance.token.relative_position, 15);
        assert_eq!(advance.landing, Landing::Track { cell: 2, safe: false });
    }

    #[test]
    fn test_enter_stretch() {
        let (config, topology) = setup();
        let advance = advance_token(&config, &topology, Color::Blue, &at(50), 4).unwrap();

        assert_eq!(advance.token.relative_position, 54);
        assert!(!advance.token.finished);
        assert_eq!(advance.landing, Landing::Stretch { index: 2 });
    }

    #[test]
    fn test_exact_finish() {
        let (config, topology) = setup();
        let advance = advance_token(&config, &topology, Color::Green, &at(55), 3).unwrap();

        assert_eq!(advance.token.relative_position, 58);
        assert!(advance.token.finished);
        assert_eq!(advance.landing, Landing::Finished);
    }

    #[test]
    fn test_overshoot_rejected() {
        let (config, topology) = setup();
        assert!(advance_token(&config, &topology, Color::Green, &at(56), 3).is_err());
    }

    #[test]
    fn test_clamp_finish() {
        let config = RuleConfig::default().with_finish_policy(FinishPolicy::Clamp);
        let topology = Topology::new(&config);
        let advance = advance_token(&config, &topology, Color::Green, &at(56), 6).unwrap();

        assert_eq!(advance.token.relative_position, 58);
        assert!(advance.token.finished);
    }

    #[test]
    fn test_largest_board_reaches_terminal() {
        let config = RuleConfig::default().with_board(32_760, 7);
        let topology = Topology::new(&config);

        let advance = advance_token(&config, &topology, Color::Yellow, &at(32_758), 5).unwrap();
        assert_eq!(advance.token.relative_position, 32_763);
        assert_eq!(advance.landing, Landing::Stretch { index: 3 });

        let advance = advance_token(&config, &topology, Color::Yellow, &at(32_763), 4).unwrap();
        assert_eq!(advance.token.relative_position, 32_767);
        assert!(advance.token.finished);
    }

    #[test]
    fn test_input_untouched() {
        let (config, topology) = setup();
        let token = at(10);
        let _ = advance_token(&config, &topology, Color::Blue, &token, 2).unwrap();
        assert_eq!(token.relative_position, 10);
    }
}
