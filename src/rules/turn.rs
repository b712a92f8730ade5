//! Turn controller.
//!
//! Each turn walks through a small state machine:
//!
//! ```text
//! AwaitingRoll --roll--> RolledNoMoves     --pass------> TurnResolved
//!                        RolledSingleMove  --auto-move-> TurnResolved
//!                        RolledMultiMove   --choice----> TurnResolved
//! TurnResolved --advance--> AwaitingRoll (same color on an extra turn)
//! ```
//!
//! Win and ranking checks run right after a move, before the extra-turn
//! decision. A color that finishes all its tokens leaves the rotation when
//! its turn is advanced.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{Color, MatchState, TimingConfig, WinMode};

use super::movable::MovableSet;

/// Where the color on turn is in its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for the die.
    AwaitingRoll,
    /// Rolled, but no token can use the roll. The turn is passed.
    RolledNoMoves { roll: u8 },
    /// Exactly one token can move. It is moved without asking.
    RolledSingleMove { roll: u8, token: u8 },
    /// Several tokens can move. The player picks one.
    RolledMultiMove { roll: u8, movable: MovableSet },
    /// The move (or pass) is done; waiting for the turn to advance.
    TurnResolved {
        /// The same color rolls again.
        extra_turn: bool,
        /// The color finished all tokens and leaves the rotation.
        retired: bool,
    },
    /// No more turns.
    MatchOver,
}

impl TurnPhase {
    /// Classify a roll by the size of its movable set.
    #[must_use]
    pub fn after_roll(roll: u8, movable: MovableSet) -> Self {
        match movable.len() {
            0 => TurnPhase::RolledNoMoves { roll },
            1 => TurnPhase::RolledSingleMove { roll, token: movable[0] },
            _ => TurnPhase::RolledMultiMove { roll, movable },
        }
    }

    /// Short name for error messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingRoll => "awaiting roll",
            TurnPhase::RolledNoMoves { .. } => "rolled with no moves",
            TurnPhase::RolledSingleMove { .. } => "rolled with a single move",
            TurnPhase::RolledMultiMove { .. } => "rolled with a choice of moves",
            TurnPhase::TurnResolved { .. } => "turn resolved",
            TurnPhase::MatchOver => "match over",
        }
    }

    /// The current roll, if the die has been thrown this turn.
    #[must_use]
    pub fn roll(&self) -> Option<u8> {
        match *self {
            TurnPhase::RolledNoMoves { roll }
            | TurnPhase::RolledSingleMove { roll, .. }
            | TurnPhase::RolledMultiMove { roll, .. } => Some(roll),
            _ => None,
        }
    }

    /// Tokens that may move on the current roll.
    #[must_use]
    pub fn movable(&self) -> &[u8] {
        match self {
            TurnPhase::RolledSingleMove { token, .. } => std::slice::from_ref(token),
            TurnPhase::RolledMultiMove { movable, .. } => movable.as_slice(),
            _ => &[],
        }
    }

    /// Delay a caller should wait before the engine resolves this phase on
    /// its own. `None` when the phase waits for input instead.
    #[must_use]
    pub fn cosmetic_delay(&self, timing: &TimingConfig) -> Option<Duration> {
        match self {
            TurnPhase::RolledNoMoves { .. } => Some(timing.auto_pass),
            TurnPhase::RolledSingleMove { .. } => Some(timing.auto_move),
            _ => None,
        }
    }
}

/// Seat index after the current turn.
///
/// ```
/// use ludo_engine::rules::next_turn_index;
///
/// assert_eq!(next_turn_index(1, 3, false), 2);
/// assert_eq!(next_turn_index(2, 3, false), 0);
/// assert_eq!(next_turn_index(2, 3, true), 2);
/// ```
#[must_use]
pub fn next_turn_index(current: usize, active_count: usize, extra_turn: bool) -> usize {
    if extra_turn {
        current
    } else {
        (current + 1) % active_count
    }
}

/// Record that `color` has finished all its tokens.
///
/// Sets `MatchOver` when the win mode says the match is decided: at once
/// under `FirstFinisher`, or when a single unranked color remains under
/// `Ranking` (that color is ranked last). Returns true if the match ended.
pub fn retire_color(state: &mut MatchState, color: Color, win_mode: WinMode) -> bool {
    if !state.ranking.contains(&color) {
        state.ranking.push(color);
    }
    info!(%color, place = state.ranking.len(), "color finished all tokens");

    let remaining: Vec<Color> = state
        .active
        .iter()
        .copied()
        .filter(|c| !state.ranking.contains(c))
        .collect();

    let over = match win_mode {
        WinMode::FirstFinisher => true,
        WinMode::Ranking => remaining.len() <= 1,
    };

    if over {
        if win_mode == WinMode::Ranking {
            state.ranking.extend(remaining);
        }
        state.phase = TurnPhase::MatchOver;
        info!(ranking = ?state.ranking, "match over");
    }
    over
}

/// Move the turn pointer on from a resolved turn.
///
/// A retired color is removed from the rotation; the seat after it slides
/// into its index. Returns the color now on turn.
pub fn rotate(state: &mut MatchState, extra_turn: bool, retired: bool) -> Color {
    if retired {
        state.active.remove(state.turn);
        if state.turn >= state.active.len() {
            state.turn = 0;
        }
    } else {
        state.turn = next_turn_index(state.turn, state.active.len(), extra_turn);
    }
    state.phase = TurnPhase::AwaitingRoll;
    state.advance_turn_counter();
    state.active[state.turn]
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_after_roll_classification() {
        assert_eq!(
            TurnPhase::after_roll(3, MovableSet::new()),
            TurnPhase::RolledNoMoves { roll: 3 }
        );
        assert_eq!(
            TurnPhase::after_roll(6, smallvec![2]),
            TurnPhase::RolledSingleMove { roll: 6, token: 2 }
        );

        let phase = TurnPhase::after_roll(6, smallvec![0, 3]);
        assert_eq!(phase.movable(), &[0, 3]);
        assert_eq!(phase.roll(), Some(6));
    }

    #[test]
    fn test_phase_accessors() {
        assert_eq!(TurnPhase::AwaitingRoll.roll(), None);
        assert!(TurnPhase::RolledNoMoves { roll: 2 }.movable().is_empty());
        assert_eq!(TurnPhase::RolledSingleMove { roll: 4, token: 1 }.movable(), &[1]);
        assert_eq!(TurnPhase::MatchOver.name(), "match over");
    }

    #[test]
    fn test_cosmetic_delays() {
        let timing = TimingConfig::default();
        assert_eq!(
            TurnPhase::RolledNoMoves { roll: 1 }.cosmetic_delay(&timing),
            Some(timing.auto_pass)
        );
        assert_eq!(
            TurnPhase::RolledSingleMove { roll: 1, token: 0 }.cosmetic_delay(&timing),
            Some(timing.auto_move)
        );
        assert_eq!(TurnPhase::AwaitingRoll.cosmetic_delay(&timing), None);
    }

    #[test]
    fn test_rotate_wraps() {
        let mut state = MatchState::new(&[Color::Blue, Color::Red, Color::Green]).unwrap();
        state.turn = 2;

        assert_eq!(rotate(&mut state, false, false), Color::Blue);
        assert_eq!(state.turn_number, 2);
        assert_eq!(rotate(&mut state, true, false), Color::Blue);
        assert_eq!(rotate(&mut state, false, false), Color::Red);
    }

    #[test]
    fn test_rotate_removes_retired() {
        let mut state = MatchState::new(&Color::ALL).unwrap();
        state.turn = 1;

        let next = rotate(&mut state, false, true);
        assert_eq!(next, Color::Green);
        assert_eq!(state.active, vec![Color::Blue, Color::Green, Color::Yellow]);

        // Retiring the last seat wraps to the first
        state.turn = 2;
        assert_eq!(rotate(&mut state, false, true), Color::Blue);
    }

    #[test]
    fn test_retire_ranking() {
        let mut state = MatchState::new(&[Color::Blue, Color::Red, Color::Green]).unwrap();

        assert!(!retire_color(&mut state, Color::Red, WinMode::Ranking));
        assert_eq!(state.ranking, vec![Color::Red]);

        state.active.retain(|&c| c != Color::Red);
        assert!(retire_color(&mut state, Color::Green, WinMode::Ranking));
        assert_eq!(state.ranking, vec![Color::Red, Color::Green, Color::Blue]);
        assert!(state.is_over());
    }

    #[test]
    fn test_retire_first_finisher() {
        let mut state = MatchState::new(&Color::ALL).unwrap();

        assert!(retire_color(&mut state, Color::Yellow, WinMode::FirstFinisher));
        assert_eq!(state.ranking, vec![Color::Yellow]);
        assert_eq!(state.phase, TurnPhase::MatchOver);
    }
}
