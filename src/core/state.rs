//! Match state.
//!
//! ## Token
//!
//! One of a color's four pieces, tracked by relative position
//! (see `board::topology` for the numbering).
//!
//! ## MatchState
//!
//! Everything needed to continue a match:
//! - Seating roster and active rotation
//! - Turn pointer and turn phase
//! - Every color's tokens
//! - Ranking of colors that have finished
//! - Action history
//!
//! Engine operations take `&MatchState` and return a new state, so callers
//! can diff old against new. The history uses `im` persistent vectors so
//! these copies stay cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::color::{Color, ColorMap, PALETTE_SIZE};
use super::error::RulesError;
use crate::rules::TurnPhase;

/// Tokens owned by each color.
pub const TOKENS_PER_COLOR: usize = 4;

/// Relative position of a token at home.
pub const HOME: i16 = -1;

/// A color's four tokens, indexed by home slot.
pub type ColorTokens = [Token; TOKENS_PER_COLOR];

/// A single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Home slot (0-3).
    pub id: u8,

    /// Progress from the color's entry cell, `-1` at home.
    pub relative_position: i16,

    /// Parked in the terminal slot. Never cleared once set.
    pub finished: bool,
}

impl Token {
    /// A token waiting in home slot `id`.
    #[must_use]
    pub const fn at_home(id: u8) -> Self {
        Self {
            id,
            relative_position: HOME,
            finished: false,
        }
    }

    /// Check if the token is at home.
    #[must_use]
    pub const fn is_home(&self) -> bool {
        self.relative_position == HOME && !self.finished
    }

    /// Check if the token has left home but not finished.
    #[must_use]
    pub const fn in_transit(&self) -> bool {
        self.relative_position >= 0 && !self.finished
    }

    /// Send the token back to its home slot.
    pub fn send_home(&mut self) {
        self.relative_position = HOME;
        self.finished = false;
    }
}

/// A fresh set of four tokens, all at home.
#[must_use]
pub fn home_tokens() -> ColorTokens {
    [0, 1, 2, 3].map(Token::at_home)
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Colors seated at setup, in rotation order.
    roster: Vec<Color>,

    /// Colors still taking turns, in rotation order.
    pub active: Vec<Color>,

    /// Index into `active` of the color on turn.
    pub turn: usize,

    /// Where the color on turn is in its turn.
    pub phase: TurnPhase,

    /// Tokens per palette color. Unseated colors keep all tokens at home.
    pub tokens: ColorMap<ColorTokens>,

    /// Colors that finished all tokens, in finishing order.
    pub ranking: Vec<Color>,

    /// Turn number (starts at 1, counts every roll-turn including extra turns).
    pub turn_number: u32,

    /// Action sequence within turn.
    pub action_sequence: u32,

    /// Every accepted action.
    pub history: Vector<ActionRecord>,
}

impl MatchState {
    /// Create a match with all tokens at home and the first roster color on turn.
    ///
    /// The roster must name 2-4 distinct colors.
    pub fn new(roster: &[Color]) -> Result<Self, RulesError> {
        if !(2..=PALETTE_SIZE).contains(&roster.len()) {
            return Err(RulesError::InvalidRoster(format!(
                "expected 2-{PALETTE_SIZE} colors, got {}",
                roster.len()
            )));
        }
        for (i, color) in roster.iter().enumerate() {
            if roster[..i].contains(color) {
                return Err(RulesError::InvalidRoster(format!("{color} is seated twice")));
            }
        }

        Ok(Self {
            roster: roster.to_vec(),
            active: roster.to_vec(),
            turn: 0,
            phase: TurnPhase::AwaitingRoll,
            tokens: ColorMap::new(|_| home_tokens()),
            ranking: Vec::new(),
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
        })
    }

    /// Colors seated at setup.
    #[must_use]
    pub fn roster(&self) -> &[Color] {
        &self.roster
    }

    /// Check if a color is seated in this match.
    #[must_use]
    pub fn is_seated(&self, color: Color) -> bool {
        self.roster.contains(&color)
    }

    /// The color on turn, or `None` once the match is over.
    #[must_use]
    pub fn current_color(&self) -> Option<Color> {
        if self.is_over() {
            None
        } else {
            self.active.get(self.turn).copied()
        }
    }

    /// A color's tokens.
    #[must_use]
    pub fn tokens_of(&self, color: Color) -> &ColorTokens {
        &self.tokens[color]
    }

    /// Number of a color's tokens that have finished.
    #[must_use]
    pub fn finished_count(&self, color: Color) -> usize {
        self.tokens[color].iter().filter(|t| t.finished).count()
    }

    /// Check if all of a color's tokens have finished.
    #[must_use]
    pub fn all_finished(&self, color: Color) -> bool {
        self.finished_count(color) == TOKENS_PER_COLOR
    }

    /// Check if the match has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::MatchOver)
    }

    /// Record an action in history.
    pub fn record_action(&mut self, color: Color, action: super::action::Action) {
        let sequence = self.next_sequence();
        self.history
            .push_back(ActionRecord::new(color, action, self.turn_number, sequence));
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }

    /// Start the next roll-turn.
    pub fn advance_turn_counter(&mut self) {
        self.turn_number += 1;
        self.action_sequence = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    #[test]
    fn test_token_predicates() {
        let mut token = Token::at_home(2);
        assert!(token.is_home());
        assert!(!token.in_transit());

        token.relative_position = 10;
        assert!(!token.is_home());
        assert!(token.in_transit());

        token.send_home();
        assert!(token.is_home());
        assert_eq!(token.id, 2);
    }

    #[test]
    fn test_home_tokens() {
        let tokens = home_tokens();
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.id as usize, i);
            assert!(token.is_home());
        }
    }

    #[test]
    fn test_match_state_new() {
        let state = MatchState::new(&[Color::Blue, Color::Green]).unwrap();

        assert_eq!(state.roster(), &[Color::Blue, Color::Green]);
        assert_eq!(state.current_color(), Some(Color::Blue));
        assert_eq!(state.phase, TurnPhase::AwaitingRoll);
        assert_eq!(state.turn_number, 1);
        assert!(state.ranking.is_empty());
        assert!(state.is_seated(Color::Green));
        assert!(!state.is_seated(Color::Red));

        for color in Color::ALL {
            assert!(state.tokens_of(color).iter().all(Token::is_home));
        }
    }

    #[test]
    fn test_roster_validation() {
        assert!(matches!(
            MatchState::new(&[Color::Blue]),
            Err(RulesError::InvalidRoster(_))
        ));
        assert!(matches!(
            MatchState::new(&[Color::Blue, Color::Blue]),
            Err(RulesError::InvalidRoster(_))
        ));
        assert!(MatchState::new(&Color::ALL).is_ok());
    }

    #[test]
    fn test_finished_count() {
        let mut state = MatchState::new(&[Color::Red, Color::Yellow]).unwrap();
        for token in state.tokens[Color::Red].iter_mut().take(3) {
            token.relative_position = 58;
            token.finished = true;
        }

        assert_eq!(state.finished_count(Color::Red), 3);
        assert!(!state.all_finished(Color::Red));

        state.tokens[Color::Red][3].finished = true;
        assert!(state.all_finished(Color::Red));
    }

    #[test]
    fn test_record_action() {
        let mut state = MatchState::new(&[Color::Blue, Color::Green]).unwrap();
        state.record_action(Color::Blue, Action::Roll { face: 6 });
        state.record_action(Color::Blue, Action::move_token(0, 6));

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[1].sequence, 1);

        state.advance_turn_counter();
        state.record_action(Color::Blue, Action::Roll { face: 2 });
        assert_eq!(state.history[2].turn, 2);
        assert_eq!(state.history[2].sequence, 0);
    }

    #[test]
    fn test_state_clone_is_independent() {
        let state = MatchState::new(&[Color::Blue, Color::Green]).unwrap();
        let mut next = state.clone();
        next.tokens[Color::Blue][0].relative_position = 0;

        assert!(state.tokens_of(Color::Blue)[0].is_home());
        assert_ne!(state, next);
    }

    #[test]
    fn test_state_serialization() {
        let mut state = MatchState::new(&[Color::Blue, Color::Green]).unwrap();
        state.record_action(Color::Blue, Action::Roll { face: 4 });

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
