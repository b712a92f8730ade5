//! Dice and movability.
//!
//! Decides which of a color's tokens can use a roll. This is a pure query;
//! it never touches state.

use smallvec::SmallVec;

use crate::core::{ColorTokens, FinishPolicy, RuleConfig, Token, TOKENS_PER_COLOR};

/// Indices of the tokens that may move on the current roll.
pub type MovableSet = SmallVec<[u8; TOKENS_PER_COLOR]>;

/// Check if a single token may move `roll` steps.
///
/// - At home: only on the exit roll.
/// - In transit: only if the landing does not pass the terminal slot
///   (under `FinishPolicy::Clamp` any landing is allowed).
/// - Finished: never.
#[must_use]
pub fn is_movable(config: &RuleConfig, token: &Token, roll: u8) -> bool {
    if token.finished {
        return false;
    }
    if token.is_home() {
        return roll == config.exit_roll;
    }

    let terminal = i32::from(config.terminal());
    let position = i32::from(token.relative_position);
    if position >= terminal {
        return false;
    }
    match config.finish_policy {
        FinishPolicy::Exact => position + i32::from(roll) <= terminal,
        FinishPolicy::Clamp => true,
    }
}

/// Compute the movable set for a color's tokens.
///
/// ```
/// use ludo_engine::core::{home_tokens, RuleConfig};
/// use ludo_engine::rules::compute_movable;
///
/// let config = RuleConfig::default();
/// let tokens = home_tokens();
///
/// assert!(compute_movable(&config, &tokens, 3).is_empty());
/// assert_eq!(compute_movable(&config, &tokens, 6).as_slice(), &[0, 1, 2, 3]);
/// ```
#[must_use]
pub fn compute_movable(config: &RuleConfig, tokens: &ColorTokens, roll: u8) -> MovableSet {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| is_movable(config, token, roll))
        .map(|(i, _)| i as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::home_tokens;

    fn at(id: u8, relative_position: i16) -> Token {
        Token {
            id,
            relative_position,
            finished: false,
        }
    }

    fn finished(id: u8) -> Token {
        Token {
            id,
            relative_position: 58,
            finished: true,
        }
    }

    #[test]
    fn test_home_needs_six() {
        let config = RuleConfig::default();
        let tokens = home_tokens();

        for roll in 1..=5 {
            assert!(compute_movable(&config, &tokens, roll).is_empty());
        }
        assert_eq!(compute_movable(&config, &tokens, 6).len(), 4);
    }

    #[test]
    fn test_transit_tokens_move() {
        let config = RuleConfig::default();
        let tokens = [at(0, 0), at(1, 20), Token::at_home(2), Token::at_home(3)];

        assert_eq!(compute_movable(&config, &tokens, 3).as_slice(), &[0, 1]);
    }

    #[test]
    fn test_finished_never_moves() {
        let config = RuleConfig::default();
        let tokens = [finished(0), finished(1), finished(2), at(3, 57)];

        assert_eq!(compute_movable(&config, &tokens, 1).as_slice(), &[3]);
        assert!(compute_movable(&config, &tokens, 6).is_empty());
    }

    #[test]
    fn test_exact_rejects_overshoot() {
        let config = RuleConfig::default();
        // Stretch index 4 of 6
        let token = at(0, 56);

        assert!(is_movable(&config, &token, 1));
        assert!(is_movable(&config, &token, 2));
        assert!(!is_movable(&config, &token, 3));
    }

    #[test]
    fn test_clamp_allows_overshoot() {
        let config = RuleConfig::default().with_finish_policy(FinishPolicy::Clamp);
        let token = at(0, 56);

        assert!(is_movable(&config, &token, 6));
    }

    #[test]
    fn test_custom_exit_roll() {
        let mut config = RuleConfig::default();
        config.exit_roll = 1;
        let tokens = home_tokens();

        assert_eq!(compute_movable(&config, &tokens, 1).len(), 4);
        assert!(compute_movable(&config, &tokens, 6).is_empty());
    }
}
