//! Stateful match facade.
//!
//! `LudoMatch` owns the dice and the current `MatchState` and commits each
//! accepted transition from `LudoRules`. `MatchBuilder` seats the roster.
//! A match can be rebuilt from its history (`replay`) or resumed from a
//! state and dice checkpoint (`restore`).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Action, ActionRecord, Color, ColorTokens, DiceRng, DiceRngState, MatchState, RuleConfig,
    RulesError, TimingConfig,
};
use crate::rules::{MatchResult, MovableSet, MoveOutcome, RulesEngine, TurnEvent, TurnPhase};

use super::rules::LudoRules;

/// Result of a dice roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Face shown (1..=dice_faces).
    pub face: u8,
    /// Tokens that may use it.
    pub movable: MovableSet,
}

/// One live match: rules, current state and dice.
///
/// Wraps the pure `LudoRules` with the four caller-facing operations
/// (`initialize_match`, `roll_dice`, `move_token`, `advance_turn`).
/// Every operation either commits a new state or returns an error and
/// leaves the match as it was.
#[derive(Clone, Debug)]
pub struct LudoMatch {
    rules: LudoRules,
    state: MatchState,
    dice: DiceRng,
    timing: TimingConfig,
}

/// Builder for creating a LudoMatch.
pub struct MatchBuilder {
    config: RuleConfig,
    player_count: usize,
    colors: Option<Vec<Color>>,
    timing: TimingConfig,
}

impl Default for MatchBuilder {
    fn default() -> Self {
        Self {
            config: RuleConfig::default(),
            player_count: 2,
            colors: None,
            timing: TimingConfig::default(),
        }
    }
}

impl MatchBuilder {
    /// Two players on the canonical rules with default timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat the default roster for this many players (2-4).
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Seat an explicit roster, in rotation order.
    pub fn colors(mut self, colors: impl Into<Vec<Color>>) -> Self {
        self.colors = Some(colors.into());
        self
    }

    /// Use a rule variant instead of the canonical rules.
    pub fn rules(mut self, config: RuleConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the cosmetic delays reported by `pending_delay`.
    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Build the match with a dice seed.
    pub fn build(self, seed: u64) -> Result<LudoMatch, RulesError> {
        let roster = match self.colors {
            Some(colors) => colors,
            None => Color::default_roster(self.player_count).ok_or_else(|| {
                RulesError::InvalidRoster(format!(
                    "player count must be 2-4, got {}",
                    self.player_count
                ))
            })?,
        };
        let mut game = LudoMatch::initialize_match(self.config, &roster, seed)?;
        game.set_timing(self.timing);
        Ok(game)
    }
}

impl LudoMatch {
    /// Start a match with all tokens at home.
    pub fn initialize_match(
        config: RuleConfig,
        active_colors: &[Color],
        seed: u64,
    ) -> Result<Self, RulesError> {
        let rules = LudoRules::new(config)?;
        let state = rules.initialize_match(active_colors)?;
        debug!(roster = ?active_colors, seed, "match initialized");

        Ok(Self {
            rules,
            state,
            dice: DiceRng::new(seed),
            timing: TimingConfig::default(),
        })
    }

    /// Rebuild a match by replaying recorded actions.
    ///
    /// Rolls replay their recorded faces, so the dice seed is irrelevant.
    pub fn replay<'a>(
        config: RuleConfig,
        active_colors: &[Color],
        history: impl IntoIterator<Item = &'a ActionRecord>,
    ) -> Result<Self, RulesError> {
        let mut game = Self::initialize_match(config, active_colors, 0)?;
        for record in history {
            game.apply(record.color, &record.action)?;
        }
        Ok(game)
    }

    /// Resume a checkpointed match.
    ///
    /// `state` and `dice` are what `state()` and `dice_state()` returned;
    /// the resumed match throws the same dice the original would have.
    pub fn restore(
        config: RuleConfig,
        state: MatchState,
        dice: &DiceRngState,
    ) -> Result<Self, RulesError> {
        let rules = LudoRules::new(config)?;
        debug!(turn = state.turn_number, seed = dice.seed, "match restored");

        Ok(Self {
            rules,
            state,
            dice: DiceRng::from_state(dice),
            timing: TimingConfig::default(),
        })
    }

    /// Replace the cosmetic timing.
    pub fn set_timing(&mut self, timing: TimingConfig) {
        self.timing = timing;
    }

    // === Accessors ===

    /// Get the rules.
    #[must_use]
    pub fn rules(&self) -> &LudoRules {
        &self.rules
    }

    /// Get the current state.
    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Get the rule configuration.
    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        self.rules.config()
    }

    /// Get the cosmetic timing.
    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// The color on turn, `None` once the match is over.
    #[must_use]
    pub fn current_color(&self) -> Option<Color> {
        self.state.current_color()
    }

    /// Current turn phase.
    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.state.phase
    }

    /// Tokens the color on turn may move with the current roll.
    #[must_use]
    pub fn movable_tokens(&self) -> &[u8] {
        self.state.phase.movable()
    }

    /// A color's tokens.
    #[must_use]
    pub fn tokens(&self, color: Color) -> &ColorTokens {
        self.state.tokens_of(color)
    }

    /// The match result, once decided.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.rules.is_terminal(&self.state)
    }

    /// Check if the match has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Dice checkpoint.
    #[must_use]
    pub fn dice_state(&self) -> DiceRngState {
        self.dice.state()
    }

    /// Delay to wait before calling `resolve_forced`, if the current phase
    /// resolves without player input.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        self.state.phase.cosmetic_delay(&self.timing)
    }

    // === Operations ===

    /// Apply any action and commit the resulting state.
    pub fn apply(&mut self, color: Color, action: &Action) -> Result<TurnEvent, RulesError> {
        let transition = self.rules.apply_action(&self.state, color, action)?;
        self.state = transition.state;
        Ok(transition.event)
    }

    /// Roll the match dice for the color on turn.
    pub fn roll_dice(&mut self, color: Color) -> Result<RollOutcome, RulesError> {
        // Only advance the dice if the roll is accepted
        let mut dice = self.dice.clone();
        let face = dice.roll(self.config().dice_faces);
        let outcome = self.roll_dice_with(color, face)?;
        self.dice = dice;
        Ok(outcome)
    }

    /// Apply a roll whose face was decided elsewhere (a relayed roll, a test).
    pub fn roll_dice_with(&mut self, color: Color, face: u8) -> Result<RollOutcome, RulesError> {
        match self.apply(color, &Action::Roll { face })? {
            TurnEvent::Rolled { face, movable } => Ok(RollOutcome { face, movable }),
            _ => unreachable!("roll always yields a Rolled event"),
        }
    }

    /// Move one of the movable tokens by the current roll.
    pub fn move_token(&mut self, color: Color, token: u8, steps: u8) -> Result<MoveOutcome, RulesError> {
        match self.apply(color, &Action::Move { token, steps })? {
            TurnEvent::Moved(outcome) => Ok(outcome),
            _ => unreachable!("move always yields a Moved event"),
        }
    }

    /// Give up a turn that has no legal move.
    pub fn pass_turn(&mut self, color: Color) -> Result<(), RulesError> {
        self.apply(color, &Action::Pass).map(|_| ())
    }

    /// Leave a resolved turn and return the color now on turn.
    ///
    /// `extra_turn` must agree with what the move earned.
    pub fn advance_turn(&mut self, extra_turn: bool) -> Result<Color, RulesError> {
        let color = self.current_color().ok_or(RulesError::MatchOver)?;
        match self.apply(color, &Action::Advance { extra_turn })? {
            TurnEvent::Advanced { next, .. } => Ok(next),
            _ => unreachable!("advance always yields an Advanced event"),
        }
    }

    /// Advance a resolved turn using whatever extra turn the move earned.
    pub fn finish_turn(&mut self) -> Result<Color, RulesError> {
        match self.state.phase {
            TurnPhase::TurnResolved { extra_turn, .. } => self.advance_turn(extra_turn),
            ref phase => Err(RulesError::WrongPhase {
                operation: "finish the turn",
                phase: phase.name(),
            }),
        }
    }

    /// Resolve a phase that needs no player decision.
    ///
    /// Passes a turn with no legal move, or applies the only legal move.
    /// Returns `None` when the phase waits for input.
    pub fn resolve_forced(&mut self) -> Result<Option<TurnEvent>, RulesError> {
        let Some(color) = self.current_color() else {
            return Ok(None);
        };
        let action = match self.state.phase {
            TurnPhase::RolledNoMoves { .. } => Action::Pass,
            TurnPhase::RolledSingleMove { roll, token } => Action::move_token(token, roll),
            _ => return Ok(None),
        };
        self.apply(color, &action).map(Some)
    }

    /// Play one full roll-turn for the color on turn.
    ///
    /// `choose` picks among the movable tokens when there is more than one.
    /// Returns the events in order, ending with the turn advance (or the
    /// move that ended the match).
    pub fn play_turn(&mut self, mut choose: impl FnMut(&[u8]) -> u8) -> Result<Vec<TurnEvent>, RulesError> {
        let color = self.current_color().ok_or(RulesError::MatchOver)?;
        let mut events = Vec::with_capacity(3);

        let roll = self.roll_dice(color)?;
        events.push(TurnEvent::Rolled {
            face: roll.face,
            movable: roll.movable.clone(),
        });

        match self.resolve_forced()? {
            Some(event) => events.push(event),
            None => {
                let token = choose(roll.movable.as_slice());
                events.push(TurnEvent::Moved(self.move_token(color, token, roll.face)?));
            }
        }

        if let TurnPhase::TurnResolved { extra_turn, .. } = self.state.phase {
            events.push(self.apply(color, &Action::Advance { extra_turn })?);
        }
        Ok(events)
    }
}
