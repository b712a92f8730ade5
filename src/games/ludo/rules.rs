//! Ludo rule set.

use tracing::debug;

use crate::board::Topology;
use crate::core::{
    Action, Color, MatchState, RuleConfig, RulesError, WinMode, BONUS_FACE, TOKENS_PER_COLOR,
};
use crate::rules::{
    advance_token, check_and_capture, compute_movable, retire_color, rotate, Captures,
    MatchResult, MoveOutcome, RulesEngine, Transition, TurnEvent, TurnPhase,
};

/// Pure Ludo rules for one `RuleConfig`.
///
/// Holds no match state; every operation reads a `MatchState` and returns
/// a new one. Share one `LudoRules` across any number of matches.
#[derive(Clone, Debug)]
pub struct LudoRules {
    config: RuleConfig,
    topology: Topology,
}

impl LudoRules {
    /// Validate a configuration and derive the board.
    pub fn new(config: RuleConfig) -> Result<Self, RulesError> {
        config.validate()?;
        let topology = Topology::new(&config);
        Ok(Self { config, topology })
    }

    /// Get the board topology.
    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Create the opening state: every token home, first roster color on turn.
    pub fn initialize_match(&self, active_colors: &[Color]) -> Result<MatchState, RulesError> {
        MatchState::new(active_colors)
    }

    fn check_turn(state: &MatchState, color: Color) -> Result<(), RulesError> {
        match state.current_color() {
            None => Err(RulesError::MatchOver),
            Some(expected) if expected != color => Err(RulesError::NotYourTurn { expected, got: color }),
            Some(_) => Ok(()),
        }
    }

    fn wrong_phase(operation: &'static str, phase: &TurnPhase) -> RulesError {
        RulesError::WrongPhase {
            operation,
            phase: phase.name(),
        }
    }

    fn roll(&self, state: &MatchState, color: Color, face: u8) -> Result<Transition, RulesError> {
        if state.phase != TurnPhase::AwaitingRoll {
            return Err(Self::wrong_phase("roll", &state.phase));
        }
        if face == 0 || face > self.config.dice_faces {
            return Err(RulesError::InvalidDiceFace(face));
        }

        let movable = compute_movable(&self.config, state.tokens_of(color), face);
        debug!(%color, face, movable = ?movable.as_slice(), "rolled");

        let mut next = state.clone();
        next.record_action(color, Action::Roll { face });
        next.phase = TurnPhase::after_roll(face, movable.clone());

        Ok(Transition {
            state: next,
            event: TurnEvent::Rolled { face, movable },
        })
    }

    fn move_token(
        &self,
        state: &MatchState,
        color: Color,
        token: u8,
        steps: u8,
    ) -> Result<Transition, RulesError> {
        let roll = match state.phase {
            TurnPhase::RolledSingleMove { roll, .. } | TurnPhase::RolledMultiMove { roll, .. } => roll,
            ref phase => return Err(Self::wrong_phase("move a token", phase)),
        };
        if usize::from(token) >= TOKENS_PER_COLOR {
            return Err(RulesError::InvalidToken(token));
        }
        if steps != roll {
            return Err(RulesError::StaleRoll {
                expected: roll,
                got: steps,
            });
        }
        if !state.phase.movable().contains(&token) {
            return Err(RulesError::TokenNotMovable { token, roll });
        }

        let mut next = state.clone();
        let before = next.tokens[color][usize::from(token)];
        let advance = advance_token(&self.config, &self.topology, color, &before, steps)?;
        next.tokens[color][usize::from(token)] = advance.token;

        let captured = match advance.landing.capture_cell() {
            Some(cell) => check_and_capture(&self.topology, &mut next.tokens, color, cell),
            None => Captures::new(),
        };
        for capture in &captured {
            debug!(%color, victim = %capture.color, token = capture.token, "captured");
        }

        next.record_action(color, Action::Move { token, steps });

        let token_finished = advance.token.finished;
        let all_finished = next.all_finished(color);
        let mut extra_turn = false;

        if all_finished {
            if !retire_color(&mut next, color, self.config.win_mode) {
                next.phase = TurnPhase::TurnResolved {
                    extra_turn: false,
                    retired: true,
                };
            }
        } else {
            extra_turn = self.config.extra_turn.grants(
                steps == BONUS_FACE,
                !captured.is_empty(),
                token_finished,
            );
            next.phase = TurnPhase::TurnResolved {
                extra_turn,
                retired: false,
            };
        }

        debug!(
            %color,
            token,
            from = before.relative_position,
            to = advance.token.relative_position,
            extra_turn,
            "moved"
        );

        Ok(Transition {
            state: next,
            event: TurnEvent::Moved(MoveOutcome {
                token,
                from: before.relative_position,
                to: advance.token.relative_position,
                captured,
                token_finished,
                all_finished,
                extra_turn,
            }),
        })
    }

    fn pass(&self, state: &MatchState, color: Color) -> Result<Transition, RulesError> {
        if !matches!(state.phase, TurnPhase::RolledNoMoves { .. }) {
            return Err(Self::wrong_phase("pass", &state.phase));
        }

        let mut next = state.clone();
        next.record_action(color, Action::Pass);
        next.phase = TurnPhase::TurnResolved {
            extra_turn: false,
            retired: false,
        };
        debug!(%color, "passed");

        Ok(Transition {
            state: next,
            event: TurnEvent::Passed,
        })
    }

    fn advance(&self, state: &MatchState, color: Color, claimed: bool) -> Result<Transition, RulesError> {
        let TurnPhase::TurnResolved { extra_turn, retired } = state.phase else {
            return Err(Self::wrong_phase("advance the turn", &state.phase));
        };
        if claimed != extra_turn {
            return Err(RulesError::ExtraTurnMismatch {
                claimed,
                earned: extra_turn,
            });
        }

        let mut next = state.clone();
        next.record_action(color, Action::Advance { extra_turn });
        let next_color = rotate(&mut next, extra_turn, retired);

        Ok(Transition {
            state: next,
            event: TurnEvent::Advanced {
                next: next_color,
                extra_turn,
            },
        })
    }
}

impl RulesEngine for LudoRules {
    fn config(&self) -> &RuleConfig {
        &self.config
    }

    fn legal_actions(&self, state: &MatchState, color: Color) -> Vec<Action> {
        if state.current_color() != Some(color) {
            return vec![];
        }

        match &state.phase {
            TurnPhase::AwaitingRoll => (1..=self.config.dice_faces)
                .map(|face| Action::Roll { face })
                .collect(),
            TurnPhase::RolledNoMoves { .. } => vec![Action::Pass],
            TurnPhase::RolledSingleMove { roll, .. } | TurnPhase::RolledMultiMove { roll, .. } => state
                .phase
                .movable()
                .iter()
                .map(|&token| Action::move_token(token, *roll))
                .collect(),
            TurnPhase::TurnResolved { extra_turn, .. } => vec![Action::Advance {
                extra_turn: *extra_turn,
            }],
            TurnPhase::MatchOver => vec![],
        }
    }

    fn apply_action(
        &self,
        state: &MatchState,
        color: Color,
        action: &Action,
    ) -> Result<Transition, RulesError> {
        Self::check_turn(state, color)?;

        match *action {
            Action::Roll { face } => self.roll(state, color, face),
            Action::Move { token, steps } => self.move_token(state, color, token, steps),
            Action::Pass => self.pass(state, color),
            Action::Advance { extra_turn } => self.advance(state, color, extra_turn),
        }
    }

    fn is_terminal(&self, state: &MatchState) -> Option<MatchResult> {
        if !state.is_over() {
            return None;
        }
        match self.config.win_mode {
            WinMode::FirstFinisher => state.ranking.first().copied().map(MatchResult::Winner),
            WinMode::Ranking => Some(MatchResult::Ranked(state.ranking.clone())),
        }
    }
}
