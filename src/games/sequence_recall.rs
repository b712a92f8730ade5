//! Sequence recall.
//!
//! The game lights a growing sequence of tiles and the player repeats it.
//! Each completed round appends one random tile. Solo play ends at the
//! first mistake. With two players, the first plays until a mistake, then
//! the second plays a fresh sequence, and the higher score wins.
//!
//! A score is the number of rounds completed.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{DiceRng, MemoryGameError};

use super::{Difficulty, SequenceSettings};

/// Most players a sequence recall game seats.
pub const MAX_PLAYERS: usize = 2;

/// Where the game is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecallPhase {
    /// The sequence is being played back; input is closed.
    Showing,
    /// Waiting for the player on turn to repeat the sequence.
    Input,
    /// Every player has made their mistake.
    Over,
}

/// What a press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressOutcome {
    /// Right tile, more to go.
    Correct { remaining: usize },
    /// Sequence repeated. A longer one is shown next.
    RoundComplete { round: u32 },
    /// Wrong tile. `next_player` is `None` when the game ended.
    Wrong { score: u32, next_player: Option<usize> },
}

/// Final standing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecallResult {
    Winner(usize),
    Tie,
}

/// A sequence recall game for one or two players.
#[derive(Clone, Debug)]
pub struct SequenceRecall {
    difficulty: Difficulty,
    settings: SequenceSettings,
    players: usize,
    current: usize,
    sequence: Vec<u8>,
    entered: usize,
    round: u32,
    scores: SmallVec<[u32; MAX_PLAYERS]>,
    phase: RecallPhase,
    rng: DiceRng,
}

impl SequenceRecall {
    /// Start a game. The first sequence is one tile long.
    pub fn new(difficulty: Difficulty, players: usize, seed: u64) -> Result<Self, MemoryGameError> {
        if !(1..=MAX_PLAYERS).contains(&players) {
            return Err(MemoryGameError::InvalidPlayerCount {
                count: players,
                min: 1,
                max: MAX_PLAYERS,
            });
        }

        let mut game = Self {
            difficulty,
            settings: difficulty.sequence_settings(),
            players,
            current: 0,
            sequence: Vec::new(),
            entered: 0,
            round: 1,
            scores: SmallVec::from_elem(0, players),
            phase: RecallPhase::Showing,
            rng: DiceRng::new(seed),
        };
        game.extend_sequence();
        Ok(game)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn settings(&self) -> &SequenceSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> RecallPhase {
        self.phase
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The player on turn.
    #[must_use]
    pub fn current_player(&self) -> usize {
        self.current
    }

    /// Tiles to repeat, in order.
    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Tiles of the sequence already repeated this round.
    #[must_use]
    pub fn entered(&self) -> usize {
        self.entered
    }

    #[must_use]
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == RecallPhase::Over
    }

    /// Lit time per tile for the current playback.
    #[must_use]
    pub fn playback_speed(&self) -> Duration {
        self.settings.speed(self.round)
    }

    /// Playback is done; open input.
    pub fn playback_finished(&mut self) {
        if self.phase == RecallPhase::Showing {
            self.phase = RecallPhase::Input;
        }
    }

    /// Press a tile.
    pub fn press(&mut self, player: usize, tile: u8) -> Result<PressOutcome, MemoryGameError> {
        match self.phase {
            RecallPhase::Over => return Err(MemoryGameError::GameOver),
            _ if player != self.current => {
                return Err(MemoryGameError::NotYourTurn {
                    expected: self.current,
                    got: player,
                })
            }
            RecallPhase::Showing => return Err(MemoryGameError::NotAcceptingInput),
            RecallPhase::Input => {}
        }

        let tiles = self.settings.tile_count();
        if tile >= tiles {
            return Err(MemoryGameError::TileOutOfRange { tile, tiles });
        }

        if self.sequence.get(self.entered) == Some(&tile) {
            self.entered += 1;
            if self.entered < self.sequence.len() {
                return Ok(PressOutcome::Correct {
                    remaining: self.sequence.len() - self.entered,
                });
            }

            let completed = self.round;
            self.scores[self.current] = completed;
            self.round += 1;
            self.extend_sequence();
            debug!(player = self.current, round = completed, "sequence repeated");
            return Ok(PressOutcome::RoundComplete { round: completed });
        }

        let score = self.round - 1;
        self.scores[self.current] = score;
        debug!(player = self.current, score, got = tile, "wrong tile");

        if self.current + 1 < self.players {
            self.current += 1;
            self.start_fresh();
            Ok(PressOutcome::Wrong {
                score,
                next_player: Some(self.current),
            })
        } else {
            self.phase = RecallPhase::Over;
            Ok(PressOutcome::Wrong {
                score,
                next_player: None,
            })
        }
    }

    /// The winner once the game is over. A solo game always has player 0
    /// as its winner.
    #[must_use]
    pub fn result(&self) -> Option<RecallResult> {
        if !self.is_over() {
            return None;
        }
        let best = self.scores.iter().copied().max().unwrap_or(0);
        let mut leaders = self.scores.iter().enumerate().filter(|&(_, &s)| s == best);
        match (leaders.next(), leaders.next()) {
            (Some((player, _)), None) => Some(RecallResult::Winner(player)),
            _ => Some(RecallResult::Tie),
        }
    }

    /// Record a finished solo score. Two-player games never set a high
    /// score. Returns true on a new best.
    pub fn record_high_score(&self, scores: &mut HighScores) -> bool {
        self.is_over() && self.players == 1 && scores.record(self.difficulty, self.scores[0])
    }

    /// Back to round 1 for player 0 with a new sequence.
    pub fn restart(&mut self) {
        self.current = 0;
        self.scores.iter_mut().for_each(|s| *s = 0);
        self.start_fresh();
    }

    fn start_fresh(&mut self) {
        self.sequence.clear();
        self.round = 1;
        self.extend_sequence();
    }

    fn extend_sequence(&mut self) {
        let tile = self.rng.pick(usize::from(self.settings.tile_count()));
        // Index into a grid of at most 255 tiles
        self.sequence.push(tile as u8);
        self.entered = 0;
        self.phase = RecallPhase::Showing;
    }
}

/// Best solo score per difficulty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    best: FxHashMap<Difficulty, u32>,
}

impl HighScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score so far, 0 if none.
    #[must_use]
    pub fn best(&self, difficulty: Difficulty) -> u32 {
        self.best.get(&difficulty).copied().unwrap_or(0)
    }

    /// Keep `score` if it beats the best. Returns true if it did.
    pub fn record(&mut self, difficulty: Difficulty, score: u32) -> bool {
        if score <= self.best(difficulty) {
            return false;
        }
        self.best.insert(difficulty, score);
        true
    }
}
