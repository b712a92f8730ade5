//! Number recall tiles.
//!
//! Nine face-down tiles hide the numbers 1-9. Players take turns turning
//! tiles in the required order. A correct tile stays revealed; a wrong one
//! hides every tile again and passes the turn. Whoever reveals all nine in
//! one run wins.
//!
//! Easy keeps a revealed number visible for a moment, medium hides it at
//! once, and hard also shuffles the required order.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{DiceRng, MemoryGameError};

use super::Difficulty;

/// Tiles on the board.
pub const TILE_COUNT: u8 = 9;

/// Seat limits.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

const NUMBERS: [u8; TILE_COUNT as usize] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The tile held the expected number and stays revealed.
    Correct { number: u8 },
    /// The ninth number was found.
    Completed { winner: usize },
    /// Wrong tile. The board is hidden again for the next player.
    Wrong { number: u8, next_player: usize },
}

/// A number recall game for two to four players.
#[derive(Clone, Debug)]
pub struct NumberRecall {
    difficulty: Difficulty,
    players: usize,
    current: usize,
    /// Number under each grid index.
    tile_positions: [u8; TILE_COUNT as usize],
    /// Order the numbers must be found in.
    required: [u8; TILE_COUNT as usize],
    expected: usize,
    revealed: SmallVec<[u8; TILE_COUNT as usize]>,
    winner: Option<usize>,
    rng: DiceRng,
}

impl NumberRecall {
    /// Deal a new board.
    pub fn new(difficulty: Difficulty, players: usize, seed: u64) -> Result<Self, MemoryGameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(MemoryGameError::InvalidPlayerCount {
                count: players,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }

        let mut game = Self {
            difficulty,
            players,
            current: 0,
            tile_positions: NUMBERS,
            required: NUMBERS,
            expected: 0,
            revealed: SmallVec::new(),
            winner: None,
            rng: DiceRng::new(seed),
        };
        game.deal();
        Ok(game)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn players(&self) -> usize {
        self.players
    }

    #[must_use]
    pub fn current_player(&self) -> usize {
        self.current
    }

    /// Number under each grid index.
    #[must_use]
    pub fn tile_positions(&self) -> &[u8] {
        &self.tile_positions
    }

    /// Order the numbers must be found in.
    #[must_use]
    pub fn required_sequence(&self) -> &[u8] {
        &self.required
    }

    /// Next number to find, `None` once the game is won.
    #[must_use]
    pub fn expected_number(&self) -> Option<u8> {
        self.required.get(self.expected).copied()
    }

    /// Grid indices revealed in the current run, in click order.
    #[must_use]
    pub fn revealed(&self) -> &[u8] {
        &self.revealed
    }

    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// How long a correctly found number stays visible.
    #[must_use]
    pub fn reveal_duration(&self) -> Duration {
        match self.difficulty {
            Difficulty::Easy => Duration::from_millis(800),
            Difficulty::Medium | Difficulty::Hard => Duration::ZERO,
        }
    }

    /// Turn over the tile at `grid_index`.
    ///
    /// A tile already revealed in this run no longer holds the expected
    /// number, so clicking it again is a mistake.
    pub fn click(&mut self, player: usize, grid_index: u8) -> Result<ClickOutcome, MemoryGameError> {
        if self.is_over() {
            return Err(MemoryGameError::GameOver);
        }
        if player != self.current {
            return Err(MemoryGameError::NotYourTurn {
                expected: self.current,
                got: player,
            });
        }
        let number = *self
            .tile_positions
            .get(usize::from(grid_index))
            .ok_or(MemoryGameError::TileOutOfRange {
                tile: grid_index,
                tiles: TILE_COUNT,
            })?;

        if self.expected_number() == Some(number) {
            self.revealed.push(grid_index);
            self.expected += 1;
            if self.expected < self.required.len() {
                return Ok(ClickOutcome::Correct { number });
            }
            self.winner = Some(self.current);
            debug!(winner = self.current, "all numbers found");
            return Ok(ClickOutcome::Completed { winner: self.current });
        }

        self.current = (self.current + 1) % self.players;
        self.revealed.clear();
        self.expected = 0;
        debug!(number, next = self.current, "wrong tile, board hidden");
        Ok(ClickOutcome::Wrong {
            number,
            next_player: self.current,
        })
    }

    /// Deal a new board and hand the turn to player 0.
    pub fn restart(&mut self) {
        self.current = 0;
        self.expected = 0;
        self.revealed.clear();
        self.winner = None;
        self.deal();
    }

    fn deal(&mut self) {
        self.tile_positions = NUMBERS;
        self.rng.shuffle(&mut self.tile_positions);
        self.required = NUMBERS;
        if self.difficulty == Difficulty::Hard {
            self.rng.shuffle(&mut self.required);
        }
    }
}
