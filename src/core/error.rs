//! Error types.
//!
//! Illegal operations are always rejected with a distinguishable error.
//! A turn with no legal move is not an error; it is reported as a
//! `TurnPhase::RolledNoMoves` outcome.

use super::color::Color;

/// Invalid rule configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Path length must be a positive multiple of four.
    #[error("path length {0} is not a positive multiple of 4")]
    PathLength(u16),

    /// Home stretch must have at least one cell.
    #[error("home stretch length must be at least 1")]
    StretchLength,

    /// Path plus stretch does not fit the token position range.
    #[error("board of {path_length} path and {stretch_length} stretch cells is too large")]
    BoardTooLarge { path_length: u16, stretch_length: u16 },

    /// A safe cell lies outside the shared path.
    #[error("safe cell {cell} is outside the {path_length}-cell path")]
    SafeCellOutOfRange { cell: u16, path_length: u16 },

    /// The die needs at least two faces.
    #[error("a die needs at least 2 faces, got {0}")]
    DiceFaces(u8),

    /// Exit roll cannot be thrown with the configured die.
    #[error("exit roll {exit_roll} is not a face of a {dice_faces}-sided die")]
    ExitRoll { exit_roll: u8, dice_faces: u8 },

    /// Configuration could not be parsed.
    #[error("invalid rule config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected engine operation.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// Operation issued by a color that is not on turn.
    #[error("{got} acted out of turn, {expected} is on turn")]
    NotYourTurn { expected: Color, got: Color },

    /// Operation not allowed in the current turn phase.
    #[error("cannot {operation} while {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// Token index outside the current movable set.
    #[error("token {token} cannot move on a roll of {roll}")]
    TokenNotMovable { token: u8, roll: u8 },

    /// Move steps do not match the most recent roll.
    #[error("move uses {got} steps but the current roll is {expected}")]
    StaleRoll { expected: u8, got: u8 },

    /// Token index is not 0-3.
    #[error("no token with index {0}")]
    InvalidToken(u8),

    /// Dice face outside `1..=dice_faces`.
    #[error("invalid dice face {0}")]
    InvalidDiceFace(u8),

    /// Caller's extra-turn claim disagrees with the resolved move.
    #[error("extra turn claimed = {claimed}, but earned = {earned}")]
    ExtraTurnMismatch { claimed: bool, earned: bool },

    /// The match has already ended.
    #[error("the match is over")]
    MatchOver,

    /// Roster is not 2-4 distinct palette colors.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// Rule configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Replication failure.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Update is not newer than the replica's state.
    #[error("stale update v{received}, replica is at v{current}")]
    StaleUpdate { received: u64, current: u64 },

    /// Payload could not be encoded or decoded.
    #[error("wire format error: {0}")]
    Codec(#[from] bincode::Error),

    /// Authority rejected the operation.
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Rejected input to one of the memory games.
#[derive(Debug, thiserror::Error)]
pub enum MemoryGameError {
    /// Input from a player who is not on turn.
    #[error("player {got} acted out of turn, player {expected} is on turn")]
    NotYourTurn { expected: usize, got: usize },

    /// The sequence is still being shown.
    #[error("input is closed while the sequence is shown")]
    NotAcceptingInput,

    /// Tile index outside the grid.
    #[error("tile {tile} is outside the {tiles}-tile grid")]
    TileOutOfRange { tile: u8, tiles: u8 },

    /// Unsupported number of players.
    #[error("{count} players, expected {min}-{max}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    /// The game has ended; restart it first.
    #[error("the game is over")]
    GameOver,
}
