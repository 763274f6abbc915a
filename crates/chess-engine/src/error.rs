//! Error types for game operations.

use crate::notation::NotationError;
use thiserror::Error;

/// Why a move was refused.
///
/// A refused move never changes the game: board, history and turn stay
/// exactly as they were.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    /// The destination is not reachable, or the move would leave the
    /// mover's king attacked.
    #[error("invalid move")]
    InvalidMove,

    /// The piece on the origin square belongs to the side not on move.
    #[error("piece belongs to the side not on move")]
    InvalidColor,

    /// The origin square is off the board or empty.
    #[error("invalid from location")]
    InvalidFromLocation,

    /// The destination is off the board or equal to the origin.
    #[error("invalid to location")]
    InvalidToLocation,

    /// A pawn reached the last rank with no promotion piece configured.
    #[error("promotion piece must be set before promoting")]
    MustSetPromotion,

    /// The game has already ended.
    #[error("game is over")]
    GameIsOver,

    /// More than one piece matches a text move.
    #[error("ambiguous move")]
    AmbiguousMove,
}

/// Error returned by text move input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("unreadable move text: {0}")]
    Notation(#[from] NotationError),
}

impl GameError {
    /// Returns the reason code for the refusal.
    ///
    /// Text that cannot be read as a move at all reports
    /// [`MoveError::InvalidMove`].
    pub fn reason(&self) -> MoveError {
        match self {
            GameError::Move(e) => *e,
            GameError::Notation(_) => MoveError::InvalidMove,
        }
    }
}

/// Error returned by history navigation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("already at the first position")]
    AtStart,

    #[error("already at the last position")]
    AtEnd,

    #[error("ply {ply} is out of range (0..={last})")]
    PlyOutOfRange { ply: usize, last: usize },
}
