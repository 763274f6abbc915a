//! Rule set abstraction.
//!
//! The [`RuleSet`] trait gathers the position-level rules a game needs:
//! the starting position, legal destinations, move execution and the
//! terminal checks that can be read off a single position. Repetition
//! needs history and lives in [`Game`](crate::Game).

mod standard;

pub use standard::StandardChess;

use crate::error::MoveError;
use crate::movegen::Destinations;
use crate::Position;
use chess_core::{Color, MoveRecord, Promotion, Square};
use std::fmt;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// Returns the win for the side that delivered mate to `mated`.
    #[inline]
    pub const fn checkmated(mated: Color) -> Self {
        match mated {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        }
    }

    /// Returns the winning color, if the game was not drawn.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    /// Returns the PGN-style score ("1-0", "0-1", "1/2-1/2").
    pub const fn score(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "white wins by checkmate"),
            GameResult::BlackWins => write!(f, "black wins by checkmate"),
            GameResult::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position arose for the third time.
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::FiftyMoveRule => "the fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        };
        write!(f, "{}", name)
    }
}

/// The rules of a chess variant, as seen from a single position.
///
/// # Example
///
/// ```
/// use chess_engine::rules::RuleSet;
/// use chess_engine::StandardChess;
/// use chess_core::Square;
///
/// let position = StandardChess.initial_position();
/// let knight = StandardChess.legal_destinations(&position, Square::G1);
/// assert_eq!(knight.len(), 2);
/// ```
pub trait RuleSet {
    /// Returns the initial position for this variant.
    fn initial_position(&self) -> Position;

    /// Returns the legal destinations of the piece on `from`.
    fn legal_destinations(&self, position: &Position, from: Square) -> Destinations;

    /// Validates and plays a move, returning the successor position.
    fn make_move(
        &self,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<Promotion>,
    ) -> Result<(Position, MoveRecord), MoveError>;

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Returns true if the side to move has any legal move.
    fn has_legal_move(&self, position: &Position) -> bool;

    /// Returns the game result if the position alone ends the game.
    ///
    /// Covers checkmate, stalemate and the fifty-move rule, in that order.
    fn game_result(&self, position: &Position) -> Option<GameResult>;

    /// Returns true if the position alone ends the game.
    fn is_game_over(&self, position: &Position) -> bool {
        self.game_result(position).is_some()
    }
}
