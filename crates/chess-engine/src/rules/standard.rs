//! Standard chess rules implementation.

use super::{DrawReason, GameResult, RuleSet};
use crate::error::MoveError;
use crate::execute::execute;
use crate::movegen::{self, is_king_attacked, Destinations};
use crate::Position;
use chess_core::{MoveRecord, Promotion, Square};

/// Number of half-moves without a pawn move or capture that draws the game.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Standard chess rules (FIDE).
///
/// - Standard piece movement
/// - Castling (kingside and queenside)
/// - En passant
/// - Pawn promotion
/// - Check, checkmate, and stalemate detection
/// - 50-move rule
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn legal_destinations(&self, position: &Position, from: Square) -> Destinations {
        movegen::legal_destinations(position, from)
    }

    fn make_move(
        &self,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<Promotion>,
    ) -> Result<(Position, MoveRecord), MoveError> {
        execute(position, from, to, promotion)
    }

    fn is_check(&self, position: &Position) -> bool {
        is_king_attacked(&position.board, position.side_to_move)
    }

    fn has_legal_move(&self, position: &Position) -> bool {
        movegen::has_legal_move(position)
    }

    fn game_result(&self, position: &Position) -> Option<GameResult> {
        if !self.has_legal_move(position) {
            return Some(if self.is_check(position) {
                GameResult::checkmated(position.side_to_move)
            } else {
                GameResult::Draw(DrawReason::Stalemate)
            });
        }

        if position.halfmove_clock >= FIFTY_MOVE_PLIES {
            return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
        }

        None
    }
}
