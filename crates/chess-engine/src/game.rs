//! Full game management with history tracking.
//!
//! The [`Game`] struct ties the position-level rules to a history:
//! - Moves by squares, by coordinates or by text in AN, SAN or LAN
//! - Check, checkmate, stalemate, fifty-move and threefold detection
//! - Undo, redo and jumping to any ply
//! - Move lists rendered in any supported notation

use crate::error::{GameError, HistoryError, MoveError};
use crate::history::{History, Snapshot};
use crate::movegen::{legal_moves, LegalMove};
use crate::notation::{format_move, parse_text_move, resolve_text_move, NotationFormat};
use crate::rules::{DrawReason, GameResult, RuleSet, StandardChess};
use crate::{Board, Position};
use chess_core::{CheckMarker, Color, FenError, MoveKind, MoveRecord, Promotion, Square};

/// How many times a position must occur to draw the game.
const REPETITION_LIMIT: usize = 3;

/// A chess game with undoable history.
///
/// Every successful move appends a snapshot; a refused move leaves the game
/// exactly as it was. Undoing and then playing a different move discards
/// the undone plies.
#[derive(Debug, Clone)]
pub struct Game {
    history: History,
    /// Piece used for the next pawn promotion, kept until changed.
    promotion: Option<Promotion>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(StandardChess.initial_position())
    }

    /// Creates a game from a custom starting position.
    ///
    /// The position is checked right away, so a mated or stalemated
    /// position starts out finished.
    pub fn from_position(position: Position) -> Self {
        Game {
            history: History::new(Self::initial_snapshot(position)),
            promotion: None,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    fn initial_snapshot(position: Position) -> Snapshot {
        let result = StandardChess.game_result(&position);
        Snapshot { position, result }
    }

    /// Restarts from the standard starting position, dropping all history.
    ///
    /// The promotion choice is kept.
    pub fn reset(&mut self) {
        self.history = History::new(Self::initial_snapshot(StandardChess.initial_position()));
        tracing::debug!("game reset");
    }

    /// Replaces the game with the position described by `fen`.
    ///
    /// On error the current game is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let position = Position::from_fen(fen)?;
        self.history = History::new(Self::initial_snapshot(position));
        tracing::debug!(fen = %fen, result = ?self.result(), "position loaded");
        Ok(())
    }

    /// Returns the current position as FEN.
    pub fn to_fen(&self) -> String {
        self.position().to_fen()
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.history.current().position
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.position().board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.position().side_to_move
    }

    /// Returns the result if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.history.current().result
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.result().is_some()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        StandardChess.is_check(self.position())
    }

    /// Returns the piece used for pawn promotions.
    pub fn promotion_choice(&self) -> Option<Promotion> {
        self.promotion
    }

    /// Sets the piece used for pawn promotions, or clears it.
    ///
    /// With no choice set, a pawn move to the last rank is refused with
    /// [`MoveError::MustSetPromotion`].
    pub fn set_promotion_choice(&mut self, promotion: Option<Promotion>) {
        self.promotion = promotion;
    }

    /// Returns the squares the piece on `from` may move to.
    ///
    /// Empty if the game is over, the square is empty, or the piece belongs
    /// to the side not on move.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.is_game_over() || self.board().color_at(from) != Some(self.side_to_move()) {
            return Vec::new();
        }
        StandardChess
            .legal_destinations(self.position(), from)
            .squares()
            .collect()
    }

    /// Returns every legal move of the side to move.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        if self.is_game_over() {
            return Vec::new();
        }
        legal_moves(self.position())
    }

    /// Plays a move by squares.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        self.commit(from, to, self.promotion)
    }

    /// Plays a move by zero-based (file, rank) coordinates, rank 0 being
    /// White's back rank.
    pub fn apply_move_at(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Result<MoveRecord, MoveError> {
        if self.is_game_over() {
            return self.refuse(MoveError::GameIsOver);
        }
        let Some(from) = Square::from_coords(from.0, from.1) else {
            return self.refuse(MoveError::InvalidFromLocation);
        };
        let Some(to) = Square::from_coords(to.0, to.1) else {
            return self.refuse(MoveError::InvalidToLocation);
        };
        self.apply_move(from, to)
    }

    /// Plays a move given as text in any supported notation.
    ///
    /// A promotion letter in the text applies to this move only and takes
    /// precedence over the configured promotion choice.
    pub fn apply_text_move(&mut self, text: &str) -> Result<MoveRecord, GameError> {
        if self.is_game_over() {
            return Ok(self.refuse(MoveError::GameIsOver)?);
        }
        let parsed = parse_text_move(text).map_err(|e| {
            tracing::debug!(text = %text, error = %e, "move text rejected");
            e
        })?;
        let (from, to) = match resolve_text_move(self.position(), &parsed) {
            Ok(squares) => squares,
            Err(e) => return Ok(self.refuse(e)?),
        };
        let promotion = parsed.promotion().or(self.promotion);
        Ok(self.commit(from, to, promotion)?)
    }

    fn refuse(&self, reason: MoveError) -> Result<MoveRecord, MoveError> {
        tracing::debug!(reason = %reason, fen = %self.to_fen(), "move refused");
        Err(reason)
    }

    /// Validates, executes and records one ply.
    fn commit(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Promotion>,
    ) -> Result<MoveRecord, MoveError> {
        if self.is_game_over() {
            return self.refuse(MoveError::GameIsOver);
        }
        if from == to {
            return self.refuse(MoveError::InvalidToLocation);
        }

        let (next, mut record) = match StandardChess.make_move(self.position(), from, to, promotion)
        {
            Ok(done) => done,
            Err(e) => return self.refuse(e),
        };

        let mut result = StandardChess.game_result(&next);
        record.check = match (StandardChess.is_check(&next), result) {
            (true, Some(GameResult::WhiteWins | GameResult::BlackWins)) => CheckMarker::Checkmate,
            (true, _) => CheckMarker::Check,
            (false, _) => CheckMarker::None,
        };
        if result.is_none() {
            let seen = self.history.repetitions(&next.repetition_key());
            if seen + 1 >= REPETITION_LIMIT {
                result = Some(GameResult::Draw(DrawReason::ThreefoldRepetition));
            }
        }

        self.history.push(record, Snapshot { position: next, result });
        tracing::debug!(
            ply = self.history.pointer(),
            mv = %record,
            fen = %self.to_fen(),
            "move committed"
        );
        if let Some(result) = result {
            tracing::info!(result = %result, plies = self.history.pointer(), "game over");
        }

        Ok(record)
    }

    /// Steps back one ply.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        self.history.undo()?;
        tracing::debug!(ply = self.history.pointer(), "undo");
        Ok(())
    }

    /// Steps forward one undone ply.
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        self.history.redo()?;
        tracing::debug!(ply = self.history.pointer(), "redo");
        Ok(())
    }

    /// Jumps to an absolute ply, 0 being the starting position.
    pub fn goto_ply(&mut self, ply: usize) -> Result<(), HistoryError> {
        self.history.goto(ply)?;
        tracing::debug!(ply, "goto");
        Ok(())
    }

    /// Jumps to the starting position.
    pub fn goto_start(&mut self) {
        self.history.goto_start();
    }

    /// Jumps to the last stored ply.
    pub fn goto_end(&mut self) {
        self.history.goto_end();
    }

    /// Returns the number of stored plies, including undone ones.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the ply of the current position.
    pub fn current_ply(&self) -> usize {
        self.history.pointer()
    }

    /// Returns how often the current position has occurred so far.
    pub fn repetition_count(&self) -> usize {
        self.history
            .repetitions(&self.position().repetition_key())
    }

    /// Returns the move that led to the current position.
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last_record().copied()
    }

    /// Returns the kind of the move that led to the current position.
    pub fn last_move_kind(&self) -> Option<MoveKind> {
        self.last_move().map(|record| record.kind)
    }

    /// Returns the move that led to the current position as text.
    pub fn last_move_notation(&self, format: NotationFormat) -> Option<String> {
        self.history
            .plies()
            .last()
            .map(|(before, record)| format_move(before, record, format))
    }

    /// Returns every move up to the current position as text.
    pub fn all_moves_notation(&self, format: NotationFormat) -> Vec<String> {
        self.history
            .plies()
            .map(|(before, record)| format_move(before, record, format))
            .collect()
    }
}
