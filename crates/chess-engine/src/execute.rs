//! Move execution.
//!
//! [`execute`] validates a move against the legal destinations of the piece
//! and produces the successor position together with its [`MoveRecord`].
//! The input position is never modified, so a refused move leaves nothing
//! behind.

use crate::error::MoveError;
use crate::movegen::legal_destinations;
use crate::Position;
use chess_core::{CheckMarker, Color, MoveKind, MoveRecord, Piece, Promotion, Square};

/// Plays `from`-`to` for the side to move.
///
/// `promotion` is only consulted when the move lands a pawn on the last
/// rank; a missing choice then fails with [`MoveError::MustSetPromotion`].
/// The record's check marker is left for the caller to fill in.
pub fn execute(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
) -> Result<(Position, MoveRecord), MoveError> {
    let (_, color) = position
        .board
        .piece_at(from)
        .ok_or(MoveError::InvalidFromLocation)?;
    if color != position.side_to_move {
        return Err(MoveError::InvalidColor);
    }
    let destination = legal_destinations(position, from)
        .find(to)
        .ok_or(MoveError::InvalidMove)?;
    apply(position, from, to, destination.kind, promotion)
}

/// Applies a move already known to be legal, dispatching on the moving piece.
pub(crate) fn apply(
    position: &Position,
    from: Square,
    to: Square,
    kind: MoveKind,
    promotion: Option<Promotion>,
) -> Result<(Position, MoveRecord), MoveError> {
    let (piece, color) = position
        .board
        .piece_at(from)
        .ok_or(MoveError::InvalidFromLocation)?;

    let mut next = position.clone();
    next.en_passant = None;
    let mut record = MoveRecord {
        piece,
        from,
        to,
        is_capture: false,
        promotion: None,
        check: CheckMarker::None,
        kind,
    };

    match piece {
        Piece::Pawn => move_pawn(&mut next, &mut record, color, promotion)?,
        Piece::King => move_king(&mut next, &mut record, color),
        Piece::Rook => {
            move_piece(&mut next, &mut record);
            next.castling.remove_for_square(from);
        }
        Piece::Knight | Piece::Bishop | Piece::Queen => move_piece(&mut next, &mut record),
    }

    // A rook captured in its corner takes its castling right with it.
    next.castling.remove_for_square(to);
    if color == Color::Black {
        next.fullmove_number += 1;
    }
    next.side_to_move = color.opposite();

    Ok((next, record))
}

/// Moves the piece on `from` to `to`, returning true if something was captured.
fn relocate(next: &mut Position, from: Square, to: Square) -> bool {
    let mover = next.board.take(from);
    let captured = next.board.take(to).is_some();
    next.board.set(to, mover);
    captured
}

/// Knight, bishop, queen and the rook's plain move.
fn move_piece(next: &mut Position, record: &mut MoveRecord) {
    record.is_capture = relocate(next, record.from, record.to);
    next.halfmove_clock = if record.is_capture {
        0
    } else {
        next.halfmove_clock + 1
    };
}

fn move_king(next: &mut Position, record: &mut MoveRecord, color: Color) {
    next.castling.remove_color(color);

    let rook_hop = match record.kind {
        MoveKind::CastleKingside => Some((Square::H1, Square::F1)),
        MoveKind::CastleQueenside => Some((Square::A1, Square::D1)),
        _ => None,
    };
    if let Some((rook_from, rook_to)) = rook_hop {
        let rank = color.back_rank();
        relocate(next, rook_from.with_rank(rank), rook_to.with_rank(rank));
    }

    move_piece(next, record);
    next.board.refresh_kings();
}

fn move_pawn(
    next: &mut Position,
    record: &mut MoveRecord,
    color: Color,
    promotion: Option<Promotion>,
) -> Result<(), MoveError> {
    let (from, to) = (record.from, record.to);
    let dir = color.pawn_direction();

    match record.kind {
        MoveKind::Promotion => {
            let choice = promotion.ok_or(MoveError::MustSetPromotion)?;
            record.promotion = Some(choice);
            record.is_capture = relocate(next, from, to);
            next.board.set(to, Some((choice.piece(), color)));
        }
        MoveKind::EnPassantCapture => {
            if let Some(victim) = to.offset(0, -dir) {
                next.board.take(victim);
            }
            relocate(next, from, to);
            record.is_capture = true;
        }
        MoveKind::DoublePush => {
            relocate(next, from, to);
            next.en_passant = from.offset(0, dir);
        }
        _ => record.is_capture = relocate(next, from, to),
    }

    next.halfmove_clock = 0;
    Ok(())
}
