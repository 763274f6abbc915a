//! Attack detection by ray casting over the mailbox board.

use crate::Board;
use chess_core::{Color, Piece, Square};

/// Rook directions as (file delta, rank delta).
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop directions as (file delta, rank delta).
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Knight jumps as (file delta, rank delta).
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King steps: one square in each of the eight directions.
pub const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Returns the squares a knight on `sq` jumps to.
pub fn knight_targets(sq: Square) -> impl Iterator<Item = Square> {
    KNIGHT_JUMPS
        .iter()
        .filter_map(move |&(df, dr)| sq.offset(df, dr))
}

/// Returns the squares next to `sq`.
pub fn king_targets(sq: Square) -> impl Iterator<Item = Square> {
    KING_STEPS.iter().filter_map(move |&(df, dr)| sq.offset(df, dr))
}

/// Walks from `sq` in one direction and returns the first occupied square
/// with its occupant and the number of steps taken.
fn first_piece_on_ray(
    board: &Board,
    sq: Square,
    (df, dr): (i8, i8),
) -> Option<(Piece, Color, u8)> {
    let mut current = sq;
    let mut distance = 0u8;
    while let Some(next) = current.offset(df, dr) {
        distance += 1;
        if let Some((piece, color)) = board.piece_at(next) {
            return Some((piece, color, distance));
        }
        current = next;
    }
    None
}

/// Returns true if any piece of color `by` attacks `sq`.
///
/// Checks pawns first, then knights, then the eight rays. On a ray the
/// first piece met decides: a slider of the right kind attacks, a king
/// attacks only from one step away, anything else blocks.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    // An attacking pawn stands one rank behind the square, from its own side.
    let behind = -by.pawn_direction();
    for df in [-1, 1] {
        if let Some(from) = sq.offset(df, behind) {
            if board.has(from, Piece::Pawn, by) {
                return true;
            }
        }
    }

    if knight_targets(sq).any(|from| board.has(from, Piece::Knight, by)) {
        return true;
    }

    let hits = |directions: &[(i8, i8)], slider: Piece| {
        directions.iter().any(|&dir| {
            matches!(
                first_piece_on_ray(board, sq, dir),
                Some((piece, color, distance))
                    if color == by
                        && (piece == slider
                            || piece == Piece::Queen
                            || (piece == Piece::King && distance == 1))
            )
        })
    };

    hits(&ORTHOGONAL, Piece::Rook) || hits(&DIAGONAL, Piece::Bishop)
}

/// Returns true if the king of the given color is attacked.
pub fn is_king_attacked(board: &Board, king_color: Color) -> bool {
    is_square_attacked(board, board.king_square(king_color), king_color.opposite())
}
