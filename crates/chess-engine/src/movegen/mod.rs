//! Move generation.
//!
//! Destinations are generated per piece. [`pseudo_legal_destinations`]
//! follows the movement rules of the piece on a square; [`legal_destinations`]
//! additionally drops anything that would leave the mover's own king
//! attacked. King steps and castling are vetted against attacks during
//! generation, so the legality filter only has to catch pins and checks.

mod attacks;
pub mod perft;

use crate::{Board, Position};
use chess_core::{Color, MoveKind, Piece, Square};

pub use attacks::{
    is_king_attacked, is_square_attacked, king_targets, knight_targets, DIAGONAL, KING_STEPS,
    KNIGHT_JUMPS, ORTHOGONAL,
};

/// A square a piece may move to, annotated with the kind of move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Destination {
    pub to: Square,
    pub kind: MoveKind,
}

impl Destination {
    const NONE: Destination = Destination {
        to: Square::A1,
        kind: MoveKind::Normal,
    };

    #[inline]
    const fn new(to: Square, kind: MoveKind) -> Self {
        Destination { to, kind }
    }
}

/// The destinations of a single piece, with a fixed maximum capacity.
///
/// A queen in the middle of an empty board reaches 27 squares and a king
/// at most 8 plus two castles, so a small array avoids heap allocations.
#[derive(Clone)]
pub struct Destinations {
    items: [Destination; Self::MAX],
    len: usize,
}

impl Destinations {
    /// Maximum number of destinations for one piece.
    pub const MAX: usize = 32;

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Destinations {
            items: [Destination::NONE; Self::MAX],
            len: 0,
        }
    }

    /// Adds a destination to the list.
    #[inline]
    pub fn push(&mut self, to: Square, kind: MoveKind) {
        debug_assert!(self.len < Self::MAX);
        self.items[self.len] = Destination::new(to, kind);
        self.len += 1;
    }

    /// Returns the number of destinations.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the destinations.
    #[inline]
    pub fn as_slice(&self) -> &[Destination] {
        &self.items[..self.len]
    }

    /// Returns the destination entry for a target square, if present.
    pub fn find(&self, to: Square) -> Option<Destination> {
        self.as_slice().iter().copied().find(|d| d.to == to)
    }

    /// Returns true if the target square is in the list.
    #[inline]
    pub fn contains(&self, to: Square) -> bool {
        self.find(to).is_some()
    }

    /// Iterates over the target squares only.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.as_slice().iter().map(|d| d.to)
    }

    /// Retains only destinations for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Destination) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.items[read]) {
                self.items[write] = self.items[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Destinations {
    type Output = Destination;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Destinations {
    type Item = &'a Destination;
    type IntoIter = std::slice::Iter<'a, Destination>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for Destinations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A legal move of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

/// Generates the destinations allowed by the movement rules of the piece on
/// `from`, ignoring whether its own king ends up attacked.
///
/// Generation is relative to the piece's own color. En passant is only
/// offered to the side to move, since the target belongs to it.
pub fn pseudo_legal_destinations(position: &Position, from: Square) -> Destinations {
    let mut out = Destinations::new();
    let Some((piece, color)) = position.board.piece_at(from) else {
        return out;
    };

    match piece {
        Piece::Pawn => generate_pawn(position, from, color, &mut out),
        Piece::Knight => generate_steps(&position.board, from, color, &KNIGHT_JUMPS, &mut out),
        Piece::Bishop => generate_slides(&position.board, from, color, &DIAGONAL, &mut out),
        Piece::Rook => generate_slides(&position.board, from, color, &ORTHOGONAL, &mut out),
        Piece::Queen => {
            generate_slides(&position.board, from, color, &ORTHOGONAL, &mut out);
            generate_slides(&position.board, from, color, &DIAGONAL, &mut out);
        }
        Piece::King => {
            generate_king(&position.board, from, color, &mut out);
            generate_castling(position, from, color, &mut out);
        }
    }

    out
}

/// Generates the legal destinations of the piece on `from`.
pub fn legal_destinations(position: &Position, from: Square) -> Destinations {
    filter_king_safety(&position.board, from, pseudo_legal_destinations(position, from))
}

/// Generates every legal move of the side to move.
pub fn legal_moves(position: &Position) -> Vec<LegalMove> {
    let mut moves = Vec::new();
    for (from, _) in position.board.pieces(position.side_to_move) {
        for d in &legal_destinations(position, from) {
            moves.push(LegalMove {
                from,
                to: d.to,
                kind: d.kind,
            });
        }
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    position
        .board
        .pieces(position.side_to_move)
        .any(|(from, _)| !legal_destinations(position, from).is_empty())
}

/// Drops candidates that would leave the mover's king attacked.
///
/// Each candidate is simulated on a scratch copy of the board and undone
/// again. When lifting the piece off its square does not expose the king,
/// no destination can, so the whole list is kept without simulation. That
/// shortcut is skipped for the king itself and whenever an en passant
/// capture is among the candidates, since that capture also removes a
/// second pawn from the rank the king may stand on.
fn filter_king_safety(board: &Board, from: Square, mut candidates: Destinations) -> Destinations {
    let Some(mover) = board.piece_at(from) else {
        return Destinations::new();
    };
    let (piece, color) = mover;
    let them = color.opposite();
    let king = board.king_square(color);
    let mut scratch = board.clone();

    let has_en_passant = candidates
        .as_slice()
        .iter()
        .any(|d| d.kind == MoveKind::EnPassantCapture);
    if piece != Piece::King && !has_en_passant {
        scratch.set(from, None);
        let exposed = is_square_attacked(&scratch, king, them);
        scratch.set(from, Some(mover));
        if !exposed {
            return candidates;
        }
    }

    candidates.retain(|d| {
        let captured = scratch.take(d.to);
        scratch.set(from, None);
        scratch.set(d.to, Some(mover));
        let en_passant = match d.kind {
            MoveKind::EnPassantCapture => d
                .to
                .offset(0, -color.pawn_direction())
                .map(|victim| (victim, scratch.take(victim))),
            _ => None,
        };

        let king_sq = if piece == Piece::King { d.to } else { king };
        let safe = !is_square_attacked(&scratch, king_sq, them);

        if let Some((victim, pawn)) = en_passant {
            scratch.set(victim, pawn);
        }
        scratch.set(d.to, captured);
        scratch.set(from, Some(mover));
        safe
    });

    debug_assert_eq!(&scratch, board, "legality probe must leave the board unchanged");
    candidates
}

/// Adds single-step destinations (knight jumps, king steps).
fn generate_steps(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Destinations,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if board.color_at(to) != Some(color) {
                out.push(to, MoveKind::Normal);
            }
        }
    }
}

/// Adds sliding destinations, stopping at the first occupied square on each
/// ray and including it when it holds an enemy piece.
fn generate_slides(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Destinations,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.color_at(to) {
                None => out.push(to, MoveKind::Normal),
                Some(c) => {
                    if c != color {
                        out.push(to, MoveKind::Normal);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Adds pawn pushes, captures and en passant.
fn generate_pawn(position: &Position, from: Square, color: Color, out: &mut Destinations) {
    let board = &position.board;
    let dir = color.pawn_direction();
    let advance_kind = |to: Square| {
        if to.rank() == color.promotion_rank() {
            MoveKind::Promotion
        } else {
            MoveKind::Normal
        }
    };

    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            out.push(one, advance_kind(one));
            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.is_empty(two) {
                        out.push(two, MoveKind::DoublePush);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        if board.color_at(to) == Some(color.opposite()) {
            out.push(to, advance_kind(to));
        } else if color == position.side_to_move
            && from.rank() == color.en_passant_rank()
            && position.en_passant == Some(to)
            && board.is_empty(to)
            && position
                .en_passant_victim(to)
                .is_some_and(|victim| board.has(victim, Piece::Pawn, color.opposite()))
        {
            out.push(to, MoveKind::EnPassantCapture);
        }
    }
}

/// Adds king steps onto squares not attacked by the opponent.
///
/// The king is lifted off its square while testing, so it cannot hide behind
/// itself from a slider on the same line.
fn generate_king(board: &Board, from: Square, color: Color, out: &mut Destinations) {
    let them = color.opposite();
    let mut vacated = board.clone();
    vacated.set(from, None);

    for to in king_targets(from) {
        if board.color_at(to) != Some(color) && !is_square_attacked(&vacated, to, them) {
            out.push(to, MoveKind::Normal);
        }
    }
}

/// Adds castling destinations.
///
/// Requires the right, the king on its home square, the rook in its
/// corner, empty squares in between, and no attack on the king's start,
/// transit or landing square.
fn generate_castling(position: &Position, from: Square, color: Color, out: &mut Destinations) {
    let board = &position.board;
    let rank = color.back_rank();
    let home = Square::E1.with_rank(rank);
    if from != home {
        return;
    }
    let them = color.opposite();
    let safe = |files: &[Square]| files.iter().all(|&sq| !is_square_attacked(board, sq, them));
    let empty = |files: &[Square]| files.iter().all(|&sq| board.is_empty(sq));

    if position.castling.can_castle_kingside(color) {
        let f = Square::F1.with_rank(rank);
        let g = Square::G1.with_rank(rank);
        let rook = Square::H1.with_rank(rank);
        if board.has(rook, Piece::Rook, color) && empty(&[f, g]) && safe(&[home, f, g]) {
            out.push(g, MoveKind::CastleKingside);
        }
    }

    if position.castling.can_castle_queenside(color) {
        let d = Square::D1.with_rank(rank);
        let c = Square::C1.with_rank(rank);
        let b = Square::B1.with_rank(rank);
        let rook = Square::A1.with_rank(rank);
        if board.has(rook, Piece::Rook, color) && empty(&[d, c, b]) && safe(&[home, d, c]) {
            out.push(c, MoveKind::CastleQueenside);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    fn targets(position: &Position, from: &str) -> Vec<String> {
        let mut v: Vec<String> = legal_destinations(position, sq(from))
            .squares()
            .map(|s| s.to_algebraic())
            .collect();
        v.sort();
        v
    }

    #[test]
    fn destinations_push_and_iterate() {
        let mut list = Destinations::new();
        assert!(list.is_empty());
        list.push(sq("e4"), MoveKind::DoublePush);
        list.push(sq("e3"), MoveKind::Normal);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].kind, MoveKind::DoublePush);
        assert!(list.contains(sq("e3")));
        assert_eq!(list.find(sq("e5")), None);
        assert_eq!((&list).into_iter().count(), 2);
    }

    #[test]
    fn destinations_retain() {
        let mut list = Destinations::default();
        for s in ["a3", "b3", "c3", "d3"] {
            list.push(sq(s), MoveKind::Normal);
        }
        list.retain(|d| d.to.file().index() % 2 == 0);
        let kept: Vec<Square> = list.squares().collect();
        assert_eq!(kept, vec![sq("a3"), sq("c3")]);
    }

    #[test]
    fn startpos_moves() {
        let position = Position::startpos();
        assert_eq!(legal_moves(&position).len(), 20);
        assert!(has_legal_move(&position));
        assert_eq!(targets(&position, "e2"), vec!["e3", "e4"]);
        assert_eq!(targets(&position, "g1"), vec!["f3", "h3"]);
        assert!(targets(&position, "e1").is_empty());
        assert!(targets(&position, "e4").is_empty());
    }

    #[test]
    fn double_push_is_annotated() {
        let position = Position::startpos();
        let d = legal_destinations(&position, sq("d2"));
        assert_eq!(d.find(sq("d4")).map(|d| d.kind), Some(MoveKind::DoublePush));
        assert_eq!(d.find(sq("d3")).map(|d| d.kind), Some(MoveKind::Normal));
    }

    #[test]
    fn blocked_pawn_has_no_double_push() {
        let position = pos("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(targets(&position, "e2").is_empty());
    }

    #[test]
    fn pinned_piece_stays_on_line() {
        // The e4 rook is pinned by the e8 rook and may only move along the e-file.
        let position = pos("k3r3/8/8/8/4R3/8/8/4K3 w - - 0 1");
        assert_eq!(
            targets(&position, "e4"),
            vec!["e2", "e3", "e5", "e6", "e7", "e8"]
        );
    }

    #[test]
    fn check_must_be_answered() {
        // Only blocking on e2 or capturing is allowed while the e8 rook checks.
        let position = pos("k3r3/8/8/8/8/8/1N6/4K3 w - - 0 1");
        assert!(targets(&position, "b2").is_empty());
        let position = pos("k3r3/8/8/8/8/8/2N5/4K3 w - - 0 1");
        assert_eq!(targets(&position, "c2"), vec!["e3"]);
    }

    #[test]
    fn king_cannot_step_along_checking_ray() {
        // f1 stays on the a1-h1 rank behind the king.
        let position = pos("k7/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert_eq!(targets(&position, "e1"), vec!["d2", "e2", "f2"]);
    }

    #[test]
    fn castling_both_sides() {
        let position = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let d = legal_destinations(&position, Square::E1);
        assert_eq!(d.find(Square::G1).map(|d| d.kind), Some(MoveKind::CastleKingside));
        assert_eq!(d.find(Square::C1).map(|d| d.kind), Some(MoveKind::CastleQueenside));
    }

    #[test]
    fn no_castling_through_check() {
        // Black rook on f8 covers f1.
        let position = pos("5r2/8/1k6/8/8/8/8/R3K2R w KQ - 0 1");
        let d = legal_destinations(&position, Square::E1);
        assert!(!d.contains(Square::G1));
        assert!(d.contains(Square::C1));
    }

    #[test]
    fn no_castling_out_of_check() {
        let position = pos("4r3/8/1k6/8/8/8/8/R3K2R w KQ - 0 1");
        let d = legal_destinations(&position, Square::E1);
        assert!(!d.contains(Square::G1));
        assert!(!d.contains(Square::C1));
    }

    #[test]
    fn queenside_b_square_may_be_attacked() {
        // b1 is attacked but the king never crosses it.
        let position = pos("1r6/8/7k/8/8/8/8/R3K3 w Q - 0 1");
        assert!(legal_destinations(&position, Square::E1).contains(Square::C1));
    }

    #[test]
    fn no_castling_without_rook() {
        let position = pos("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1");
        let d = legal_destinations(&position, Square::E1);
        assert!(!d.contains(Square::G1));
        assert!(!d.contains(Square::C1));
    }

    #[test]
    fn en_passant_capture() {
        let position = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let d = legal_destinations(&position, sq("e5"));
        assert_eq!(
            d.find(sq("d6")).map(|d| d.kind),
            Some(MoveKind::EnPassantCapture)
        );
    }

    #[test]
    fn en_passant_exposing_king_on_rank_is_illegal() {
        // Both pawns leave the fifth rank, opening it for the h5 rook.
        let position = pos("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 2");
        let d = legal_destinations(&position, sq("e5"));
        assert!(!d.contains(sq("d6")));
        assert!(d.contains(sq("e6")));
    }

    #[test]
    fn promotion_destinations() {
        let position = pos("3r3k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let d = legal_destinations(&position, sq("e7"));
        assert_eq!(d.find(sq("e8")).map(|d| d.kind), Some(MoveKind::Promotion));
        assert_eq!(d.find(sq("d8")).map(|d| d.kind), Some(MoveKind::Promotion));
    }

    #[test]
    fn checkmate_has_no_moves() {
        // Fool's mate.
        let position = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_king_attacked(&position.board, Color::White));
        assert!(!has_legal_move(&position));
        assert!(legal_moves(&position).is_empty());
    }

    #[test]
    fn stalemate_has_no_moves() {
        let position = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!is_king_attacked(&position.board, Color::Black));
        assert!(!has_legal_move(&position));
    }
}
