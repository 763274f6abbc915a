//! Mailbox board representation.
//!
//! The board is a flat array of 64 optional pieces, indexed by [`Square`],
//! plus a cache of where each king stands. Only the engine mutates it.

use chess_core::{Color, Piece, Square};
use std::fmt;

/// A piece of a given color standing on a square.
pub type ColoredPiece = (Piece, Color);

/// The 8x8 grid of pieces.
///
/// Invariant: exactly one king of each color is on the board, and `kings`
/// holds their squares. Positions are only built from validated FEN or by
/// the move executor, which both keep this true.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<ColoredPiece>; 64],
    kings: [Square; 2],
}

impl Board {
    /// Creates a board with no pieces on it.
    ///
    /// The king cache points at the usual start squares until pieces are
    /// placed and [`refresh_kings`](Board::refresh_kings) runs.
    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            kings: [Square::E1, Square::E8],
        }
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.index() as usize]
    }

    /// Returns the color of the piece on the square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, color)| color)
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns true if the square holds exactly this piece and color.
    #[inline]
    pub fn has(&self, sq: Square, piece: Piece, color: Color) -> bool {
        self.piece_at(sq) == Some((piece, color))
    }

    /// Returns the cached square of the king of the given color.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Iterates the squares and pieces of one color, from a1 to h8.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some((piece, c)) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Counts the pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|p| p.is_some()).count()
    }

    /// Writes a square without touching the king cache.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<ColoredPiece>) {
        self.squares[sq.index() as usize] = piece;
    }

    /// Takes the piece off a square, leaving it empty.
    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.index() as usize].take()
    }

    /// Rescans the board for both kings and updates the cache.
    pub(crate) fn refresh_kings(&mut self) {
        for sq in Square::all() {
            if let Some((Piece::King, color)) = self.piece_at(sq) {
                self.kings[color.index()] = sq;
            }
        }
    }

    /// Returns the FEN piece-placement field for this board.
    pub fn placement(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match Square::from_coords(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some((piece, color)) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}

/// Prints the board from White's side, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(piece, color)| piece.to_fen_char(color));
                write!(f, " {}", c)?;
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "  +-----------------+")?;
        write!(f, "    a b c d e f g h")
    }
}
