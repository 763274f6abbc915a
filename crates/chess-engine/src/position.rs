//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Piece, Square};

use crate::movegen::is_king_attacked;
use crate::Board;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Builds rights from a validated FEN castling field ("KQkq", "Kq", "-").
    pub fn from_fen(field: &str) -> Self {
        let flags = field.chars().fold(0u8, |acc, c| {
            acc | match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => 0,
            }
        });
        CastlingRights::new(flags)
    }

    /// Returns the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|&(_, c)| c)
        .collect()
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Drops the right tied to a rook corner, if `sq` is one.
    ///
    /// Called for both the origin and destination of every move, which covers
    /// a rook leaving its corner and a rook being captured there.
    pub fn remove_for_square(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.remove_queenside(Color::White),
            Square::H1 => self.remove_kingside(Color::White),
            Square::A8 => self.remove_queenside(Color::Black),
            Square::H8 => self.remove_kingside(Color::Black),
            _ => {}
        }
    }
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Piece placement.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square, set after every double push.
    ///
    /// FEN export and repetition checks only honor it when a capture onto it
    /// is actually available; see [`Position::effective_en_passant`].
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

/// The parts of a position that decide threefold repetition.
///
/// Clocks are left out: two positions that differ only in move counters
/// are the same position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_parsed(&FenParser::default())
    }

    /// Creates a position from a FEN string.
    ///
    /// Besides the syntax, the side that just moved must not be left in
    /// check, or its king could be captured.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let position = Self::from_parsed(&parsed);
        let waiting = position.side_to_move.opposite();
        if is_king_attacked(&position.board, waiting) {
            return Err(FenError::OpponentInCheck(waiting));
        }
        Ok(position)
    }

    /// Builds a position from already validated FEN fields.
    fn from_parsed(parsed: &FenParser) -> Self {
        let mut board = Board::empty();
        for (file, rank, piece, color) in parsed.pieces() {
            if let Some(sq) = Square::from_coords(file as i32, rank as i32) {
                board.set(sq, Some((piece, color)));
            }
        }
        board.refresh_kings();

        Position {
            board,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen(&parsed.castling),
            en_passant: Square::from_algebraic(&parsed.en_passant),
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let en_passant = self
            .effective_en_passant()
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());

        format!(
            "{} {} {} {} {} {}",
            self.board.placement(),
            self.side_to_move.fen_char(),
            self.castling.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board.piece_at(sq)
    }

    /// Returns the square of the pawn that can be taken en passant, given the
    /// target square behind it.
    pub(crate) fn en_passant_victim(&self, target: Square) -> Option<Square> {
        target.offset(0, -self.side_to_move.pawn_direction())
    }

    /// Returns the en passant target only if the side to move has a pawn
    /// standing next to the pawn that just double-pushed.
    pub fn effective_en_passant(&self) -> Option<Square> {
        let target = self.en_passant?;
        let us = self.side_to_move;
        let victim = self.en_passant_victim(target)?;
        if !self.board.has(victim, Piece::Pawn, us.opposite()) {
            return None;
        }
        let adjacent = [-1, 1]
            .iter()
            .filter_map(|&df| victim.offset(df, 0))
            .any(|sq| self.board.has(sq, Piece::Pawn, us));
        adjacent.then_some(target)
    }

    /// Returns the key two positions must share to count as a repetition.
    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            board: self.board.clone(),
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.effective_en_passant(),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
