//! Text move formats.
//!
//! Three output formats are supported:
//! - AN, plain coordinates: "e2e4", "g1f3"
//! - LAN, long algebraic: "e2-e4", "Ng1-f3", "e5xd6", "a7-a8=Q+"
//! - SAN, standard algebraic: "e4", "Nf3", "exd6", "Nbd7", "a8=Q#", "O-O"
//!
//! Input is forgiving and accepts any of the above, plus "0-0" style
//! castles, trailing "e.p." and lowercase coordinate promotions ("e7e8q").

use crate::error::MoveError;
use crate::movegen::legal_destinations;
use crate::Position;
use chess_core::{File, MoveKind, MoveRecord, Piece, Promotion, Rank, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for move text that cannot be read at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// The move text is empty.
    #[error("empty move text")]
    Empty,
    /// The move text does not end in a destination square.
    #[error("invalid move text: {0}")]
    InvalidFormat(String),
}

/// Output format for move text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotationFormat {
    /// Plain coordinates.
    #[default]
    An,
    /// Standard algebraic notation.
    San,
    /// Long algebraic notation.
    Lan,
}

impl FromStr for NotationFormat {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "an" => Ok(NotationFormat::An),
            "san" => Ok(NotationFormat::San),
            "lan" => Ok(NotationFormat::Lan),
            _ => Err(NotationError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for NotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotationFormat::An => "AN",
            NotationFormat::San => "SAN",
            NotationFormat::Lan => "LAN",
        };
        write!(f, "{}", name)
    }
}

/// Formats a committed move.
///
/// `before` must be the position the move was played from; SAN needs it to
/// find other pieces that could reach the same square.
pub fn format_move(before: &Position, record: &MoveRecord, format: NotationFormat) -> String {
    if format == NotationFormat::An {
        return record.to_coordinates();
    }

    match record.kind {
        MoveKind::CastleKingside => return "O-O".to_string(),
        MoveKind::CastleQueenside => return "O-O-O".to_string(),
        _ => {}
    }

    let mut text = String::new();
    if record.piece != Piece::Pawn {
        text.push(record.piece.san_char());
    }

    if format == NotationFormat::Lan {
        text.push_str(&record.from.to_algebraic());
        text.push(if record.is_capture { 'x' } else { '-' });
    } else {
        if record.piece == Piece::Pawn {
            if record.is_capture {
                text.push(record.from.file().to_char());
            }
        } else {
            text.push_str(&disambiguation(before, record));
        }
        if record.is_capture {
            text.push('x');
        }
    }

    text.push_str(&record.to.to_algebraic());
    if let Some(promotion) = record.promotion {
        text.push('=');
        text.push(promotion.to_char());
    }
    text.push_str(record.check.suffix());
    text
}

/// Returns the shortest origin hint that singles out the moving piece among
/// same-kind, same-color pieces able to reach the destination.
fn disambiguation(before: &Position, record: &MoveRecord) -> String {
    let color = before.side_to_move;
    let rivals: Vec<Square> = before
        .board
        .pieces(color)
        .filter(|&(sq, piece)| piece == record.piece && sq != record.from)
        .map(|(sq, _)| sq)
        .filter(|&sq| legal_destinations(before, sq).contains(record.to))
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let from = record.from;
    if rivals.iter().all(|sq| sq.file() != from.file()) {
        return from.file().to_char().to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != from.rank()) {
        return from.rank().to_char().to_string();
    }
    from.to_algebraic()
}

/// A move read from text, before it is matched against the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMove {
    /// "O-O" or "O-O-O".
    Castle { kingside: bool },
    /// Both origin file and rank were given, so the origin is known.
    Coordinates {
        from: Square,
        to: Square,
        promotion: Option<Promotion>,
    },
    /// A piece kind with optional origin hints.
    Algebraic {
        piece: Piece,
        from_file: Option<File>,
        from_rank: Option<Rank>,
        to: Square,
        promotion: Option<Promotion>,
    },
}

impl TextMove {
    /// Returns the promotion piece spelled out in the text, if any.
    pub fn promotion(&self) -> Option<Promotion> {
        match *self {
            TextMove::Castle { .. } => None,
            TextMove::Coordinates { promotion, .. } | TextMove::Algebraic { promotion, .. } => {
                promotion
            }
        }
    }
}

/// Characters that carry meaning in move text; everything else is noise
/// such as 'x', '-', '=' or annotation glyphs.
const MEANINGFUL: &str = "KQRNBPabcdefgh12345678";

/// Reads move text in any supported dialect.
///
/// The last two meaningful characters are the destination. A trailing
/// piece letter after them is the promotion. Everything before them is
/// hints: a piece letter, an origin file, an origin rank.
pub fn parse_text_move(text: &str) -> Result<TextMove, NotationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NotationError::Empty);
    }

    let body = trimmed.replace("e.p.", "");
    let body = body.trim().trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    match body {
        "O-O" | "0-0" => return Ok(TextMove::Castle { kingside: true }),
        "O-O-O" | "0-0-0" => return Ok(TextMove::Castle { kingside: false }),
        _ => {}
    }

    let invalid = || NotationError::InvalidFormat(text.to_string());
    let mut chars: Vec<char> = body.chars().collect();

    // Coordinate style lowercase promotion, e.g. "e7e8q".
    let mut promotion = None;
    let tail = chars.len().checked_sub(2).map(|i| (chars[i], chars[i + 1]));
    if let Some((rank, last)) = tail {
        if Rank::from_char(rank).is_some() && matches!(last, 'q' | 'r' | 'n' | 'b') {
            promotion = Promotion::from_char(last);
            chars.pop();
        }
    }

    chars.retain(|c| MEANINGFUL.contains(*c));
    if promotion.is_none() {
        if let Some(&last) = chars.last() {
            if matches!(last, 'Q' | 'R' | 'N' | 'B') {
                promotion = Promotion::from_char(last);
                chars.pop();
            }
        }
    }

    if chars.len() < 2 {
        return Err(invalid());
    }
    let (hints, dest) = chars.split_at(chars.len() - 2);
    let to = Square::new(
        File::from_char(dest[0]).ok_or_else(invalid)?,
        Rank::from_char(dest[1]).ok_or_else(invalid)?,
    );

    let mut piece = None;
    let mut from_file = None;
    let mut from_rank = None;
    for &c in hints {
        if let Some(p) = Piece::from_san_char(c) {
            piece = Some(p);
        } else if let Some(f) = File::from_char(c) {
            from_file = Some(f);
        } else if let Some(r) = Rank::from_char(c) {
            from_rank = Some(r);
        }
    }

    Ok(match (from_file, from_rank) {
        (Some(file), Some(rank)) => TextMove::Coordinates {
            from: Square::new(file, rank),
            to,
            promotion,
        },
        _ => TextMove::Algebraic {
            piece: piece.unwrap_or(Piece::Pawn),
            from_file,
            from_rank,
            to,
            promotion,
        },
    })
}

/// Finds the origin and destination squares a text move refers to.
///
/// Castles map to the king's fixed squares and only resolve when the king
/// may actually castle that way. Algebraic moves scan the pieces of the
/// hinted kind belonging to the side to move.
pub fn resolve_text_move(
    position: &Position,
    text_move: &TextMove,
) -> Result<(Square, Square), MoveError> {
    match *text_move {
        TextMove::Castle { kingside } => {
            let color = position.side_to_move;
            let rank = color.back_rank();
            let from = Square::E1.with_rank(rank);
            let (to, kind) = if kingside {
                (Square::G1.with_rank(rank), MoveKind::CastleKingside)
            } else {
                (Square::C1.with_rank(rank), MoveKind::CastleQueenside)
            };
            if !position.board.has(from, Piece::King, color) {
                return Err(MoveError::InvalidMove);
            }
            match legal_destinations(position, from).find(to) {
                Some(d) if d.kind == kind => Ok((from, to)),
                _ => Err(MoveError::InvalidMove),
            }
        }
        TextMove::Coordinates { from, to, .. } => Ok((from, to)),
        TextMove::Algebraic {
            piece,
            from_file,
            from_rank,
            to,
            ..
        } => {
            let mut candidates = position
                .board
                .pieces(position.side_to_move)
                .filter(|&(sq, p)| {
                    p == piece
                        && from_file.map_or(true, |f| sq.file() == f)
                        && from_rank.map_or(true, |r| sq.rank() == r)
                })
                .map(|(sq, _)| sq)
                .filter(|&sq| legal_destinations(position, sq).contains(to));

            let from = candidates.next().ok_or(MoveError::InvalidMove)?;
            if candidates.next().is_some() {
                return Err(MoveError::AmbiguousMove);
            }
            Ok((from, to))
        }
    }
}
