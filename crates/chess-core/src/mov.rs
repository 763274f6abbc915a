//! Move records.

use crate::{Piece, Promotion, Square};
use std::fmt;

/// What kind of move a destination square represents.
///
/// Move generation annotates every destination with one of these, so the
/// executor never has to rediscover whether a move is special.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MoveKind {
    /// Normal move or capture.
    #[default]
    Normal = 0,
    /// Pawn double push from its starting rank; sets the en passant target.
    DoublePush = 1,
    /// Pawn capture onto the en passant target square.
    EnPassantCapture = 2,
    /// Pawn move (push or capture) onto the last rank.
    Promotion = 3,
    /// Kingside castling (O-O).
    CastleKingside = 4,
    /// Queenside castling (O-O-O).
    CastleQueenside = 5,
}

impl MoveKind {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// Whether a move left the opponent in check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckMarker {
    #[default]
    None,
    Check,
    Checkmate,
}

impl CheckMarker {
    /// Returns the notation suffix: "", "+" or "#".
    #[inline]
    pub const fn suffix(self) -> &'static str {
        match self {
            CheckMarker::None => "",
            CheckMarker::Check => "+",
            CheckMarker::Checkmate => "#",
        }
    }
}

/// A committed move, as kept in game history.
///
/// Records are created by the move executor and never modified after the
/// ply is committed, apart from the check marker which the game fills in
/// once it knows the opponent's situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    /// The kind of piece that moved (a promoting pawn is still a pawn).
    pub piece: Piece,
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// True if an enemy piece was removed, including en passant.
    pub is_capture: bool,
    /// The piece a pawn promoted to, if any.
    pub promotion: Option<Promotion>,
    /// Check status of the opponent after the move.
    pub check: CheckMarker,
    /// Special move annotation.
    pub kind: MoveKind,
}

impl MoveRecord {
    /// Returns the plain coordinate notation for this move (e.g., "e2e4").
    pub fn to_coordinates(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
