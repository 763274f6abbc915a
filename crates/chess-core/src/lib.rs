//! Core types for chess.
//!
//! This crate provides the fundamental value types used by the rules engine:
//! - [`Piece`], [`Color`] and [`Promotion`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`MoveRecord`], [`MoveKind`] and [`CheckMarker`] for committed moves
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{CheckMarker, MoveKind, MoveRecord};
pub use piece::{Piece, Promotion};
pub use square::{File, Rank, Square};
