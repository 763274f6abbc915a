//! Chess rules engine with undoable game history.
//!
//! This crate provides:
//! - [`Board`] - 8x8 mailbox of pieces with cached king squares
//! - [`Position`] - Full game state including castling rights and en passant
//! - [`Game`] - Complete game management with undo, redo and repetition tracking
//! - [`RuleSet`] - Trait for the position-level rules of a variant
//! - Legal move generation and validation
//! - Move notation in plain coordinates (AN), SAN and LAN
//!
//! # Architecture
//!
//! Pieces live in a 64-entry mailbox. Attacks are found by casting rays out
//! from the target square, and a move is legal when the mover's king is not
//! attacked once the move has been played on a scratch board. Executing a
//! move never mutates its input: the successor position is a fresh value,
//! which is what the game history stores.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameResult, NotationFormat};
//!
//! let mut game = Game::new();
//! for mv in ["f3", "e5", "g4", "Qh4"] {
//!     game.apply_text_move(mv).unwrap();
//! }
//! assert_eq!(game.result(), Some(GameResult::BlackWins));
//! assert_eq!(
//!     game.all_moves_notation(NotationFormat::San),
//!     vec!["f3", "e5", "g4", "Qh4#"]
//! );
//! ```

mod board;
mod error;
mod execute;
mod game;
mod history;
pub mod movegen;
pub mod notation;
mod position;
pub mod rules;

pub use board::{Board, ColoredPiece};
pub use error::{GameError, HistoryError, MoveError};
pub use execute::execute;
pub use game::Game;
pub use history::{History, Snapshot};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    is_king_attacked, is_square_attacked, legal_destinations, legal_moves, Destination,
    Destinations, LegalMove,
};
pub use notation::{
    format_move, parse_text_move, resolve_text_move, NotationError, NotationFormat, TextMove,
};
pub use position::{CastlingRights, Position, RepetitionKey};
pub use rules::{DrawReason, GameResult, RuleSet, StandardChess};
