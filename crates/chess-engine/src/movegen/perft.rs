//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! A promotion counts once per piece the pawn can become.

use super::{legal_moves, LegalMove};
use crate::execute::apply;
use crate::Position;
use chess_core::{MoveKind, Promotion};

/// Returns the promotion choices that turn one generated move into leaves.
fn promotion_options(m: &LegalMove) -> &'static [Option<Promotion>] {
    const PROMOTIONS: [Option<Promotion>; 4] = [
        Some(Promotion::Queen),
        Some(Promotion::Rook),
        Some(Promotion::Knight),
        Some(Promotion::Bishop),
    ];
    if m.kind == MoveKind::Promotion {
        &PROMOTIONS
    } else {
        &[None]
    }
}

/// Counts the number of leaf nodes at the given depth.
///
/// This is the standard perft function used to validate move generators.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);

    if depth == 1 {
        return moves.iter().map(|m| promotion_options(m).len() as u64).sum();
    }

    let mut nodes = 0u64;
    for m in &moves {
        for &promotion in promotion_options(m) {
            if let Ok((next, _)) = apply(position, m.from, m.to, m.kind, promotion) {
                nodes += perft(&next, depth - 1);
            }
        }
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        for &promotion in promotion_options(m) {
            let Ok((next, record)) = apply(position, m.from, m.to, m.kind, promotion) else {
                continue;
            };
            let nodes = if depth > 1 {
                perft(&next, depth - 1)
            } else {
                1
            };
            let mut name = record.to_coordinates();
            if let Some(p) = promotion {
                name.push(p.to_char().to_ascii_lowercase());
            }
            results.push((name, nodes));
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
