//! Chess CLI - Replays a line of text moves through the engine.
//!
//! Each move is applied with the engine's text parser, so AN, SAN and LAN
//! may be mixed freely. The board is printed after every ply, followed by
//! the final FEN, the move list and the result.

use anyhow::Context;
use chess_core::Promotion;
use chess_engine::{Game, NotationFormat};
use clap::Parser;

/// Moves played when none are given on the command line.
const REFERENCE_LINE: &[&str] = &["e2e4", "f7f5", "e4f5", "g8h6", "f1d3", "h6f5", "d3f5"];

/// Chess CLI - Replays text moves and prints the resulting game.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Replays chess moves and prints the resulting game")]
struct Args {
    /// Starting position in FEN (defaults to the standard start)
    #[arg(long)]
    fen: Option<String>,

    /// Notation for the printed move list: an, san or lan
    #[arg(long, default_value = "an")]
    format: NotationFormat,

    /// Piece used when a pawn promotes: q, r, n or b
    #[arg(long, value_parser = parse_promotion)]
    promote: Option<Promotion>,

    /// Only print the summary, not the board after every ply
    #[arg(long)]
    quiet: bool,

    /// Moves to play, in AN, SAN or LAN
    moves: Vec<String>,
}

fn parse_promotion(s: &str) -> Result<Promotion, String> {
    let mut chars = s.chars();
    match (chars.next().and_then(Promotion::from_char), chars.next()) {
        (Some(promotion), None) => Ok(promotion),
        _ => Err(format!("expected one of q, r, n, b; got '{}'", s)),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("invalid FEN '{}'", fen))?,
        None => Game::new(),
    };
    game.set_promotion_choice(args.promote);

    let moves: Vec<String> = if args.moves.is_empty() {
        REFERENCE_LINE.iter().map(|m| m.to_string()).collect()
    } else {
        args.moves.clone()
    };
    tracing::info!(plies = moves.len(), format = %args.format, "Replaying moves");

    if !args.quiet {
        println!("{}", game.board());
    }

    for (i, text) in moves.iter().enumerate() {
        game.apply_text_move(text).with_context(|| {
            format!(
                "move {} '{}' rejected in position {}",
                i + 1,
                text,
                game.to_fen()
            )
        })?;

        if !args.quiet {
            let shown = game
                .last_move_notation(args.format)
                .unwrap_or_else(|| text.clone());
            println!("{}. {}", i + 1, shown);
            println!("{}", game.board());
        }
    }

    println!("FEN: {}", game.to_fen());
    println!(
        "Moves ({}): {}",
        args.format,
        game.all_moves_notation(args.format).join(" ")
    );
    match game.result() {
        Some(result) => println!("Result: {} ({})", result.score(), result),
        None if game.is_check() => println!("Result: in progress, {} in check", game.side_to_move()),
        None => println!("Result: in progress, {} to move", game.side_to_move()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_argument() {
        assert_eq!(parse_promotion("q"), Ok(Promotion::Queen));
        assert_eq!(parse_promotion("N"), Ok(Promotion::Knight));
        assert!(parse_promotion("k").is_err());
        assert!(parse_promotion("qq").is_err());
        assert!(parse_promotion("").is_err());
    }

    #[test]
    fn arguments_parse() {
        let args = Args::parse_from(["chess-cli", "--format", "san", "--promote", "r", "e4", "e5"]);
        assert_eq!(args.format, NotationFormat::San);
        assert_eq!(args.promote, Some(Promotion::Rook));
        assert_eq!(args.moves, vec!["e4", "e5"]);
        assert!(!args.quiet);
    }

    #[test]
    fn reference_line_is_legal() {
        let mut game = Game::new();
        for text in REFERENCE_LINE {
            game.apply_text_move(text).unwrap();
        }
        assert_eq!(game.ply_count(), REFERENCE_LINE.len());
        assert!(!game.is_game_over());
    }
}
