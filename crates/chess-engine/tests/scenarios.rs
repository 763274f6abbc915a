//! Integration tests playing whole games through the public `Game` API.

use chess_core::{CheckMarker, Color, FenParser, MoveKind, Piece, Promotion, Square};
use chess_engine::{DrawReason, Game, GameResult, HistoryError, MoveError, NotationFormat};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for m in moves {
        if let Err(e) = game.apply_text_move(m) {
            panic!("{} refused in {}: {}", m, game.to_fen(), e);
        }
    }
}

fn reason(game: &mut Game, text: &str) -> MoveError {
    game.apply_text_move(text)
        .expect_err("move should be refused")
        .reason()
}

#[test]
fn reference_line_has_no_result() {
    let mut game = Game::new();
    play(
        &mut game,
        &["e2e4", "f7f5", "e4f5", "g8h6", "f1d3", "h6f5", "d3f5"],
    );
    assert!(!game.is_game_over());
    assert!(!game.is_check());
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.ply_count(), 7);
    assert_eq!(
        game.all_moves_notation(NotationFormat::San),
        vec!["e4", "f5", "exf5", "Nh6", "Bd3", "Nxf5", "Bxf5"]
    );
    assert_eq!(
        game.all_moves_notation(NotationFormat::Lan),
        vec!["e2-e4", "f7-f5", "e4xf5", "Ng8-h6", "Bf1-d3", "Nh6xf5", "Bd3xf5"]
    );
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, &["f4", "e5", "g4"]);
    assert!(!game.is_game_over());

    play(&mut game, &["Qh4#"]);
    assert!(game.is_game_over());
    assert!(game.is_check());
    assert_eq!(game.result(), Some(GameResult::BlackWins));
    assert_eq!(game.last_move().map(|m| m.check), Some(CheckMarker::Checkmate));
    assert_eq!(
        game.apply_move(sq("e1"), sq("f2")),
        Err(MoveError::GameIsOver)
    );
    assert!(game.legal_destinations(sq("a2")).is_empty());
    assert_eq!(
        game.all_moves_notation(NotationFormat::An),
        vec!["f2f4", "e7e5", "g2g4", "d8h4"]
    );
}

#[test]
fn scholars_mate_in_coordinates() {
    let mut game = Game::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(game.result(), Some(GameResult::WhiteWins));
    assert_eq!(
        game.last_move_notation(NotationFormat::San).as_deref(),
        Some("Qxf7#")
    );
}

#[test]
fn rooks_on_one_rank_need_a_file_hint() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").unwrap();
    assert_eq!(reason(&mut game, "Rd1"), MoveError::AmbiguousMove);
    assert_eq!(game.ply_count(), 0);

    play(&mut game, &["Rad1"]);
    assert_eq!(
        game.last_move_notation(NotationFormat::San).as_deref(),
        Some("Rad1")
    );
    game.undo().unwrap();

    play(&mut game, &["Rhd1"]);
    assert_eq!(
        game.last_move_notation(NotationFormat::San).as_deref(),
        Some("Rhd1")
    );
    assert_eq!(
        game.last_move_notation(NotationFormat::Lan).as_deref(),
        Some("Rh1-d1")
    );
}

#[test]
fn rooks_on_one_file_need_a_rank_hint() {
    let mut game = Game::from_fen("R7/8/8/4k3/8/8/8/R5K1 w - - 0 1").unwrap();
    assert_eq!(reason(&mut game, "Ra4"), MoveError::AmbiguousMove);
    play(&mut game, &["R1a4"]);
    assert_eq!(
        game.last_move_notation(NotationFormat::San).as_deref(),
        Some("R1a4")
    );
}

#[test]
fn full_square_hint_resolves_directly() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").unwrap();
    play(&mut game, &["Ra1d1"]);
    assert_eq!(game.last_move().map(|m| m.from), Some(Square::A1));
}

#[test]
fn en_passant_window_is_one_ply() {
    let fen = "4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1";
    let mut game = Game::from_fen(fen).unwrap();
    play(&mut game, &["d5"]);
    assert_eq!(game.to_fen(), "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");

    // Sideways onto the victim is never a pawn move.
    assert_eq!(
        game.apply_move(sq("e5"), sq("d5")),
        Err(MoveError::InvalidMove)
    );

    let record = game.apply_move(sq("e5"), sq("d6")).unwrap();
    assert_eq!(record.kind, MoveKind::EnPassantCapture);
    assert!(record.is_capture);
    assert_eq!(game.board().piece_at(sq("d5")), None);
    assert_eq!(
        game.last_move_notation(NotationFormat::San).as_deref(),
        Some("exd6")
    );

    // A pawn off the fifth rank cannot capture onto the target.
    let mut other = Game::from_fen("4k3/3p4/8/8/4P3/8/8/4K3 b - - 0 1").unwrap();
    play(&mut other, &["d5"]);
    assert_eq!(
        other.apply_move(sq("e4"), sq("d6")),
        Err(MoveError::InvalidMove)
    );
    let record = other.apply_move(sq("e4"), sq("d5")).unwrap();
    assert_eq!(record.kind, MoveKind::Normal);
    assert!(record.is_capture);

    // A quiet move in between closes the window.
    game.undo().unwrap();
    play(&mut game, &["Ke2", "Ke7"]);
    assert_eq!(
        game.apply_move(sq("e5"), sq("d6")),
        Err(MoveError::InvalidMove)
    );
    assert_eq!(game.position().effective_en_passant(), None);
}

#[test]
fn en_passant_text_forms() {
    let fen = "4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1";
    for text in ["exd6", "exd6 e.p.", "e5xd6", "e5d6"] {
        let mut game = Game::from_fen(fen).unwrap();
        play(&mut game, &["d7d5", text]);
        assert_eq!(game.last_move_kind(), Some(MoveKind::EnPassantCapture), "{}", text);
    }
}

#[test]
fn promotion_gating() {
    let fen = "8/4P1k1/8/8/8/8/8/4K3 w - - 0 1";
    let mut game = Game::from_fen(fen).unwrap();
    assert_eq!(
        game.apply_move(sq("e7"), sq("e8")),
        Err(MoveError::MustSetPromotion)
    );
    assert_eq!(game.to_fen(), fen);
    assert_eq!(game.ply_count(), 0);

    game.set_promotion_choice(Some(Promotion::Queen));
    let record = game.apply_move(sq("e7"), sq("e8")).unwrap();
    assert_eq!(record.kind, MoveKind::Promotion);
    assert_eq!(record.promotion, Some(Promotion::Queen));
    assert_eq!(
        game.board().piece_at(sq("e8")),
        Some((Piece::Queen, Color::White))
    );
    assert_eq!(game.promotion_choice(), Some(Promotion::Queen));
    assert_eq!(
        game.last_move_notation(NotationFormat::San).as_deref(),
        Some("e8=Q")
    );
    assert_eq!(
        game.last_move_notation(NotationFormat::An).as_deref(),
        Some("e7e8")
    );
}

#[test]
fn promotion_from_text_without_choice() {
    let mut game = Game::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(reason(&mut game, "e8"), MoveError::MustSetPromotion);
    play(&mut game, &["e7e8n"]);
    assert_eq!(
        game.board().piece_at(sq("e8")),
        Some((Piece::Knight, Color::White))
    );
    assert_eq!(game.promotion_choice(), None);
}

#[test]
fn castling_both_wings() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["O-O", "0-0-0"]);
    assert_eq!(game.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
    assert_eq!(
        game.all_moves_notation(NotationFormat::San),
        vec!["O-O", "O-O-O"]
    );
    assert_eq!(
        game.all_moves_notation(NotationFormat::An),
        vec!["e1g1", "e8c8"]
    );
    assert_eq!(game.last_move_kind(), Some(MoveKind::CastleQueenside));
}

#[test]
fn castling_refused_through_attack() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").unwrap();
    // The rook on f2 covers f1 but leaves the queenside alone.
    assert!(!game.is_check());
    assert_eq!(reason(&mut game, "O-O"), MoveError::InvalidMove);
    assert_eq!(game.ply_count(), 0);
    play(&mut game, &["O-O-O"]);
    assert_eq!(game.board().piece_at(sq("d1")), Some((Piece::Rook, Color::White)));
    assert_eq!(game.board().king_square(Color::White), sq("c1"));
}

#[test]
fn castle_token_only_castles() {
    let fen = "7k/8/8/8/8/8/8/K3R3 w - - 0 1";
    let mut game = Game::from_fen(fen).unwrap();
    assert_eq!(reason(&mut game, "O-O"), MoveError::InvalidMove);
    assert_eq!(reason(&mut game, "0-0-0"), MoveError::InvalidMove);
    assert_eq!(game.to_fen(), fen);
    assert_eq!(game.ply_count(), 0);

    // The rook still moves there when asked by name.
    play(&mut game, &["Rg1"]);
    assert_eq!(game.last_move_kind(), Some(MoveKind::Normal));
}

#[test]
fn castling_refused_out_of_check() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
    assert!(game.is_check());
    assert_eq!(reason(&mut game, "O-O"), MoveError::InvalidMove);
    assert_eq!(reason(&mut game, "0-0-0"), MoveError::InvalidMove);
}

#[test]
fn reason_codes_by_coordinates() {
    let mut game = Game::new();
    assert_eq!(
        game.apply_move_at((4, 1), (4, 1)),
        Err(MoveError::InvalidToLocation)
    );
    assert_eq!(
        game.apply_move_at((8, 1), (4, 3)),
        Err(MoveError::InvalidFromLocation)
    );
    assert_eq!(
        game.apply_move_at((4, 1), (4, -1)),
        Err(MoveError::InvalidToLocation)
    );
    assert_eq!(
        game.apply_move_at((4, 3), (4, 4)),
        Err(MoveError::InvalidFromLocation)
    );
    assert_eq!(
        game.apply_move_at((4, 6), (4, 4)),
        Err(MoveError::InvalidColor)
    );
    assert_eq!(
        game.apply_move_at((4, 1), (3, 2)),
        Err(MoveError::InvalidMove)
    );
    assert_eq!(game.to_fen(), FenParser::STARTPOS);
}

#[test]
fn unparsable_text_is_a_parse_failure() {
    let mut game = Game::new();
    for text in ["", "   ", "hello", "z9"] {
        let err = game.apply_text_move(text).unwrap_err();
        assert_eq!(err.reason(), MoveError::InvalidMove, "{:?}", text);
    }
    assert_eq!(reason(&mut game, "Nd2"), MoveError::InvalidMove);
    assert_eq!(game.ply_count(), 0);
}

#[test]
fn undo_redo_and_goto() {
    let mut game = Game::new();
    play(&mut game, &["e4", "e5", "Nf3", "Nc6"]);
    let end = game.position().clone();

    for _ in 0..4 {
        game.undo().unwrap();
    }
    assert_eq!(game.to_fen(), FenParser::STARTPOS);
    assert_eq!(game.undo(), Err(HistoryError::AtStart));
    assert_eq!(game.current_ply(), 0);

    for _ in 0..4 {
        game.redo().unwrap();
    }
    assert_eq!(game.position(), &end);
    assert_eq!(game.redo(), Err(HistoryError::AtEnd));
    assert_eq!(game.current_ply(), 4);

    game.goto_ply(2).unwrap();
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(
        game.last_move_notation(NotationFormat::San).as_deref(),
        Some("e5")
    );
    assert!(game.goto_ply(5).is_err());
    assert_eq!(game.current_ply(), 2);

    play(&mut game, &["Bc4"]);
    assert_eq!(game.ply_count(), 3);
    assert_eq!(
        game.all_moves_notation(NotationFormat::San),
        vec!["e4", "e5", "Bc4"]
    );
}

#[test]
fn threefold_repetition_by_knight_shuffle() {
    let mut game = Game::new();
    play(
        &mut game,
        &["Nc3", "Nc6", "Nb1", "Nb8", "Nc3", "Nc6", "Nb1"],
    );
    assert!(!game.is_game_over());
    play(&mut game, &["Nb8"]);
    assert_eq!(
        game.result(),
        Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
    );
    assert_eq!(reason(&mut game, "e4"), MoveError::GameIsOver);

    game.undo().unwrap();
    assert!(!game.is_game_over());
}

#[test]
fn fifty_move_rule_after_quiet_move() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 99 120").unwrap();
    play(&mut game, &["Rh2"]);
    assert_eq!(
        game.result(),
        Some(GameResult::Draw(DrawReason::FiftyMoveRule))
    );
}

#[test]
fn pawn_move_resets_the_clock() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/P7/4K3 w - - 99 120").unwrap();
    play(&mut game, &["a3"]);
    assert!(!game.is_game_over());
    assert_eq!(game.position().halfmove_clock, 0);
}

#[test]
fn stalemate_by_move() {
    let mut game = Game::from_fen("7k/8/4Q3/6K1/8/8/8/8 w - - 0 1").unwrap();
    play(&mut game, &["Qf7"]);
    assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Stalemate)));
    assert_eq!(game.last_move().map(|m| m.check), Some(CheckMarker::None));
}

#[test]
fn fen_round_trip() {
    let fens = [
        FenParser::STARTPOS,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "4k3/8/8/8/8/8/8/4K3 b - - 37 81",
    ];
    for fen in fens {
        let mut game = Game::new();
        game.load_fen(fen).unwrap();
        assert_eq!(game.to_fen(), fen);
    }
}

#[test]
fn malformed_fen_is_rejected() {
    let mut game = Game::new();
    play(&mut game, &["d4"]);
    for fen in [
        "",
        "8/8/8/8/8/8/8/8 w - - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        // White to move could take the black king.
        "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1",
    ] {
        assert!(game.load_fen(fen).is_err(), "{:?}", fen);
    }
    assert_eq!(game.ply_count(), 1);
}

#[test]
fn reset_restores_start() {
    let mut game = Game::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    game.set_promotion_choice(Some(Promotion::Bishop));
    game.reset();
    assert_eq!(game.to_fen(), FenParser::STARTPOS);
    assert_eq!(game.ply_count(), 0);
    assert!(!game.is_game_over());
    assert_eq!(game.promotion_choice(), Some(Promotion::Bishop));
}
