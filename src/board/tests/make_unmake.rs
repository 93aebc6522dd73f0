//! Applying moves and taking them back.

use super::play;
use crate::board::{Board, BoardBuilder, Color, PieceKind, Square};

/// Everything a take-back must restore, in comparable form.
fn state(board: &Board) -> (Vec<(Square, PieceKind, bool, u32)>, Option<Square>, u32, String) {
    let pieces = board
        .pieces()
        .iter()
        .map(|p| (p.square(), p.kind(), p.is_captured(), p.move_count()))
        .collect();
    (
        pieces,
        board.en_passant_square(),
        board.halfmove_clock(),
        board.fen(),
    )
}

fn assert_round_trip(mut board: Board, text: &str) {
    let before = state(&board);
    play(&mut board, text);
    assert_ne!(state(&board), before, "{text} changed nothing");
    board.take_back().unwrap();
    assert_eq!(state(&board), before, "{text} did not round-trip");
}

#[test]
fn test_en_passant_make_unmake() {
    let board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    assert_round_trip(board, "e5f6");
}

#[test]
fn test_en_passant_removes_passed_pawn() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    assert_eq!(play(&mut board, "e5f6"), "exf6");
    assert!(board.piece_at(Square::at('F', 5)).is_none());
    assert_eq!(
        board.piece_at(Square::at('F', 6)).map(|p| p.color()),
        Some(Color::White)
    );
    assert_eq!(board.halfmove_clock(), 0);
}

#[test]
fn test_promotion_make_unmake() {
    let board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    assert_round_trip(board, "a7a8");
}

#[test]
fn test_promotion_becomes_queen() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let pgn = play(&mut board, "a7a8");
    assert!(pgn.starts_with("a8=Q"), "{pgn}");
    let queen = board.piece_at(Square::at('A', 8)).unwrap();
    assert_eq!(queen.kind(), PieceKind::Queen);
    // The promotion step itself is not a move
    assert_eq!(queen.move_count(), 1);

    board.take_back().unwrap();
    let pawn = board.piece_at(Square::at('A', 7)).unwrap();
    assert_eq!(pawn.kind(), PieceKind::Pawn);
    assert_eq!(pawn.move_count(), 0);
}

#[test]
fn test_castling_make_unmake() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert_round_trip(board, "e1g1");
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    assert_round_trip(board, "e8c8");
}

#[test]
fn test_castling_moves_rook() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(play(&mut board, "e1c1"), "O-O-O");
    assert_eq!(
        board.piece_at(Square::at('D', 1)).map(|p| p.kind()),
        Some(PieceKind::Rook)
    );
    assert!(board.piece_at(Square::at('A', 1)).is_none());
    assert_eq!(board.last_move(), Some((Square::at('E', 1), Square::at('C', 1))));
    assert!(board.fen().contains(" kq "));
}

#[test]
fn test_capture_make_unmake() {
    let mut board = Board::default();
    super::play_all(&mut board, &["e2e4", "d7d5"]);
    assert_round_trip(board, "e4d5");
}

#[test]
fn test_quiet_move_make_unmake() {
    let board = BoardBuilder::starting_position().build().unwrap();
    assert_round_trip(board, "g1f3");
}

#[test]
fn test_scroll_round_trip_restores_counters() {
    let mut board = Board::default();
    super::play_all(&mut board, &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5c6"]);
    let end = state(&board);

    board.scroll_to_start();
    assert_eq!(board.fen(), Board::default().fen());
    assert!(board.pieces().iter().all(|p| p.move_count() == 0 && !p.is_captured()));

    board.scroll_to_end();
    assert_eq!(state(&board), end);
}
