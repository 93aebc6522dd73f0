//! Known mating sequences and the notifications they produce.

use super::{all_moves, play, play_all};
use crate::board::{
    Board, BoardError, BoardEvent, Color, GameOverReason, KingState, Move, Square,
};
use std::sync::{Arc, Mutex};

fn recording_board(board: &mut Board) -> Arc<Mutex<Vec<BoardEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    board.add_observer(Box::new(move |event| sink.lock().unwrap().push(event.clone())));
    events
}

#[test]
fn test_fools_mate() {
    let mut board = Board::default();
    let events = recording_board(&mut board);

    let pgn = play_all(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(pgn, vec!["f3", "e5", "g4", "Qh4#"]);
    assert_eq!(board.king_state(Color::White), KingState::Checkmate);
    assert!(all_moves(&board).is_empty());
    assert!(!board.is_movable_position());

    let events = events.lock().unwrap();
    assert_eq!(
        events.last(),
        Some(&BoardEvent::GameOver(GameOverReason::Checkmate))
    );
    assert!(events.contains(&BoardEvent::MoveDone {
        pgn: "Qh4#".to_string()
    }));
}

#[test]
fn test_scholars_mate() {
    let mut board = Board::default();
    let pgn = play_all(
        &mut board,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert_eq!(pgn.last().map(String::as_str), Some("Qxf7#"));
    assert_eq!(board.king_state(Color::Black), KingState::Checkmate);
    assert_eq!(
        board.pgn_text(),
        "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7#"
    );
}

#[test]
fn test_back_rank_mate() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    assert_eq!(play(&mut board, "a1a8"), "Ra8#");
    assert_eq!(board.king_state(Color::Black), KingState::Checkmate);
}

#[test]
fn test_escapable_check_is_not_mate() {
    let mut board = Board::default();
    let pgn = play_all(&mut board, &["e2e4", "f7f6", "d1h5"]);
    assert_eq!(pgn.last().map(String::as_str), Some("Qh5+"));
    assert_eq!(board.king_state(Color::Black), KingState::Check);
    assert_eq!(play(&mut board, "g7g6"), "g6");
    assert_eq!(board.king_state(Color::Black), KingState::NoCheck);
}

#[test]
fn test_no_moves_after_mate() {
    let mut board = Board::default();
    play_all(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    let a2 = board.snapshot().piece_at(Square::at('A', 2)).unwrap();
    assert_eq!(
        board.apply_local_move(a2, &Move::quiet(Square::at('A', 3))),
        Err(BoardError::GameFinished)
    );
}

#[test]
fn test_take_back_out_of_mate() {
    let mut board = Board::default();
    play_all(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    board.take_back().unwrap();
    assert_eq!(board.king_state(Color::White), KingState::NoCheck);
    assert!(board.is_movable_position());
    assert_eq!(board.pgn_text(), "1. f3 e5 2. g4");
}
