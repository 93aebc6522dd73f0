//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation node counts
//! - `make_unmake.rs` - Applying and taking back moves
//! - `edge_cases.rs` - Special moves, stalemate and remote validation
//! - `mates.rs` - Known mating sequences
//! - `proptest.rs` - Property-based tests

mod make_unmake;
mod mates;
mod perft;

use crate::board::{Board, Move};

/// Play a coordinate move ("e2e4") as the local side, panicking if illegal.
pub(super) fn play(board: &mut Board, text: &str) -> String {
    let (idx, mv) = board
        .parse_move(text)
        .unwrap_or_else(|err| panic!("{text}: {err}"));
    board
        .apply_local_move(idx, &mv)
        .unwrap_or_else(|err| panic!("{text}: {err}"))
}

/// Play a sequence of coordinate moves, returning their PGN texts.
pub(super) fn play_all(board: &mut Board, moves: &[&str]) -> Vec<String> {
    moves.iter().map(|text| play(board, text)).collect()
}

/// Every legal move of the side to move in the displayed position.
pub(super) fn all_moves(board: &Board) -> Vec<(usize, Move)> {
    board.snapshot().legal_moves(board.team_to_move())
}
