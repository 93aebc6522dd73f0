//! Chess board representation and game rules.
//!
//! The board keeps two forms of every piece. [`LivePiece`]s belong to the
//! [`Board`] and change only when a move is applied or the history cursor
//! moves; each change is reported to observers as a [`BoardEvent`].
//! [`Snapshot`]s are detached copies used for move generation and for
//! trying moves out, and nobody is notified when they change.
//!
//! # Example
//! ```
//! use duel_chess::board::{Board, Color, Square};
//!
//! let mut board = Board::default();
//! let moves = board.snapshot().legal_moves(Color::White);
//! println!("Starting position has {} legal moves", moves.len());
//!
//! let (idx, mv) = board.find_move(Square::at('E', 2), Square::at('E', 4)).unwrap();
//! assert_eq!(board.apply_local_move(idx, &mv).unwrap(), "e4");
//! ```

mod builder;
mod check;
mod error;
mod fen;
mod history;
mod live;
mod make_unmake;
mod movegen;
mod pgn;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::BoardBuilder;
pub use check::KingState;
pub use error::{BoardError, FenError, MoveParseError, ProtocolError, SquareError};
pub use history::{HistoryEntry, MoveHistory};
pub use live::{BoardEvent, GameOverReason, LivePiece, Observer};
pub use pgn::{movetext, records_from_plies, PgnRecord};
pub use state::Board;
pub use types::{
    CastleSide, Color, Direction, GameConfig, Move, MoveEffect, MoveEffectPack, PieceKind,
    PieceRecord, Position, Snapshot, Square, TimeControl, DEFAULT_PORT, PIECE_SLOTS,
};
