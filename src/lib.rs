//! Two-player chess with a reversible move history and networked play.
//!
//! [`board`] holds the rules: move generation, check evaluation, the
//! history stack and FEN/PGN text. [`net`] carries moves between two
//! sessions over a length-prefixed stream.

pub mod board;
pub mod net;

pub use board::{Board, BoardEvent, Color, GameConfig, Move, PieceKind, Square};
pub use net::{Session, TcpTransport};
