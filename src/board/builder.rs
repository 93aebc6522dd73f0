//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than playing them out.
//! Every board holds exactly 32 piece slots, so the builder fills any slots
//! it was not given with pieces that are already captured.
//!
//! # Example
//! ```
//! use duel_chess::board::{BoardBuilder, Color, PieceKind, Square};
//!
//! let board = BoardBuilder::new()
//!     .piece(Square::at('E', 1), Color::White, PieceKind::King)
//!     .piece(Square::at('E', 8), Color::Black, PieceKind::King)
//!     .piece(Square::at('A', 2), Color::White, PieceKind::Pawn)
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(board.fen(), "4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
//! ```

use super::error::BoardError;
use super::types::{Color, GameConfig, PieceKind, PieceRecord, Snapshot, Square, PIECE_SLOTS};
use super::Board;

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<PieceRecord>,
    side_to_move: Color,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    config: GameConfig,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            config: GameConfig::default(),
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        BoardBuilder {
            pieces: Snapshot::standard().pieces,
            ..Self::new()
        }
    }

    /// Place a piece on the board, replacing whatever stood there.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, kind: PieceKind) -> Self {
        self.pieces.retain(|p| p.square != square);
        self.pieces.push(PieceRecord::new(square, kind, color));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|p| p.square != square);
        self
    }

    /// Mark the piece on `square` as having moved, which removes any castling
    /// right it carries.
    #[must_use]
    pub fn moved(mut self, square: Square) -> Self {
        if let Some(piece) = self.pieces.iter_mut().find(|p| p.square == square) {
            piece.move_count = piece.move_count.max(1);
        }
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set the en passant target square (the square a pawn just skipped).
    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant = Some(target);
        self
    }

    /// Clear the en passant target.
    #[must_use]
    pub const fn clear_en_passant(mut self) -> Self {
        self.en_passant = None;
        self
    }

    /// Set the halfmove clock.
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    /// Set the game configuration carried by the board.
    #[must_use]
    pub const fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// The position as a snapshot, padded to 32 slots.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut pieces = self.pieces.clone();
        let mut color = Color::White;
        while pieces.len() < PIECE_SLOTS {
            let mut pad = PieceRecord::new(Square::at('A', 1), PieceKind::Pawn, color);
            pad.captured = true;
            pieces.push(pad);
            color = color.opponent();
        }
        Snapshot {
            pieces,
            en_passant: self.en_passant,
        }
    }

    /// Build the board.
    ///
    /// Fails if the position breaks a board invariant: more than 32 pieces,
    /// not exactly one king per color, or two pieces on one square.
    pub fn build(self) -> Result<Board, BoardError> {
        let snapshot = self.snapshot();
        Board::from_snapshot(
            snapshot,
            self.side_to_move,
            self.halfmove_clock,
            self.config,
        )
    }
}
