//! Live board pieces and the notifications they produce.
//!
//! Live pieces are only changed through move effects. Every change yields a
//! [`BoardEvent`], which the board forwards to the observers its owner
//! registered.

use std::fmt;

use super::types::{Color, MoveEffect, PieceKind, PieceRecord, Square};

/// Why a game ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameOverReason {
    /// A remote move failed validation.
    Invalid,
    Resign,
    Checkmate,
    Stalemate,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::Invalid => write!(f, "invalid move received"),
            GameOverReason::Resign => write!(f, "resignation"),
            GameOverReason::Checkmate => write!(f, "checkmate"),
            GameOverReason::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Notifications emitted by a [`Board`](super::Board).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BoardEvent {
    PieceMoved {
        piece: usize,
        from: Square,
        to: Square,
    },
    PieceKindChanged {
        piece: usize,
        kind: PieceKind,
    },
    PieceCaptured {
        piece: usize,
        square: Square,
    },
    PieceRestored {
        piece: usize,
        square: Square,
    },
    /// A move was accepted; carries its PGN text.
    MoveDone { pgn: String },
    /// The displayed position changed to the one after `index` plies.
    Scrolled { index: usize },
    GameOver(GameOverReason),
}

/// Callback receiving board notifications.
pub type Observer = Box<dyn FnMut(&BoardEvent) + Send>;

/// A piece owned by the live board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LivePiece {
    slot: usize,
    record: PieceRecord,
}

impl LivePiece {
    pub(crate) fn new(slot: usize, record: PieceRecord) -> Self {
        LivePiece { slot, record }
    }

    /// Slot index, stable for the whole game.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Detached copy of the current state.
    #[must_use]
    pub fn record(&self) -> PieceRecord {
        self.record
    }

    #[must_use]
    pub fn square(&self) -> Square {
        self.record.square
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.record.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.record.color
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.record.captured
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.record.move_count
    }

    pub(crate) fn apply(&mut self, effect: &MoveEffect, events: &mut Vec<BoardEvent>) {
        self.record.apply_effect(effect);
        if effect.is_relocation() {
            events.push(BoardEvent::PieceMoved {
                piece: self.slot,
                from: effect.start,
                to: effect.end,
            });
        }
        if effect.kind_before != effect.kind_after {
            events.push(BoardEvent::PieceKindChanged {
                piece: self.slot,
                kind: effect.kind_after,
            });
        }
        if effect.captured {
            events.push(BoardEvent::PieceCaptured {
                piece: self.slot,
                square: effect.end,
            });
        }
    }

    pub(crate) fn revert(&mut self, effect: &MoveEffect, events: &mut Vec<BoardEvent>) {
        self.record.revert_effect(effect);
        if effect.captured {
            events.push(BoardEvent::PieceRestored {
                piece: self.slot,
                square: effect.start,
            });
        }
        if effect.kind_before != effect.kind_after {
            events.push(BoardEvent::PieceKindChanged {
                piece: self.slot,
                kind: effect.kind_before,
            });
        }
        if effect.is_relocation() {
            events.push(BoardEvent::PieceMoved {
                piece: self.slot,
                from: effect.end,
                to: effect.start,
            });
        }
    }
}
