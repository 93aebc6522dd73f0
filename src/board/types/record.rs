//! Detached piece snapshots.
//!
//! A [`PieceRecord`] is the plain-value form of a board occupant. A
//! [`Snapshot`] is a whole board made of them: cheap to clone, free to mutate,
//! and never observed by anyone, which is what speculative check testing needs.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{Color, PieceKind, Square};

/// Number of piece slots on every board. Captured pieces stay in their slot.
pub const PIECE_SLOTS: usize = 32;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Slot layout of the standard starting position. Both peers build the same
/// order, so a capture index means the same piece on either side of the wire.
static STARTING_PIECES: Lazy<Vec<PieceRecord>> = Lazy::new(|| {
    let mut pieces = Vec::with_capacity(PIECE_SLOTS);
    for file in 'A'..='H' {
        pieces.push(PieceRecord::new(
            Square::at(file, Color::White.pawn_home_rank()),
            PieceKind::Pawn,
            Color::White,
        ));
        pieces.push(PieceRecord::new(
            Square::at(file, Color::Black.pawn_home_rank()),
            PieceKind::Pawn,
            Color::Black,
        ));
    }
    for color in Color::BOTH {
        for (file, kind) in ('A'..='H').zip(BACK_RANK) {
            pieces.push(PieceRecord::new(
                Square::at(file, color.back_rank()),
                kind,
                color,
            ));
        }
    }
    pieces
});

/// Value snapshot of one piece.
///
/// Equality deliberately ignores `move_count`: a transmitted record is matched
/// against the local board by kind, color, square and capture flag only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PieceRecord {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
    pub captured: bool,
    pub move_count: u32,
}

impl PieceRecord {
    #[must_use]
    pub const fn new(square: Square, kind: PieceKind, color: Color) -> Self {
        PieceRecord {
            square,
            kind,
            color,
            captured: false,
            move_count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_opposite(&self, color: Color) -> bool {
        self.color != color
    }

    /// Move to `square`, counting the move only if the square changes.
    pub fn relocate(&mut self, square: Square) {
        if self.square != square {
            self.square = square;
            self.move_count += 1;
        }
    }
}

impl PartialEq for PieceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.captured == other.captured
            && self.square == other.square
            && self.kind == other.kind
            && self.color == other.color
    }
}

impl Eq for PieceRecord {}

/// A detached board: every piece slot plus the en-passant target square.
///
/// `en_passant` is the square a pawn skipped over on the previous ply, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pieces: Vec<PieceRecord>,
    pub en_passant: Option<Square>,
}

impl Snapshot {
    /// The standard starting position.
    #[must_use]
    pub fn standard() -> Self {
        Snapshot {
            pieces: STARTING_PIECES.clone(),
            en_passant: None,
        }
    }

    #[must_use]
    pub fn from_pieces(pieces: Vec<PieceRecord>) -> Self {
        Snapshot {
            pieces,
            en_passant: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Slot of the uncaptured piece on `square`.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<usize> {
        self.pieces
            .iter()
            .position(|p| !p.captured && p.square == square)
    }

    /// Slot of the uncaptured piece of `color` on `square`.
    #[must_use]
    pub fn piece_of_color_at(&self, square: Square, color: Color) -> Option<usize> {
        self.piece_at(square)
            .filter(|&idx| self.pieces[idx].color == color)
    }

    /// Slot of the first piece equal to `record` (see [`PieceRecord`] equality).
    #[must_use]
    pub fn find(&self, record: &PieceRecord) -> Option<usize> {
        self.pieces.iter().position(|p| p == record)
    }

    /// Slot of the king of `color`.
    #[must_use]
    pub fn king(&self, color: Color) -> Option<usize> {
        self.pieces
            .iter()
            .position(|p| !p.captured && p.kind == PieceKind::King && p.color == color)
    }

    /// Slots of the uncaptured pieces of `color`.
    pub fn active(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(move |(_, p)| !p.captured && p.color == color)
            .map(|(idx, _)| idx)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::standard()
    }
}
