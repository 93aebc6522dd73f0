//! Move and move-effect types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::piece::{Color, PieceKind};
use super::square::Square;

/// A candidate move for one piece.
///
/// The moving piece is implied by whoever generated the move, so only the
/// destination is stored. `capture` is the slot index of the piece taken,
/// which for en passant is not on `target`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Move {
    pub target: Square,
    pub capture: Option<usize>,
    pub two_square_advance: bool,
    pub castle: bool,
}

impl Move {
    /// Create a quiet move (no capture, no special flags)
    #[inline]
    #[must_use]
    pub const fn quiet(target: Square) -> Self {
        Move {
            target,
            capture: None,
            two_square_advance: false,
            castle: false,
        }
    }

    /// Create a move taking the piece in slot `victim`
    #[inline]
    #[must_use]
    pub const fn capture(target: Square, victim: usize) -> Self {
        Move {
            target,
            capture: Some(victim),
            two_square_advance: false,
            castle: false,
        }
    }

    /// Create a two-square pawn advance
    #[inline]
    #[must_use]
    pub const fn two_square(target: Square) -> Self {
        Move {
            target,
            capture: None,
            two_square_advance: true,
            castle: false,
        }
    }

    /// Create a castling move; `target` is the king's destination
    #[inline]
    #[must_use]
    pub const fn castle(target: Square) -> Self {
        Move {
            target,
            capture: None,
            two_square_advance: false,
            castle: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Which side a castling move goes to, derived from the king's target file.
    #[must_use]
    pub fn castle_side(&self) -> Option<CastleSide> {
        if !self.castle {
            return None;
        }
        match self.target.file() {
            'G' => Some(CastleSide::King),
            'C' => Some(CastleSide::Queen),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)?;
        if self.capture.is_some() {
            write!(f, " cap")?;
        }
        if self.castle {
            write!(f, " castle")?;
        }
        Ok(())
    }
}

/// Castling side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// File the rook starts on
    #[inline]
    #[must_use]
    pub const fn rook_file(self) -> char {
        match self {
            CastleSide::King => 'H',
            CastleSide::Queen => 'A',
        }
    }

    /// File the rook lands on
    #[inline]
    #[must_use]
    pub const fn rook_target_file(self) -> char {
        match self {
            CastleSide::King => 'F',
            CastleSide::Queen => 'D',
        }
    }

    /// File the king lands on
    #[inline]
    #[must_use]
    pub const fn king_target_file(self) -> char {
        match self {
            CastleSide::King => 'G',
            CastleSide::Queen => 'C',
        }
    }

    /// Files strictly between king and rook, which must be empty
    #[must_use]
    pub const fn between_files(self) -> &'static [char] {
        match self {
            CastleSide::King => &['F', 'G'],
            CastleSide::Queen => &['B', 'C', 'D'],
        }
    }

    /// Files the king stands on or crosses, which must not be attacked
    #[must_use]
    pub const fn transit_files(self) -> &'static [char] {
        match self {
            CastleSide::King => &['E', 'F', 'G'],
            CastleSide::Queen => &['E', 'D', 'C'],
        }
    }

    #[must_use]
    pub const fn notation(self) -> &'static str {
        match self {
            CastleSide::King => "O-O",
            CastleSide::Queen => "O-O-O",
        }
    }
}

/// One atomic piece-state change.
///
/// A relocation has `start != end`. Capture markers and promotions keep the
/// piece where it is (`start == end`) and change only the flag or the kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveEffect {
    pub piece: usize,
    pub kind_before: PieceKind,
    pub kind_after: PieceKind,
    pub start: Square,
    pub end: Square,
    pub color: Color,
    pub captured: bool,
}

impl MoveEffect {
    #[inline]
    #[must_use]
    pub fn is_relocation(&self) -> bool {
        self.start != self.end
    }
}

/// The ordered effects of one ply; the unit of undo and redo.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MoveEffectPack {
    effects: Vec<MoveEffect>,
}

impl MoveEffectPack {
    #[must_use]
    pub fn new() -> Self {
        MoveEffectPack::default()
    }

    pub fn push(&mut self, effect: MoveEffect) {
        self.effects.push(effect);
    }

    #[must_use]
    pub fn effects(&self) -> &[MoveEffect] {
        &self.effects
    }

    /// First effect that actually moves a piece; the move shown as "last move".
    #[must_use]
    pub fn relocation(&self) -> Option<&MoveEffect> {
        self.effects.iter().find(|e| e.is_relocation())
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.effects.iter().any(|e| e.captured)
    }

    /// Square skipped by a two-square pawn advance, if this pack is one.
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        let main = self.relocation()?;
        if main.kind_before != PieceKind::Pawn || (main.end.rank() - main.start.rank()).abs() != 2
        {
            return None;
        }
        Some(main.start.step(main.color.forward(), 1))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
