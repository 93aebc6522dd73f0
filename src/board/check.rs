//! Check, checkmate and stalemate evaluation.

use std::fmt;

use super::types::{Color, Snapshot};

/// Check state of one side's king.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum KingState {
    NoCheck,
    Check,
    Checkmate,
}

impl KingState {
    /// Suffix appended to the PGN text of the move that produced this state.
    #[must_use]
    pub const fn pgn_suffix(self) -> &'static str {
        match self {
            KingState::NoCheck => "",
            KingState::Check => "+",
            KingState::Checkmate => "#",
        }
    }
}

impl fmt::Display for KingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KingState::NoCheck => write!(f, "no check"),
            KingState::Check => write!(f, "check"),
            KingState::Checkmate => write!(f, "checkmate"),
        }
    }
}

impl Snapshot {
    /// Whether the king of `color` is attacked. A snapshot without that king
    /// has nothing to attack and reports `false`.
    #[must_use]
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king(color).map_or(false, |king| {
            self.is_square_attacked(self.pieces[king].square, color.opponent())
        })
    }

    /// Evaluate the king of `color`.
    ///
    /// When attacked, every unfiltered move of every piece of `color` is tried
    /// on a copy; one that leaves the king safe means plain check.
    #[must_use]
    pub fn king_state(&self, color: Color) -> KingState {
        if !self.is_king_attacked(color) {
            return KingState::NoCheck;
        }

        let defended = self.active(color).any(|idx| {
            self.generate_moves(idx, false)
                .iter()
                .any(|mv| !self.play(idx, mv).is_king_attacked(color))
        });

        if defended {
            KingState::Check
        } else {
            KingState::Checkmate
        }
    }

    /// Whether `color` has at least one legal move.
    #[must_use]
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.active(color)
            .any(|idx| !self.generate_moves(idx, true).is_empty())
    }

    /// Not in check, yet without a legal move.
    #[must_use]
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_king_attacked(color) && !self.has_legal_move(color)
    }
}
