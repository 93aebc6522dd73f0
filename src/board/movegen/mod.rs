//! Move generation over detached snapshots.
//!
//! Generation is a pure function of a [`Snapshot`] and a piece slot. Moves are
//! first produced per piece kind without regard to king safety; the safety
//! filter then plays each candidate on a throwaway copy and keeps it only if
//! the mover's king is not attacked afterwards.

mod attacks;
mod kings;
mod knights;
mod pawns;
mod sliders;

use super::types::{Color, Move, PieceKind, Snapshot};

impl Snapshot {
    /// Moves for the piece in slot `idx`.
    ///
    /// With `validate_king_safety` unset the result may leave the mover's king
    /// in check; the checkmate evaluator relies on that to avoid recursion.
    #[must_use]
    pub fn generate_moves(&self, idx: usize, validate_king_safety: bool) -> Vec<Move> {
        let Some(piece) = self.pieces.get(idx) else {
            return Vec::new();
        };
        if piece.captured {
            return Vec::new();
        }

        let candidates = match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(idx),
            PieceKind::Knight => self.generate_knight_moves(idx),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                self.generate_slider_moves(idx)
            }
            PieceKind::King => self.generate_king_moves(idx),
        };

        if !validate_king_safety {
            return candidates;
        }

        let color = piece.color;
        candidates
            .into_iter()
            .filter(|mv| !self.play(idx, mv).is_king_attacked(color))
            .collect()
    }

    /// Every legal move of `color`, paired with the moving slot.
    #[must_use]
    pub fn legal_moves(&self, color: Color) -> Vec<(usize, Move)> {
        let mut moves = Vec::new();
        for idx in self.active(color) {
            moves.extend(self.generate_moves(idx, true).into_iter().map(|mv| (idx, mv)));
        }
        moves
    }

    /// Count leaf nodes of the legal move tree, `color` to move first.
    #[must_use]
    pub fn perft(&self, color: Color, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves(color);
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .iter()
            .map(|(idx, mv)| self.play(*idx, mv).perft(color.opponent(), depth - 1))
            .sum()
    }
}
