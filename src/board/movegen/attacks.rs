//! Attack detection.
//!
//! Works backwards from the target square: each movement pattern is projected
//! from the square, and the square is attacked if a piece of the attacking
//! color with that pattern sits at the projected location.

use super::super::types::{Color, Direction, PieceKind, Snapshot, Square};

impl Snapshot {
    /// Whether any piece of `by` attacks `square`.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        let occupant = |sq: Square| {
            self.piece_of_color_at(sq, by)
                .map(|idx| self.pieces[idx].kind)
        };

        // Pawns capture forward-diagonally, so look one rank back.
        let forward = by.forward();
        for side in [Direction::Left, Direction::Right] {
            let from = square.step(side, 1).step(forward, -1);
            if from.is_valid() && occupant(from) == Some(PieceKind::Pawn) {
                return true;
            }
        }

        if Snapshot::knight_offsets().iter().any(|&(df, dr)| {
            let from = square.offset(df, dr);
            from.is_valid() && occupant(from) == Some(PieceKind::Knight)
        }) {
            return true;
        }

        for direction in Direction::ALL {
            let mut distance = 1;
            loop {
                let from = square.step(direction, distance);
                if !from.is_valid() {
                    break;
                }
                let Some(idx) = self.piece_at(from) else {
                    distance += 1;
                    continue;
                };
                let piece = &self.pieces[idx];
                if piece.color == by {
                    let hits = match piece.kind {
                        PieceKind::King => distance == 1,
                        PieceKind::Queen => true,
                        PieceKind::Rook => !direction.is_diagonal(),
                        PieceKind::Bishop => direction.is_diagonal(),
                        PieceKind::Pawn | PieceKind::Knight => false,
                    };
                    if hits {
                        return true;
                    }
                }
                break;
            }
        }

        false
    }
}
