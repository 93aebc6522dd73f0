use super::super::types::{CastleSide, Direction, Move, PieceKind, Snapshot, Square};

impl Snapshot {
    pub(crate) fn generate_king_moves(&self, idx: usize) -> Vec<Move> {
        let from = self.pieces[idx].square;
        let mut moves = self.step_moves(idx, Direction::ALL.iter().map(|&d| from.step(d, 1)));

        for side in CastleSide::BOTH {
            if self.can_castle(idx, side) {
                let rank = self.pieces[idx].color.back_rank();
                moves.push(Move::castle(Square::at(side.king_target_file(), rank)));
            }
        }

        moves
    }

    /// Castling eligibility for the king in slot `idx`: neither king nor rook
    /// has moved, the squares between them are empty, and no square the king
    /// stands on or crosses is attacked.
    pub(crate) fn can_castle(&self, idx: usize, side: CastleSide) -> bool {
        let king = self.pieces[idx];
        let rank = king.color.back_rank();
        if king.move_count != 0 || king.square != Square::at('E', rank) {
            return false;
        }

        let rook_home = Square::at(side.rook_file(), rank);
        let rook_ready = self.piece_of_color_at(rook_home, king.color).map_or(false, |r| {
            let rook = &self.pieces[r];
            rook.kind == PieceKind::Rook && rook.move_count == 0
        });
        if !rook_ready {
            return false;
        }

        if side
            .between_files()
            .iter()
            .any(|&file| self.piece_at(Square::at(file, rank)).is_some())
        {
            return false;
        }

        let enemy = king.color.opponent();
        !side
            .transit_files()
            .iter()
            .any(|&file| self.is_square_attacked(Square::at(file, rank), enemy))
    }
}
