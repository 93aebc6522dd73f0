use super::super::types::{Direction, Move, Snapshot};

impl Snapshot {
    pub(crate) fn generate_pawn_moves(&self, idx: usize) -> Vec<Move> {
        let mut moves = Vec::new();
        let pawn = self.pieces[idx];
        let forward = pawn.color.forward();

        let one = pawn.square.step(forward, 1);
        if one.is_valid() && self.piece_at(one).is_none() {
            moves.push(Move::quiet(one));

            let two = pawn.square.step(forward, 2);
            if pawn.square.rank() == pawn.color.pawn_home_rank() && self.piece_at(two).is_none() {
                moves.push(Move::two_square(two));
            }
        }

        for side in [Direction::Left, Direction::Right] {
            let beside = pawn.square.step(side, 1);
            let target = beside.step(forward, 1);
            if !target.is_valid() {
                continue;
            }

            if let Some(victim) = self.piece_at(target) {
                if self.pieces[victim].is_opposite(pawn.color) {
                    moves.push(Move::capture(target, victim));
                }
            } else if self.en_passant == Some(target) {
                // The pawn to take sits beside us, not on the target square.
                let victim = self
                    .piece_at(beside)
                    .filter(|&v| self.pieces[v].is_opposite(pawn.color));
                if let Some(victim) = victim {
                    moves.push(Move::capture(target, victim));
                }
            }
        }

        moves
    }
}
