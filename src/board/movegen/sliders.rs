use super::super::types::{Move, Snapshot};

impl Snapshot {
    /// Ray-cast along the piece's directions until the first occupied square.
    pub(crate) fn generate_slider_moves(&self, idx: usize) -> Vec<Move> {
        let mut moves = Vec::new();
        let piece = self.pieces[idx];

        for &direction in piece.kind.slide_directions() {
            let mut distance = 1;
            loop {
                let target = piece.square.step(direction, distance);
                if !target.is_valid() {
                    break;
                }
                match self.piece_at(target) {
                    None => moves.push(Move::quiet(target)),
                    Some(victim) => {
                        if self.pieces[victim].is_opposite(piece.color) {
                            moves.push(Move::capture(target, victim));
                        }
                        break;
                    }
                }
                distance += 1;
            }
        }

        moves
    }
}
