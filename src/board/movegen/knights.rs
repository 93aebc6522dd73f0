use super::super::types::{Move, Snapshot, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

impl Snapshot {
    pub(crate) fn generate_knight_moves(&self, idx: usize) -> Vec<Move> {
        let from = self.pieces[idx].square;
        let targets = KNIGHT_OFFSETS.iter().map(|&(df, dr)| from.offset(df, dr));
        self.step_moves(idx, targets)
    }

    /// Single-step targets shared by knights and kings: any valid square not
    /// held by a piece of the mover's color.
    pub(crate) fn step_moves(&self, idx: usize, targets: impl Iterator<Item = Square>) -> Vec<Move> {
        let color = self.pieces[idx].color;
        targets
            .filter(|sq| sq.is_valid())
            .filter_map(|sq| match self.piece_at(sq) {
                None => Some(Move::quiet(sq)),
                Some(victim) if self.pieces[victim].is_opposite(color) => {
                    Some(Move::capture(sq, victim))
                }
                Some(_) => None,
            })
            .collect()
    }

    pub(crate) fn knight_offsets() -> &'static [(i8, i8)] {
        &KNIGHT_OFFSETS
    }
}
