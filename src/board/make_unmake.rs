//! Building, applying and reverting move-effect packs.
//!
//! A pack is built once from a [`Move`] and the position it is played in, and
//! from then on it is the only thing that changes pieces. The same pack drives
//! both snapshots and the live board, so a replayed history and the live
//! position cannot drift apart.

use super::types::{Move, MoveEffect, MoveEffectPack, PieceKind, PieceRecord, Snapshot, Square};

impl PieceRecord {
    /// Apply one effect addressed to this piece.
    pub fn apply_effect(&mut self, effect: &MoveEffect) {
        self.kind = effect.kind_after;
        self.relocate(effect.end);
        if effect.captured {
            self.captured = true;
        }
    }

    /// Revert one effect previously applied to this piece.
    pub fn revert_effect(&mut self, effect: &MoveEffect) {
        if effect.captured {
            self.captured = false;
        }
        self.kind = effect.kind_before;
        if effect.is_relocation() {
            self.square = effect.start;
            self.move_count = self.move_count.saturating_sub(1);
        }
    }
}

impl Snapshot {
    /// Translate a move of the piece in slot `idx` into its effects: the main
    /// relocation, capture marking, the rook's castling co-move, and promotion
    /// to a queen, in that order.
    #[must_use]
    pub fn build_pack(&self, idx: usize, mv: &Move) -> MoveEffectPack {
        let piece = self.pieces[idx];
        let mut pack = MoveEffectPack::new();

        pack.push(MoveEffect {
            piece: idx,
            kind_before: piece.kind,
            kind_after: piece.kind,
            start: piece.square,
            end: mv.target,
            color: piece.color,
            captured: false,
        });

        if let Some(victim) = mv.capture {
            let taken = self.pieces[victim];
            pack.push(MoveEffect {
                piece: victim,
                kind_before: taken.kind,
                kind_after: taken.kind,
                start: taken.square,
                end: taken.square,
                color: taken.color,
                captured: true,
            });
        }

        if let Some(side) = mv.castle_side() {
            let rank = piece.color.back_rank();
            let home = Square::at(side.rook_file(), rank);
            if let Some(rook) = self.piece_of_color_at(home, piece.color) {
                pack.push(MoveEffect {
                    piece: rook,
                    kind_before: PieceKind::Rook,
                    kind_after: PieceKind::Rook,
                    start: home,
                    end: Square::at(side.rook_target_file(), rank),
                    color: piece.color,
                    captured: false,
                });
            }
        }

        if piece.kind == PieceKind::Pawn && mv.target.rank() == piece.color.promotion_rank() {
            pack.push(MoveEffect {
                piece: idx,
                kind_before: PieceKind::Pawn,
                kind_after: PieceKind::PROMOTION,
                start: mv.target,
                end: mv.target,
                color: piece.color,
                captured: false,
            });
        }

        pack
    }

    /// Apply every effect of `pack` and update the en-passant square.
    pub fn do_pack(&mut self, pack: &MoveEffectPack) {
        for effect in pack.effects() {
            self.pieces[effect.piece].apply_effect(effect);
        }
        self.en_passant = pack.en_passant_square();
    }

    /// Revert `pack` in reverse order, restoring the en-passant square that
    /// was current before it.
    pub fn undo_pack(&mut self, pack: &MoveEffectPack, en_passant_before: Option<Square>) {
        for effect in pack.effects().iter().rev() {
            self.pieces[effect.piece].revert_effect(effect);
        }
        self.en_passant = en_passant_before;
    }

    /// The position after the piece in slot `idx` plays `mv`, on a copy.
    #[must_use]
    pub fn play(&self, idx: usize, mv: &Move) -> Snapshot {
        let pack = self.build_pack(idx, mv);
        let mut next = self.clone();
        next.do_pack(&pack);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::Color;

    #[test]
    fn test_quiet_pack_has_single_effect() {
        let snapshot = Snapshot::standard();
        let g1 = snapshot.piece_at(Square::at('G', 1)).unwrap();
        let pack = snapshot.build_pack(g1, &Move::quiet(Square::at('F', 3)));
        assert_eq!(pack.len(), 1);
        assert!(!pack.is_capture());
        assert_eq!(pack.en_passant_square(), None);
    }

    #[test]
    fn test_two_square_advance_sets_en_passant() {
        let snapshot = Snapshot::standard();
        let e2 = snapshot.piece_at(Square::at('E', 2)).unwrap();
        let next = snapshot.play(e2, &Move::two_square(Square::at('E', 4)));
        assert_eq!(next.en_passant, Some(Square::at('E', 3)));
        assert_eq!(next.pieces[e2].move_count, 1);

        let g8 = next.piece_at(Square::at('G', 8)).unwrap();
        let after = next.play(g8, &Move::quiet(Square::at('F', 6)));
        assert_eq!(after.en_passant, None);
    }

    #[test]
    fn test_do_undo_restores_snapshot() {
        let mut snapshot = Snapshot::standard();
        let before = snapshot.clone();
        let e2 = snapshot.piece_at(Square::at('E', 2)).unwrap();
        let pack = snapshot.build_pack(e2, &Move::two_square(Square::at('E', 4)));

        snapshot.do_pack(&pack);
        assert_ne!(snapshot, before);
        snapshot.undo_pack(&pack, None);
        assert_eq!(snapshot, before);
        assert_eq!(snapshot.pieces[e2].move_count, 0);
    }

    #[test]
    fn test_capture_marker_does_not_count_as_move() {
        let mut pawn = PieceRecord::new(Square::at('D', 5), PieceKind::Pawn, Color::Black);
        let marker = MoveEffect {
            piece: 0,
            kind_before: PieceKind::Pawn,
            kind_after: PieceKind::Pawn,
            start: pawn.square,
            end: pawn.square,
            color: Color::Black,
            captured: true,
        };
        pawn.apply_effect(&marker);
        assert!(pawn.captured);
        assert_eq!(pawn.move_count, 0);
        pawn.revert_effect(&marker);
        assert!(!pawn.captured);
        assert_eq!(pawn.move_count, 0);
    }
}
