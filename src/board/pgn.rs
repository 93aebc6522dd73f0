//! PGN move text.
//!
//! Moves are rendered as in a scoresheet: "e4", "Nf3", "Rae1", "exd5",
//! "e8=Q", "O-O". The check marker ("+" or "#") depends on the position after
//! the move and is appended by the board once the move is applied.
//!
//! # Examples
//! ```
//! use duel_chess::board::{Move, Snapshot, Square};
//!
//! let snapshot = Snapshot::standard();
//! let knight = snapshot.piece_at(Square::at('G', 1)).unwrap();
//! assert_eq!(snapshot.move_to_pgn(knight, &Move::quiet(Square::at('F', 3))), "Nf3");
//! ```

use std::fmt::Write as _;

use super::types::{Color, Move, PieceKind, Snapshot};

/// One numbered row of a scoresheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PgnRecord {
    pub move_number: u32,
    pub white: Option<String>,
    pub black: Option<String>,
}

impl Snapshot {
    /// PGN text of `mv` played by the piece in slot `idx`, without the check
    /// marker.
    #[must_use]
    pub fn move_to_pgn(&self, idx: usize, mv: &Move) -> String {
        if let Some(side) = mv.castle_side() {
            return side.notation().to_string();
        }

        let piece = self.pieces[idx];
        let mut pgn = String::new();

        if piece.kind == PieceKind::Pawn {
            if mv.is_capture() {
                pgn.push(piece.square.file().to_ascii_lowercase());
            }
        } else {
            pgn.push(piece.kind.letter());
            pgn.push_str(&self.disambiguation(idx, mv));
        }

        if mv.is_capture() {
            pgn.push('x');
        }
        let _ = write!(pgn, "{}", mv.target);

        if piece.kind == PieceKind::Pawn && mv.target.rank() == piece.color.promotion_rank() {
            pgn.push('=');
            pgn.push(PieceKind::PROMOTION.letter());
        }

        pgn
    }

    /// Origin file, rank, or both, whichever tells the mover apart from every
    /// other piece of its kind and color that can reach the same square.
    fn disambiguation(&self, idx: usize, mv: &Move) -> String {
        let piece = self.pieces[idx];
        let rivals: Vec<_> = self
            .active(piece.color)
            .filter(|&other| other != idx && self.pieces[other].kind == piece.kind)
            .filter(|&other| {
                self.generate_moves(other, true)
                    .iter()
                    .any(|m| m.target == mv.target)
            })
            .map(|other| self.pieces[other].square)
            .collect();

        if rivals.is_empty() {
            return String::new();
        }

        let file = piece.square.file().to_ascii_lowercase();
        let rank = piece.square.rank();
        if rivals.iter().all(|sq| sq.file() != piece.square.file()) {
            file.to_string()
        } else if rivals.iter().all(|sq| sq.rank() != rank) {
            rank.to_string()
        } else {
            format!("{file}{rank}")
        }
    }
}

/// Group ply texts into numbered rows. A game whose first ply is Black's
/// starts with a row that has no White move.
#[must_use]
pub fn records_from_plies<'a>(
    first_to_move: Color,
    plies: impl IntoIterator<Item = &'a str>,
) -> Vec<PgnRecord> {
    let mut records: Vec<PgnRecord> = Vec::new();
    let mut color = first_to_move;

    for ply in plies {
        match color {
            Color::White => records.push(PgnRecord {
                move_number: records.len() as u32 + 1,
                white: Some(ply.to_string()),
                black: None,
            }),
            Color::Black => match records.last_mut() {
                Some(last) if last.black.is_none() => last.black = Some(ply.to_string()),
                _ => records.push(PgnRecord {
                    move_number: records.len() as u32 + 1,
                    white: None,
                    black: Some(ply.to_string()),
                }),
            },
        }
        color = color.opponent();
    }

    records
}

/// Movetext for a list of rows: `1. e4 e5 2. Nf3`.
#[must_use]
pub fn movetext(records: &[PgnRecord]) -> String {
    let mut out = String::new();
    for record in records {
        if !out.is_empty() {
            out.push(' ');
        }
        match (&record.white, &record.black) {
            (Some(white), Some(black)) => {
                let _ = write!(out, "{}. {white} {black}", record.move_number);
            }
            (Some(white), None) => {
                let _ = write!(out, "{}. {white}", record.move_number);
            }
            (None, Some(black)) => {
                let _ = write!(out, "{}... {black}", record.move_number);
            }
            (None, None) => {}
        }
    }
    out
}
