//! FEN rendering and parsing.
//!
//! Castling rights are not stored anywhere: they are read off the move
//! counters of the kings and rooks when rendering, and written back into those
//! counters when parsing.

use std::str::FromStr;

use super::builder::BoardBuilder;
use super::error::FenError;
use super::types::{CastleSide, Color, PieceKind, Snapshot, Square};
use super::Board;

impl Snapshot {
    /// Whether `color` may still castle on `side`, judged from move counters.
    #[must_use]
    pub fn castling_right(&self, color: Color, side: CastleSide) -> bool {
        let rank = color.back_rank();
        let king_home = self
            .king(color)
            .map(|k| &self.pieces[k])
            .map_or(false, |k| k.move_count == 0 && k.square == Square::at('E', rank));

        king_home
            && self
                .piece_of_color_at(Square::at(side.rook_file(), rank), color)
                .map(|r| &self.pieces[r])
                .map_or(false, |r| r.kind == PieceKind::Rook && r.move_count == 0)
    }

    /// Piece placement field: rank 8 first, runs of empty squares as digits.
    #[must_use]
    pub fn fen_placement(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (1..=8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 'A'..='H' {
                if let Some(idx) = self.piece_at(Square::at(file, rank)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    let piece = &self.pieces[idx];
                    row.push(piece.kind.to_fen_char(piece.color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }
        rows.join("/")
    }

    /// Full FEN for this snapshot. `plies` is the number of moves played to
    /// reach it; the full-move field is `(plies - 1) / 2 + 1`, truncated.
    #[must_use]
    pub fn to_fen(&self, active: Color, halfmove_clock: u32, plies: usize) -> String {
        let mut castling = String::new();
        for color in Color::BOTH {
            for side in CastleSide::BOTH {
                if self.castling_right(color, side) {
                    let letter = match side {
                        CastleSide::King => PieceKind::King,
                        CastleSide::Queen => PieceKind::Queen,
                    };
                    castling.push(letter.to_fen_char(color));
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        let fullmove = (plies as i64 - 1) / 2 + 1;

        format!(
            "{} {} {} {} {} {}",
            self.fen_placement(),
            active.fen_char(),
            castling,
            ep,
            halfmove_clock,
            fullmove
        )
    }
}

impl BoardBuilder {
    /// Parse a FEN string into a builder.
    ///
    /// Missing castling letters mark the matching rook as already moved. The
    /// full-move field is checked but otherwise ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount { found: ranks.len() });
        }

        let mut builder = BoardBuilder::new();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            // rank_idx < 8
            let rank = 8 - rank_idx as i8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let kind = PieceKind::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::TooManyFiles {
                        rank: rank_idx,
                        files: file + 1,
                    });
                }
                // file < 8
                let file_char = char::from(b'A' + file as u8);
                builder = builder.piece(Square::at(file_char, rank), color, kind);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };
        builder = builder.side_to_move(side);

        let mut rights = [[false; 2]; 2];
        for c in parts[2].chars() {
            match c {
                'K' => rights[0][0] = true,
                'Q' => rights[0][1] = true,
                'k' => rights[1][0] = true,
                'q' => rights[1][1] = true,
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }
        for (color, color_rights) in Color::BOTH.into_iter().zip(rights) {
            for (side, allowed) in CastleSide::BOTH.into_iter().zip(color_rights) {
                if !allowed {
                    builder = builder.moved(Square::at(side.rook_file(), color.back_rank()));
                }
            }
        }

        if parts[3] != "-" {
            let target = parts[3]
                .parse::<Square>()
                .map_err(|_| FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                })?;
            builder = builder.en_passant(target);
        }

        if let Some(halfmove) = parts.get(4) {
            let clock = halfmove.parse().map_err(|_| FenError::InvalidCounter {
                found: (*halfmove).to_string(),
            })?;
            builder = builder.halfmove_clock(clock);
        }
        if let Some(fullmove) = parts.get(5) {
            fullmove
                .parse::<u32>()
                .map_err(|_| FenError::InvalidCounter {
                    found: (*fullmove).to_string(),
                })?;
        }

        Ok(builder)
    }
}

impl Board {
    /// Parse a board position from FEN notation.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(BoardBuilder::from_fen(fen)?.build()?)
    }

    /// FEN of the displayed position.
    #[must_use]
    pub fn fen(&self) -> String {
        self.snapshot()
            .to_fen(self.team_to_move(), self.halfmove_clock(), self.cursor())
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}
