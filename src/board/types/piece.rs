//! Piece kind and color types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::square::Direction;

/// Chess piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in index order
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The piece every promoting pawn becomes.
    pub const PROMOTION: PieceKind = PieceKind::Queen;

    /// Parse a piece from a letter (p, n, b, r, q, k), either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Uppercase letter used by both notations (P, N, B, R, Q, K).
    #[inline]
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    #[inline]
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.letter(),
            Color::Black => self.letter().to_ascii_lowercase(),
        }
    }

    /// Ray directions for sliding pieces; empty for everything else.
    #[must_use]
    pub fn slide_directions(self) -> &'static [Direction] {
        match self {
            PieceKind::Bishop => &Direction::DIAGONAL,
            PieceKind::Rook => &Direction::ORTHOGONAL,
            PieceKind::Queen => &Direction::ALL,
            _ => &[],
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors (White first)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank the pieces of this color start on (1 for White, 8 for Black)
    #[inline]
    #[must_use]
    pub const fn back_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    /// Pawn home rank (2 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub const fn pawn_home_rank(self) -> i8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    /// Rank on which pawns of this color promote
    #[inline]
    #[must_use]
    pub const fn promotion_rank(self) -> i8 {
        self.opponent().back_rank()
    }

    /// Direction pawns of this color advance in
    #[inline]
    #[must_use]
    pub const fn forward(self) -> Direction {
        match self {
            Color::White => Direction::Up,
            Color::Black => Direction::Down,
        }
    }

    /// FEN active-color letter
    #[inline]
    #[must_use]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
