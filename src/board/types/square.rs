//! Square types and directional stepping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Raw board coordinate: a file letter (`'A'..='H'`) and a rank (`1..=8`).
///
/// A `Position` carries no validity guarantee; stepping off the board yields
/// coordinates outside those ranges, which [`Square::is_valid`] rejects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: char,
    pub rank: i8,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(file: char, rank: i8) -> Self {
        Position { file, rank }
    }
}

/// One of the eight compass directions a piece can travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Direction {
    /// Rook directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::LeftUp,
        Direction::RightUp,
        Direction::RightDown,
        Direction::LeftDown,
    ];

    /// Queen and king directions.
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::LeftUp,
        Direction::Up,
        Direction::RightUp,
        Direction::Right,
        Direction::RightDown,
        Direction::Down,
        Direction::LeftDown,
    ];

    /// File and rank delta of a single step.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::LeftUp => (-1, 1),
            Direction::LeftDown => (-1, -1),
            Direction::RightUp => (1, 1),
            Direction::RightDown => (1, -1),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::LeftUp | Direction::LeftDown | Direction::RightUp | Direction::RightDown
        )
    }
}

/// A square on the chess board.
///
/// Squares compare equal iff their positions do. Translation never fails;
/// the result may lie off the board, so callers test [`Square::is_valid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square {
    pub position: Position,
}

impl Square {
    /// Create a square from an uppercase file letter and a rank.
    #[inline]
    #[must_use]
    pub const fn at(file: char, rank: i8) -> Self {
        Square {
            position: Position::new(file, rank),
        }
    }

    /// Create a square from its linear index (a1=0, b1=1, ..., h8=63).
    #[must_use]
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= 64 {
            return None;
        }
        // idx < 64, so both casts are lossless
        let file = char::from(b'A' + (idx % 8) as u8);
        Some(Square::at(file, (idx / 8) as i8 + 1))
    }

    #[inline]
    #[must_use]
    pub const fn file(self) -> char {
        self.position.file
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> i8 {
        self.position.rank
    }

    /// File as a zero-based column (A=0). Only meaningful for valid squares.
    #[inline]
    #[must_use]
    pub fn file_index(self) -> i8 {
        self.position.file as i8 - b'A' as i8
    }

    /// Linear index `(file - A) + 8 * (rank - 1)`.
    ///
    /// Returns `None` for off-board squares.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        Some(self.file_index() as usize + 8 * (self.rank() as usize - 1))
    }

    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        ('A'..='H').contains(&self.position.file) && (1..=8).contains(&self.position.rank)
    }

    /// Translate by a raw file/rank offset.
    #[must_use]
    pub fn offset(self, files: i8, ranks: i8) -> Self {
        let code = i16::from(self.position.file as u8) + i16::from(files);
        // Anything that cannot be a byte is far off the board anyway.
        let file = u8::try_from(code).map_or('\0', char::from);
        Square::at(file, self.position.rank.saturating_add(ranks))
    }

    /// Translate `distance` steps in `direction`.
    #[inline]
    #[must_use]
    pub fn step(self, direction: Direction, distance: i8) -> Self {
        let (df, dr) = direction.delta();
        self.offset(df * distance, dr * distance)
    }

    #[inline]
    #[must_use]
    pub fn left(self, distance: i8) -> Self {
        self.step(Direction::Left, distance)
    }

    #[inline]
    #[must_use]
    pub fn right(self, distance: i8) -> Self {
        self.step(Direction::Right, distance)
    }

    #[inline]
    #[must_use]
    pub fn up(self, distance: i8) -> Self {
        self.step(Direction::Up, distance)
    }

    #[inline]
    #[must_use]
    pub fn down(self, distance: i8) -> Self {
        self.step(Direction::Down, distance)
    }

    #[inline]
    #[must_use]
    pub fn left_up(self, distance: i8) -> Self {
        self.step(Direction::LeftUp, distance)
    }

    #[inline]
    #[must_use]
    pub fn left_down(self, distance: i8) -> Self {
        self.step(Direction::LeftDown, distance)
    }

    #[inline]
    #[must_use]
    pub fn right_up(self, distance: i8) -> Self {
        self.step(Direction::RightUp, distance)
    }

    #[inline]
    #[must_use]
    pub fn right_down(self, distance: i8) -> Self {
        self.step(Direction::RightDown, distance)
    }

    /// Iterate every valid square, a1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.position.file.to_ascii_lowercase(),
            self.position.rank
        )
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }

        let file = chars[0].to_ascii_uppercase();
        if !('A'..='H').contains(&file) {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }

        let rank = match chars[1].to_digit(10) {
            Some(r @ 1..=8) => r as i8,
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };

        Ok(Square::at(file, rank))
    }
}
