//! Error types for chess board operations.

use thiserror::Error;

use super::types::{Color, PieceKind, Square};

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Invalid algebraic notation
    #[error("Invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    #[error("FEN must have at least 4 parts, found {found}")]
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    #[error("Invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    /// Invalid castling character
    #[error("Invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    #[error("Invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    #[error("Invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// Wrong number of ranks in the placement field
    #[error("FEN placement must have 8 ranks, found {found}")]
    InvalidRankCount { found: usize },
    /// Too many files in a rank
    #[error("Too many files ({files}) in rank {rank}")]
    TooManyFiles { rank: usize, files: usize },
    /// Halfmove or fullmove field is not a number
    #[error("Invalid move counter '{found}'")]
    InvalidCounter { found: String },
    /// The position itself is not playable
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Error type for coordinate move parsing failures ("e2e4")
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    #[error("Move must be 4-5 characters, found {len}")]
    InvalidLength { len: usize },
    /// Invalid square notation in move
    #[error("Invalid square notation in '{notation}'")]
    InvalidSquare { notation: String },
    /// Promotion suffix other than the queen
    #[error("Invalid promotion piece '{char}', pawns always promote to a queen")]
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    #[error("Illegal move '{notation}'")]
    IllegalMove { notation: String },
}

/// Violations of board invariants and misuse of the board API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A board must hold exactly 32 piece slots
    #[error("Board must hold 32 pieces, found {found}")]
    PieceCount { found: usize },
    /// Each color needs exactly one king
    #[error("{color} must have exactly one king, found {found}")]
    KingCount { color: Color, found: usize },
    /// Two active pieces on one square
    #[error("Square {square} is occupied twice")]
    DoubleOccupancy { square: Square },
    /// Piece slot does not exist
    #[error("No piece in slot {index}")]
    PieceIndex { index: usize },
    /// Scroll target beyond the recorded history
    #[error("Cannot scroll to move {index}, history has {len} moves")]
    ScrollOutOfRange { index: usize, len: usize },
    /// Moves are only accepted on the latest position
    #[error("Board is not at the latest position")]
    NotAtLastPosition,
    /// Game already ended in checkmate or stalemate
    #[error("Game is finished")]
    GameFinished,
    /// Piece belongs to the side not on move
    #[error("It is not {color}'s turn")]
    WrongTeam { color: Color },
    /// Move is not in the piece's legal-move list
    #[error("Illegal move to {target}")]
    IllegalMove { target: Square },
    /// Take-back with an empty history
    #[error("No move to take back")]
    NothingToTakeBack,
}

/// Problems with a move received from the remote peer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Payload could not be decoded
    #[error("Malformed payload: {reason}")]
    Malformed { reason: String },
    /// No live piece matches the transmitted snapshot
    #[error("Unknown piece: {kind} on {square}")]
    UnknownPiece { kind: PieceKind, square: Square },
    /// The transmitted move is not legal for that piece
    #[error("Illegal remote move to {target}")]
    IllegalMove { target: Square },
    /// A move arrived before the game was set up
    #[error("Move received before the game was initialized")]
    NotInitialized,
    /// The local board refused the move for another reason
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_too_few_parts() {
        let err = FenError::TooFewParts { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_fen_error_wraps_board_error() {
        let err: FenError = BoardError::KingCount {
            color: Color::Black,
            found: 0,
        }
        .into();
        assert_eq!(err.to_string(), "Black must have exactly one king, found 0");
    }

    #[test]
    fn test_move_error_illegal_move() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_board_error_messages() {
        let err = BoardError::ScrollOutOfRange { index: 9, len: 4 };
        assert!(err.to_string().contains('9'));
        assert!(err.to_string().contains('4'));

        let err = BoardError::IllegalMove {
            target: Square::at('E', 5),
        };
        assert!(err.to_string().contains("e5"));
    }

    #[test]
    fn test_protocol_error_messages() {
        let err = ProtocolError::UnknownPiece {
            kind: PieceKind::Knight,
            square: Square::at('C', 3),
        };
        assert_eq!(err.to_string(), "Unknown piece: knight on c3");
    }
}
