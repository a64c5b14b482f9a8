//! Error types for board construction and FEN parsing.

use std::error::Error;
use std::fmt;

/// Reasons a FEN string fails to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN must have exactly six whitespace-separated fields.
    WrongFieldCount { found: usize },
    /// The placement field must describe exactly eight ranks.
    WrongRankCount { found: usize },
    /// A rank described more or fewer than eight squares.
    BadRankLength { rank_index: usize, length: usize },
    /// A character in the placement field is not a piece or digit.
    InvalidPieceChar { character: char },
    /// The active-color field was neither `w` nor `b`.
    InvalidColor { found: String },
    /// The castling field contained an unknown character.
    InvalidCastlingChar { character: char },
    /// The en passant field was neither `-` nor a square.
    InvalidEnPassant { found: String },
    /// A move counter field was not a non-negative integer.
    InvalidMoveCounter { field: &'static str, found: String },
    /// The parsed position failed structural validation.
    InvalidBoard { source: BoardError },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "expected 6 FEN fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "expected 8 ranks in placement field, found {found}")
            }
            FenError::BadRankLength { rank_index, length } => {
                write!(
                    f,
                    "rank {} describes {length} squares instead of 8",
                    8 - rank_index
                )
            }
            FenError::InvalidPieceChar { character } => {
                write!(f, "invalid piece character {character:?}")
            }
            FenError::InvalidColor { found } => {
                write!(f, "invalid active color {found:?}")
            }
            FenError::InvalidCastlingChar { character } => {
                write!(f, "invalid castling character {character:?}")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square {found:?}")
            }
            FenError::InvalidMoveCounter { field, found } => {
                write!(f, "invalid {field} {found:?}")
            }
            FenError::InvalidBoard { source } => {
                write!(f, "invalid board: {source}")
            }
        }
    }
}

impl Error for FenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FenError::InvalidBoard { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BoardError> for FenError {
    fn from(source: BoardError) -> FenError {
        FenError::InvalidBoard { source }
    }
}

/// Structural problems with a board position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{color} must have exactly one king, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },
    #[error("pawns may not stand on the first or eighth rank")]
    PawnsOnBackRank,
    #[error("two pieces occupy the same square")]
    OverlappingPieces,
    #[error("occupied bitboard disagrees with piece bitboards")]
    InconsistentOccupied,
    #[error("side bitboards overlap")]
    InconsistentSides,
}
