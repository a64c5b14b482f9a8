//! Board representation: piece-kind and side bitboards plus game state.
//!
//! The board is a plain `Copy` value. Move execution clones it and edits
//! the clone, so callers never need an undo stack.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::fen::STARTING_FEN;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// A chess position.
///
/// Piece placement is split into one bitboard per piece kind and one per
/// side. The zobrist hash is kept incrementally up to date by every
/// mutation and always agrees with hashing from scratch.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: [Bitboard; PieceKind::COUNT],
    pub(crate) sides: [Bitboard; Color::COUNT],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) hash: u64,
}

impl Board {
    /// The standard starting position.
    pub fn starting_position() -> Board {
        STARTING_FEN
            .parse()
            .expect("starting position FEN is valid")
    }

    /// Assemble a board from parsed parts. The hash is computed here so
    /// callers cannot hand in a stale one.
    pub(crate) fn from_raw(
        pieces: [Bitboard; PieceKind::COUNT],
        sides: [Bitboard; Color::COUNT],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Board {
        let mut board = Board {
            pieces,
            sides,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            hash: 0,
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    // --- Accessors ---

    /// All pieces of `kind`, both colors.
    #[inline]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// All pieces of `color`.
    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.sides[color.index()]
    }

    /// Pieces of one kind belonging to one side.
    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()] & self.sides[color.index()]
    }

    /// Every occupied square.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.sides[Color::White.index()] | self.sides[Color::Black.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// The en passant target square, if the last move was a double push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist hash of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// The piece standing on `sq`, if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        let color = if self.sides[Color::White.index()].contains(sq) {
            Color::White
        } else if self.sides[Color::Black.index()].contains(sq) {
            Color::Black
        } else {
            return None;
        };
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()].contains(sq))
            .map(|kind| Piece::new(kind, color))
    }

    /// The kind of the piece on `sq`, ignoring its color.
    pub fn piece_kind_on(&self, sq: Square) -> Option<PieceKind> {
        if !self.occupied().contains(sq) {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()].contains(sq))
    }

    /// The square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, PieceKind::King)
            .lsb()
            .expect("board must have a king for each side")
    }

    /// Flip `piece` on or off at `sq`, keeping the hash in step.
    pub(crate) fn toggle_piece(&mut self, piece: Piece, sq: Square) {
        let bit = sq.bitboard();
        self.pieces[piece.kind().index()] ^= bit;
        self.sides[piece.color().index()] ^= bit;
        self.hash ^= zobrist::PIECE_SQUARE[piece.index()][sq.index()];
    }

    /// Check the structural invariants of the piece placement.
    pub fn validate(&self) -> Result<(), BoardError> {
        if (self.sides[0] & self.sides[1]).is_nonempty() {
            return Err(BoardError::InconsistentSides);
        }

        let mut union = Bitboard::EMPTY;
        for kind in PieceKind::ALL {
            if (self.pieces[kind.index()] & union).is_nonempty() {
                return Err(BoardError::OverlappingPieces);
            }
            union |= self.pieces[kind.index()];
        }
        if union != self.occupied() {
            return Err(BoardError::InconsistentOccupied);
        }

        for color in Color::ALL {
            let kings = self.pieces_of(color, PieceKind::King).count();
            if kings != 1 {
                let name = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(BoardError::InvalidKingCount { color: name, count: kings });
            }
        }

        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
        if (self.pieces[PieceKind::Pawn.index()] & back_ranks).is_nonempty() {
            return Err(BoardError::PawnsOnBackRank);
        }

        Ok(())
    }

    /// Human-readable rendering for diagnostics.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({self})")
    }
}

/// Wrapper whose `Display` draws the board as an ASCII diagram.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0u8..8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                match self.0.piece_on(sq) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{}", self.0)
    }
}
