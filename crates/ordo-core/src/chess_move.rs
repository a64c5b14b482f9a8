//! Compact move encoding.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A chess move packed into 16 bits.
///
/// Bits 0-5 hold the source square, bits 6-11 the destination, bits
/// 12-13 the promotion piece, and bits 14-15 the move kind. The all-zero
/// value is reserved for [`Move::NULL`], which cannot collide with a real
/// move because no legal move has equal source and destination.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

/// What special handling a move needs when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// The piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotionPiece {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PromotionPiece {
    /// All promotion pieces, knight first.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Knight,
        PromotionPiece::Bishop,
        PromotionPiece::Rook,
        PromotionPiece::Queen,
    ];

    /// The under-promotion pieces: everything except the queen.
    pub const UNDER: [PromotionPiece; 3] = [
        PromotionPiece::Knight,
        PromotionPiece::Bishop,
        PromotionPiece::Rook,
    ];

    /// The corresponding [`PieceKind`].
    pub fn to_piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }

    /// Lowercase UCI suffix character.
    pub fn uci_char(self) -> char {
        match self {
            PromotionPiece::Knight => 'n',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Queen => 'q',
        }
    }
}

const DST_SHIFT: u16 = 6;
const PROMO_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;

const SRC_MASK: u16 = 0x003F;
const DST_MASK: u16 = 0x0FC0;
const FROM_TO_MASK: u16 = 0x0FFF;
const PROMO_MASK: u16 = 0x3000;

impl Move {
    /// The null move. Displays as `0000` in UCI form.
    pub const NULL: Move = Move(0);

    /// A normal move from `src` to `dst`.
    #[inline]
    pub fn new(src: Square, dst: Square) -> Move {
        Move(src.index() as u16 | ((dst.index() as u16) << DST_SHIFT))
    }

    /// A promotion from `src` to `dst`.
    #[inline]
    pub fn new_promotion(src: Square, dst: Square, promo: PromotionPiece) -> Move {
        Move(
            src.index() as u16
                | ((dst.index() as u16) << DST_SHIFT)
                | ((promo as u16) << PROMO_SHIFT)
                | ((MoveKind::Promotion as u16) << KIND_SHIFT),
        )
    }

    /// An en passant capture landing on `dst`.
    #[inline]
    pub fn new_en_passant(src: Square, dst: Square) -> Move {
        Move(
            src.index() as u16
                | ((dst.index() as u16) << DST_SHIFT)
                | ((MoveKind::EnPassant as u16) << KIND_SHIFT),
        )
    }

    /// A castling move given the king's start and end squares.
    #[inline]
    pub fn new_castle(king_src: Square, king_dst: Square) -> Move {
        Move(
            king_src.index() as u16
                | ((king_dst.index() as u16) << DST_SHIFT)
                | ((MoveKind::Castling as u16) << KIND_SHIFT),
        )
    }

    /// Source square.
    #[inline]
    pub fn source(self) -> Square {
        Square::from_index_unchecked((self.0 & SRC_MASK) as u8)
    }

    /// Destination square. For castling this is the king's destination.
    #[inline]
    pub fn dest(self) -> Square {
        Square::from_index_unchecked(((self.0 & DST_MASK) >> DST_SHIFT) as u8)
    }

    /// Combined source and destination bits as an index in 0..4096.
    ///
    /// Main history tables are indexed by this value, so two moves that
    /// share squares but differ in kind (e.g. a push promotion and the
    /// plain push) share an entry.
    #[inline]
    pub fn from_to(self) -> usize {
        (self.0 & FROM_TO_MASK) as usize
    }

    /// The move kind.
    #[inline]
    pub fn kind(self) -> MoveKind {
        match self.0 >> KIND_SHIFT {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    /// The promotion piece. Only meaningful when [`Move::is_promotion`].
    #[inline]
    pub fn promotion_piece(self) -> PromotionPiece {
        match (self.0 & PROMO_MASK) >> PROMO_SHIFT {
            0 => PromotionPiece::Knight,
            1 => PromotionPiece::Bishop,
            2 => PromotionPiece::Rook,
            _ => PromotionPiece::Queen,
        }
    }

    /// `true` for the null move.
    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// `true` for promotions of any piece.
    #[inline]
    pub fn is_promotion(self) -> bool {
        self.kind() == MoveKind::Promotion
    }

    /// `true` for en passant captures.
    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.kind() == MoveKind::EnPassant
    }

    /// `true` for castling moves.
    #[inline]
    pub fn is_castle(self) -> bool {
        self.kind() == MoveKind::Castling
    }

    /// UCI long algebraic form, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        let mut out = format!("{}{}", self.source(), self.dest());
        if self.is_promotion() {
            out.push(self.promotion_piece().uci_char());
        }
        out
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} kind={:?})", self.to_uci(), self.kind())
    }
}
