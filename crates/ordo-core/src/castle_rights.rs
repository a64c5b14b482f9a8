//! Castling rights flags.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::color::Color;
use crate::error::FenError;

/// Which wing a castling move is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

/// Castling availability for both sides, packed into four bits.
///
/// Bit 0 = white kingside, bit 1 = white queenside, bit 2 = black
/// kingside, bit 3 = black queenside.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling available.
    pub const NONE: CastleRights = CastleRights(0);

    /// All four castling moves available.
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    /// Rights from a raw 4-bit mask (extra bits are dropped).
    #[inline]
    pub const fn new(mask: u8) -> CastleRights {
        CastleRights(mask & 0b1111)
    }

    /// The raw 4-bit mask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// `true` if no right is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every right in `other` is also set here.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of the two right sets.
    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// These rights with every right in `other` cleared.
    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// `true` if `color` may still castle on `side`.
    pub fn has(self, color: Color, side: CastleSide) -> bool {
        let wanted = match (color, side) {
            (Color::White, CastleSide::King) => CastleRights::WHITE_KING,
            (Color::White, CastleSide::Queen) => CastleRights::WHITE_QUEEN,
            (Color::Black, CastleSide::King) => CastleRights::BLACK_KING,
            (Color::Black, CastleSide::Queen) => CastleRights::BLACK_QUEEN,
        };
        self.contains(wanted)
    }

    /// These rights with both of `color`'s rights cleared.
    pub fn remove_color(self, color: Color) -> CastleRights {
        match color {
            Color::White => self.remove(CastleRights::WHITE_BOTH),
            Color::Black => self.remove(CastleRights::BLACK_BOTH),
        }
    }

    /// Parse the FEN castling field (`KQkq` subset or `-`).
    pub fn from_fen(field: &str) -> Result<CastleRights, FenError> {
        if field == "-" {
            return Ok(CastleRights::NONE);
        }
        let mut rights = CastleRights::NONE;
        for c in field.chars() {
            let flag = match c {
                'K' => CastleRights::WHITE_KING,
                'Q' => CastleRights::WHITE_QUEEN,
                'k' => CastleRights::BLACK_KING,
                'q' => CastleRights::BLACK_QUEEN,
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            rights = rights.insert(flag);
        }
        Ok(rights)
    }

    /// FEN castling field for these rights.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut out = String::new();
        if self.contains(CastleRights::WHITE_KING) {
            out.push('K');
        }
        if self.contains(CastleRights::WHITE_QUEEN) {
            out.push('Q');
        }
        if self.contains(CastleRights::BLACK_KING) {
            out.push('k');
        }
        if self.contains(CastleRights::BLACK_QUEEN) {
            out.push('q');
        }
        out
    }
}

impl BitAnd for CastleRights {
    type Output = CastleRights;
    #[inline]
    fn bitand(self, rhs: CastleRights) -> CastleRights {
        CastleRights(self.0 & rhs.0)
    }
}

impl BitOr for CastleRights {
    type Output = CastleRights;
    #[inline]
    fn bitor(self, rhs: CastleRights) -> CastleRights {
        CastleRights(self.0 | rhs.0)
    }
}

impl Not for CastleRights {
    type Output = CastleRights;
    #[inline]
    fn not(self) -> CastleRights {
        CastleRights(!self.0 & 0b1111)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fen_all_and_none() {
        assert_eq!(CastleRights::from_fen("KQkq").unwrap(), CastleRights::ALL);
        assert_eq!(CastleRights::from_fen("-").unwrap(), CastleRights::NONE);
    }

    #[test]
    fn from_fen_partial() {
        let rights = CastleRights::from_fen("Kq").unwrap();
        assert!(rights.contains(CastleRights::WHITE_KING));
        assert!(!rights.contains(CastleRights::WHITE_QUEEN));
        assert!(!rights.contains(CastleRights::BLACK_KING));
        assert!(rights.contains(CastleRights::BLACK_QUEEN));
    }

    #[test]
    fn from_fen_rejects_unknown() {
        assert!(CastleRights::from_fen("X").is_err());
        assert!(CastleRights::from_fen("KQx").is_err());
    }

    #[test]
    fn to_fen_roundtrip() {
        for bits in 0..16u8 {
            let rights = CastleRights::new(bits);
            assert_eq!(CastleRights::from_fen(&rights.to_fen()).unwrap(), rights);
        }
    }

    #[test]
    fn remove_color_clears_both_wings() {
        let rights = CastleRights::ALL.remove_color(Color::White);
        assert_eq!(rights, CastleRights::BLACK_BOTH);
        assert!(!rights.has(Color::White, CastleSide::King));
        assert!(rights.has(Color::Black, CastleSide::Queen));
    }

    #[test]
    fn insert_and_remove() {
        let rights = CastleRights::NONE
            .insert(CastleRights::WHITE_KING)
            .insert(CastleRights::BLACK_QUEEN);
        assert!(rights.has(Color::White, CastleSide::King));
        assert!(rights.has(Color::Black, CastleSide::Queen));
        assert_eq!(
            rights.remove(CastleRights::WHITE_KING),
            CastleRights::BLACK_QUEEN
        );
    }
}
