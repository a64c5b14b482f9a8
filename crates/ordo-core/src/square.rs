//! Board square type using little-endian rank-file indexing.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::file::File;
use crate::rank::Rank;

/// A square of the board, indexed 0..64 with A1 = 0 and H8 = 63.
///
/// The index advances file-first: A1, B1, .. H1, A2, and so on. The inner
/// value is always in range; constructors enforce it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Number of squares.
    pub const COUNT: usize = 64;

    /// Build a square from rank and file.
    #[inline]
    pub fn new(rank: Rank, file: File) -> Square {
        Square((rank.index() * 8 + file.index()) as u8)
    }

    /// Square from a raw index in 0..64, or `None` out of range.
    #[inline]
    pub fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Square from an index known to be in range.
    #[inline]
    pub(crate) fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parse algebraic notation such as `"e4"`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let file = File::from_index((file_char as u32).wrapping_sub('a' as u32) as u8)?;
        let rank = Rank::from_index((rank_char as u32).wrapping_sub('1' as u32) as u8)?;
        Some(Square::new(rank, file))
    }

    /// Raw index in 0..64.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The rank this square sits on.
    #[inline]
    pub fn rank(self) -> Rank {
        match self.0 >> 3 {
            0 => Rank::Rank1,
            1 => Rank::Rank2,
            2 => Rank::Rank3,
            3 => Rank::Rank4,
            4 => Rank::Rank5,
            5 => Rank::Rank6,
            6 => Rank::Rank7,
            _ => Rank::Rank8,
        }
    }

    /// The file this square sits on.
    #[inline]
    pub fn file(self) -> File {
        match self.0 & 7 {
            0 => File::FileA,
            1 => File::FileB,
            2 => File::FileC,
            3 => File::FileD,
            4 => File::FileE,
            5 => File::FileF,
            6 => File::FileG,
            _ => File::FileH,
        }
    }

    /// The rank as seen from `color`'s side of the board.
    ///
    /// For White this is just [`Square::rank`]; for Black the board is
    /// mirrored, so a black pawn on its starting square reports `Rank2`.
    #[inline]
    pub fn relative_rank(self, color: Color) -> Rank {
        match color {
            Color::White => self.rank(),
            Color::Black => match self.0 >> 3 {
                0 => Rank::Rank8,
                1 => Rank::Rank7,
                2 => Rank::Rank6,
                3 => Rank::Rank5,
                4 => Rank::Rank4,
                5 => Rank::Rank3,
                6 => Rank::Rank2,
                _ => Rank::Rank1,
            },
        }
    }

    /// Chebyshev distance to `other`: the number of king steps between
    /// the two squares.
    #[inline]
    pub fn distance(self, other: Square) -> usize {
        let rank_diff = self.rank().index().abs_diff(other.rank().index());
        let file_diff = self.file().index().abs_diff(other.file().index());
        rank_diff.max(file_diff)
    }

    /// Bitboard with only this square set.
    #[inline]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::new(1u64 << self.0)
    }

    /// Iterate over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_matches_named_constants() {
        assert_eq!(Square::new(Rank::Rank1, File::FileA), Square::A1);
        assert_eq!(Square::new(Rank::Rank4, File::FileE), Square::E4);
        assert_eq!(Square::new(Rank::Rank8, File::FileH), Square::H8);
    }

    #[test]
    fn index_layout_is_lerf() {
        assert_eq!(Square::A1.index(), 0);
        assert_eq!(Square::H1.index(), 7);
        assert_eq!(Square::A2.index(), 8);
        assert_eq!(Square::H8.index(), 63);
    }

    #[test]
    fn rank_and_file_recovered_from_index() {
        for sq in Square::all() {
            assert_eq!(Square::new(sq.rank(), sq.file()), sq);
        }
    }

    #[test]
    fn algebraic_roundtrip() {
        for sq in Square::all() {
            let text = format!("{sq}");
            assert_eq!(Square::from_algebraic(&text), Some(sq));
        }
    }

    #[test]
    fn algebraic_rejects_garbage() {
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("e"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn relative_rank_mirrors_for_black() {
        assert_eq!(Square::E2.relative_rank(Color::White), Rank::Rank2);
        assert_eq!(Square::E7.relative_rank(Color::Black), Rank::Rank2);
        assert_eq!(Square::E8.relative_rank(Color::Black), Rank::Rank1);
        assert_eq!(Square::A1.relative_rank(Color::Black), Rank::Rank8);
    }

    #[test]
    fn distance_is_chebyshev() {
        assert_eq!(Square::A1.distance(Square::A1), 0);
        assert_eq!(Square::A1.distance(Square::B2), 1);
        assert_eq!(Square::A1.distance(Square::H8), 7);
        assert_eq!(Square::E4.distance(Square::E7), 3);
        assert_eq!(Square::E4.distance(Square::G5), 2);
    }

    #[test]
    fn bitboard_sets_single_bit() {
        for sq in Square::all() {
            let bb = sq.bitboard();
            assert_eq!(bb.count(), 1);
            assert!(bb.contains(sq));
        }
    }
}
