//! Attack sets for every piece type, plus square-pair geometry helpers.

mod magic;
mod magic_data;
mod tables;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::Square;

use self::magic::{bishop_attacks_lookup, rook_attacks_lookup};
use self::tables::{BETWEEN, KING_ATTACKS, KNIGHT_ATTACKS, LINE, PAWN_ATTACKS};

/// Squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

/// Squares a king on `sq` attacks.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Squares a pawn of `color` on `sq` attacks (captures only, not pushes).
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// Squares a rook on `sq` attacks given `occupied` blockers.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks_lookup(sq.index(), occupied)
}

/// Squares a bishop on `sq` attacks given `occupied` blockers.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks_lookup(sq.index(), occupied)
}

/// Squares a queen on `sq` attacks given `occupied` blockers.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Squares strictly between `sq1` and `sq2`, excluding both endpoints.
/// Empty when the squares share no rank, file, or diagonal.
#[inline]
pub fn between(sq1: Square, sq2: Square) -> Bitboard {
    BETWEEN[sq1.index()][sq2.index()]
}

/// The full line through `sq1` and `sq2`, endpoints included, running
/// edge to edge. Empty when the squares are not aligned.
#[inline]
pub fn line(sq1: Square, sq2: Square) -> Bitboard {
    LINE[sq1.index()][sq2.index()]
}
