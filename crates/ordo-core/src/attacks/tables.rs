//! Leaper attack tables and square-pair geometry, built at compile time.

use crate::bitboard::Bitboard;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Build a 64-entry attack table for a leaper with the given step offsets.
const fn leaper_table(deltas: [(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut d = 0;
        while d < 8 {
            let r = rank + deltas[d].0;
            let f = file + deltas[d].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r as usize * 8 + f as usize);
            }
            d += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

/// Build pawn attack tables. Index 0 is White (attacking north), index 1
/// Black (attacking south). Edge files are masked so attacks never wrap.
const fn pawn_table() -> [[Bitboard; 64]; 2] {
    const NOT_FILE_A: u64 = !0x0101_0101_0101_0101;
    const NOT_FILE_H: u64 = !0x8080_8080_8080_8080;

    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0usize;
    while sq < 64 {
        let bit = 1u64 << sq;
        // White: north-west is << 7 (loses the A-file wrap candidates that
        // came from H), north-east is << 9.
        table[0][sq] = Bitboard::new(((bit << 7) & NOT_FILE_H) | ((bit << 9) & NOT_FILE_A));
        // Black mirrors south.
        table[1][sq] = Bitboard::new(((bit >> 7) & NOT_FILE_A) | ((bit >> 9) & NOT_FILE_H));
        sq += 1;
    }
    table
}

const fn step(x: i8) -> i8 {
    if x > 0 {
        1
    } else if x < 0 {
        -1
    } else {
        0
    }
}

const fn aligned(dr: i8, df: i8) -> bool {
    let dr_abs = if dr < 0 { -dr } else { dr };
    let df_abs = if df < 0 { -df } else { df };
    dr == 0 || df == 0 || dr_abs == df_abs
}

/// Squares strictly between two aligned squares; empty when unaligned.
const fn between_table() -> [[Bitboard; 64]; 64] {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut s1 = 0usize;
    while s1 < 64 {
        let mut s2 = 0usize;
        while s2 < 64 {
            let dr = (s2 / 8) as i8 - (s1 / 8) as i8;
            let df = (s2 % 8) as i8 - (s1 % 8) as i8;
            if s1 != s2 && aligned(dr, df) {
                let mut bits = 0u64;
                let mut r = (s1 / 8) as i8 + step(dr);
                let mut f = (s1 % 8) as i8 + step(df);
                while r != (s2 / 8) as i8 || f != (s2 % 8) as i8 {
                    bits |= 1u64 << (r as usize * 8 + f as usize);
                    r += step(dr);
                    f += step(df);
                }
                table[s1][s2] = Bitboard::new(bits);
            }
            s2 += 1;
        }
        s1 += 1;
    }
    table
}

/// Full line through two aligned squares, endpoints included, extended to
/// both board edges; empty when unaligned.
const fn line_table() -> [[Bitboard; 64]; 64] {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut s1 = 0usize;
    while s1 < 64 {
        let mut s2 = 0usize;
        while s2 < 64 {
            let dr = (s2 / 8) as i8 - (s1 / 8) as i8;
            let df = (s2 % 8) as i8 - (s1 % 8) as i8;
            if s1 != s2 && aligned(dr, df) {
                let mut bits = 0u64;
                // Walk from s1 to one edge, then from s1 to the other.
                let mut r = (s1 / 8) as i8;
                let mut f = (s1 % 8) as i8;
                while r >= 0 && r < 8 && f >= 0 && f < 8 {
                    bits |= 1u64 << (r as usize * 8 + f as usize);
                    r += step(dr);
                    f += step(df);
                }
                r = (s1 / 8) as i8 - step(dr);
                f = (s1 % 8) as i8 - step(df);
                while r >= 0 && r < 8 && f >= 0 && f < 8 {
                    bits |= 1u64 << (r as usize * 8 + f as usize);
                    r -= step(dr);
                    f -= step(df);
                }
                table[s1][s2] = Bitboard::new(bits);
            }
            s2 += 1;
        }
        s1 += 1;
    }
    table
}

pub(crate) static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(KNIGHT_DELTAS);
pub(crate) static KING_ATTACKS: [Bitboard; 64] = leaper_table(KING_DELTAS);
pub(crate) static PAWN_ATTACKS: [[Bitboard; 64]; 2] = pawn_table();
pub(crate) static BETWEEN: [[Bitboard; 64]; 64] = between_table();
pub(crate) static LINE: [[Bitboard; 64]; 64] = line_table();
