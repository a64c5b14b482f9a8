//! Magic-indexed lookup tables for sliding piece attacks.
//!
//! The tables are built once on first use: for every square and every
//! subset of the relevant occupancy mask, the attack set is computed by
//! ray walking and stored at the slot the magic hash selects.

use std::sync::OnceLock;

use crate::bitboard::Bitboard;

use super::magic_data::{BISHOP_RAW, ROOK_RAW, RawMagic};

/// Per-square lookup parameters plus the offset of the square's block
/// inside the shared attack array.
#[derive(Debug, Clone, Copy)]
struct SquareEntry {
    magic: u64,
    mask: Bitboard,
    shift: u8,
    offset: u32,
}

/// Walk the four orthogonal rays from `sq`, stopping at (and including)
/// the first blocker on each.
pub(crate) const fn rook_rays(sq: usize, occupied: u64) -> u64 {
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;
    let mut attacks = 0u64;

    let directions: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    let mut d = 0;
    while d < 4 {
        let mut r = rank + directions[d].0;
        let mut f = file + directions[d].1;
        while r >= 0 && r < 8 && f >= 0 && f < 8 {
            let bit = 1u64 << (r as usize * 8 + f as usize);
            attacks |= bit;
            if occupied & bit != 0 {
                break;
            }
            r += directions[d].0;
            f += directions[d].1;
        }
        d += 1;
    }

    attacks
}

/// Walk the four diagonal rays from `sq`, stopping at (and including)
/// the first blocker on each.
pub(crate) const fn bishop_rays(sq: usize, occupied: u64) -> u64 {
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;
    let mut attacks = 0u64;

    let directions: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
    let mut d = 0;
    while d < 4 {
        let mut r = rank + directions[d].0;
        let mut f = file + directions[d].1;
        while r >= 0 && r < 8 && f >= 0 && f < 8 {
            let bit = 1u64 << (r as usize * 8 + f as usize);
            attacks |= bit;
            if occupied & bit != 0 {
                break;
            }
            r += directions[d].0;
            f += directions[d].1;
        }
        d += 1;
    }

    attacks
}

#[inline(always)]
fn table_index(entry: &SquareEntry, occupied: Bitboard) -> usize {
    let relevant = occupied & entry.mask;
    let hash = (relevant * entry.magic).inner();
    entry.offset as usize + (hash >> entry.shift) as usize
}

struct MagicTables {
    rook: [SquareEntry; 64],
    bishop: [SquareEntry; 64],
    rook_attacks: Vec<Bitboard>,
    bishop_attacks: Vec<Bitboard>,
}

static TABLES: OnceLock<MagicTables> = OnceLock::new();

fn layout(raw: &[RawMagic; 64]) -> ([SquareEntry; 64], usize) {
    let mut entries = [SquareEntry { magic: 0, mask: Bitboard::EMPTY, shift: 0, offset: 0 }; 64];
    let mut offset = 0u32;
    for (sq, r) in raw.iter().enumerate() {
        entries[sq] = SquareEntry {
            magic: r.magic,
            mask: Bitboard::new(r.mask),
            shift: r.shift,
            offset,
        };
        offset += 1u32 << (64 - r.shift);
    }
    (entries, offset as usize)
}

fn fill(entries: &[SquareEntry; 64], table: &mut [Bitboard], rays: fn(usize, u64) -> u64) {
    for (sq, entry) in entries.iter().enumerate() {
        let mask = entry.mask.inner();
        // Carry-rippler enumeration of every subset of the mask.
        let mut subset = 0u64;
        loop {
            let idx = table_index(entry, Bitboard::new(subset));
            table[idx] = Bitboard::new(rays(sq, subset));
            subset = subset.wrapping_sub(mask) & mask;
            if subset == 0 {
                break;
            }
        }
    }
}

fn tables() -> &'static MagicTables {
    TABLES.get_or_init(|| {
        let (rook, rook_size) = layout(&ROOK_RAW);
        let (bishop, bishop_size) = layout(&BISHOP_RAW);

        let mut rook_attacks = vec![Bitboard::EMPTY; rook_size];
        let mut bishop_attacks = vec![Bitboard::EMPTY; bishop_size];
        fill(&rook, &mut rook_attacks, rook_rays);
        fill(&bishop, &mut bishop_attacks, bishop_rays);

        MagicTables { rook, bishop, rook_attacks, bishop_attacks }
    })
}

/// Rook attack set for `sq` under `occupied`.
#[inline]
pub(crate) fn rook_attacks_lookup(sq: usize, occupied: Bitboard) -> Bitboard {
    let t = tables();
    t.rook_attacks[table_index(&t.rook[sq], occupied)]
}

/// Bishop attack set for `sq` under `occupied`.
#[inline]
pub(crate) fn bishop_attacks_lookup(sq: usize, occupied: Bitboard) -> Bitboard {
    let t = tables();
    t.bishop_attacks[table_index(&t.bishop[sq], occupied)]
}
