//! Zobrist keys and full-board hashing.
//!
//! Keys come from a fixed-seed xorshift64 stream so the tables are built
//! in const context and every build hashes identically.

use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;

const SEED: u64 = 0x4F52_444F_4841_5348; // "ORDOHASH"

/// Xorshift64 step: returns the drawn value, which is also the next state.
const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

/// State after drawing `draws` values from the seed.
const fn advance(mut state: u64, draws: usize) -> u64 {
    let mut i = 0;
    while i < draws {
        state = xorshift64(state);
        i += 1;
    }
    state
}

/// Key per (piece, square), indexed `[Piece::index()][Square::index()]`.
pub(crate) static PIECE_SQUARE: [[u64; 64]; 12] = {
    let mut table = [[0u64; 64]; 12];
    let mut state = SEED;
    let mut piece = 0;
    while piece < 12 {
        let mut sq = 0;
        while sq < 64 {
            state = xorshift64(state);
            table[piece][sq] = state;
            sq += 1;
        }
        piece += 1;
    }
    table
};

/// Key XORed in when Black is to move. Draw 769 of the stream.
pub(crate) static SIDE_TO_MOVE: u64 = xorshift64(advance(SEED, 768));

/// Key per castling configuration, indexed by `CastleRights::bits()`.
/// Draws 770..=785.
pub(crate) static CASTLING: [u64; 16] = {
    let mut table = [0u64; 16];
    let mut state = advance(SEED, 769);
    let mut idx = 0;
    while idx < 16 {
        state = xorshift64(state);
        table[idx] = state;
        idx += 1;
    }
    table
};

/// Key per en passant file, indexed by `File::index()`. Draws 786..=793.
pub(crate) static EN_PASSANT_FILE: [u64; 8] = {
    let mut table = [0u64; 8];
    let mut state = advance(SEED, 785);
    let mut idx = 0;
    while idx < 8 {
        state = xorshift64(state);
        table[idx] = state;
        idx += 1;
    }
    table
};

/// Hash the whole board from scratch. Incremental updates in move
/// execution must always agree with this.
pub(crate) fn hash_from_scratch(board: &Board) -> u64 {
    let mut hash = 0u64;

    for piece in Piece::ALL {
        for sq in board.pieces(piece.kind()) & board.side(piece.color()) {
            hash ^= PIECE_SQUARE[piece.index()][sq.index()];
        }
    }

    if board.side_to_move() == Color::Black {
        hash ^= SIDE_TO_MOVE;
    }

    hash ^= CASTLING[board.castling().bits() as usize];

    if let Some(ep_sq) = board.en_passant() {
        hash ^= EN_PASSANT_FILE[ep_sq.file().index()];
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn starting_position_hash_is_stored() {
        let board = Board::starting_position();
        assert_ne!(board.hash(), 0);
        assert_eq!(board.hash(), hash_from_scratch(&board));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let white: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let black: Board = "4k3/8/8/8/8/8/8/4K3 b - - 0 1".parse().unwrap();
        assert_ne!(white.hash(), black.hash());
        assert_eq!(white.hash() ^ SIDE_TO_MOVE, black.hash());
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let plain: Board = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
            .parse()
            .unwrap();
        let with_ep: Board = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
            .parse()
            .unwrap();
        assert_ne!(plain.hash(), with_ep.hash());
    }

    #[test]
    fn no_key_collisions() {
        let mut keys = Vec::with_capacity(12 * 64 + 1 + 16 + 8);
        for piece_keys in &PIECE_SQUARE {
            keys.extend_from_slice(piece_keys);
        }
        keys.push(SIDE_TO_MOVE);
        keys.extend_from_slice(&CASTLING);
        keys.extend_from_slice(&EN_PASSANT_FILE);

        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total, "zobrist keys must be distinct");
    }
}
