//! Static exchange evaluation.
//!
//! [`Board::see`] plays out the capture sequence on one square, both
//! sides always committing their least valuable attacker, and returns
//! the material balance from the mover's point of view. Sliders hidden
//! behind an attacker join in once the piece in front has moved.

use crate::attacks::{bishop_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Piece values used inside the exchange simulation only.
const EXCHANGE_VALUE: [i32; PieceKind::COUNT] = [100, 320, 330, 500, 900, 20_000];

fn exchange_value(kind: PieceKind) -> i32 {
    EXCHANGE_VALUE[kind.index()]
}

impl Board {
    /// Expected material gain of `mv`, assuming both sides keep
    /// recapturing as long as it pays.
    ///
    /// Castling, promotions and en passant are treated as neutral
    /// exchanges worth zero; the staged picker relies on that when it
    /// separates good captures from bad.
    pub fn see(&self, mv: Move) -> i32 {
        if mv.kind() != MoveKind::Normal {
            return 0;
        }
        let src = mv.source();
        let dst = mv.dest();
        let Some(mut attacker_kind) = self.piece_kind_on(src) else {
            return 0;
        };

        let rook_like = self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Queen);
        let bishop_like = self.pieces(PieceKind::Bishop) | self.pieces(PieceKind::Queen);

        let mut gain = [0i32; 32];
        let mut depth = 0usize;
        let mut occupied = self.occupied();
        let mut attackers = self.attackers_to(dst, occupied);
        let mut from_set = src.bitboard();
        let mut side = self.side_to_move();

        gain[0] = self.piece_kind_on(dst).map_or(0, exchange_value);

        loop {
            depth += 1;
            // Speculative entry: the piece that just landed on `dst`
            // gets captured in turn. Confirmed only if a capturer shows
            // up below; the propagation pass drops the last entry.
            gain[depth] = exchange_value(attacker_kind) - gain[depth - 1];

            // Neither side can improve by continuing the exchange.
            if (-gain[depth - 1]).max(gain[depth]) < 0 {
                break;
            }

            occupied ^= from_set;
            attackers |= (rook_attacks(dst, occupied) & rook_like)
                | (bishop_attacks(dst, occupied) & bishop_like);
            attackers &= occupied;

            side = !side;
            let Some((sq, kind)) = self.least_valuable_attacker(attackers, side) else {
                break;
            };
            if kind == PieceKind::King && (attackers & self.side(!side)).is_nonempty() {
                // The king cannot recapture onto a covered square.
                break;
            }
            from_set = sq.bitboard();
            attacker_kind = kind;
        }

        while depth > 1 {
            depth -= 1;
            gain[depth - 1] = -((-gain[depth - 1]).max(gain[depth]));
        }
        gain[0]
    }

    /// `true` if the exchange started by `mv` nets at least `threshold`.
    #[inline]
    pub fn see_ge(&self, mv: Move, threshold: i32) -> bool {
        self.see(mv) >= threshold
    }

    fn least_valuable_attacker(
        &self,
        attackers: Bitboard,
        side: Color,
    ) -> Option<(Square, PieceKind)> {
        for kind in PieceKind::ALL {
            if let Some(sq) = (attackers & self.pieces_of(side, kind)).lsb() {
                return Some((sq, kind));
            }
        }
        None
    }
}
