//! Move execution on a copied board.
//!
//! [`Board::make_move`] never mutates the original position. It copies,
//! applies the move, and returns the copy with the zobrist hash updated
//! incrementally. Moves must be pseudo-legal for the side to move;
//! legality (own king left in check) is the caller's concern.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// Castling rights lost when a move touches the indexed square. Covers
/// both king departures and rook departures or captures.
const CASTLE_RIGHTS_REVOKE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[0] = CastleRights::WHITE_QUEEN; // a1
    table[4] = CastleRights::WHITE_BOTH; // e1
    table[7] = CastleRights::WHITE_KING; // h1
    table[56] = CastleRights::BLACK_QUEEN; // a8
    table[60] = CastleRights::BLACK_BOTH; // e8
    table[63] = CastleRights::BLACK_KING; // h8
    table
};

impl Board {
    /// Apply `mv` and return the resulting position.
    pub fn make_move(&self, mv: Move) -> Board {
        let mut next = *self;
        let us = self.side_to_move;
        let src = mv.source();
        let dst = mv.dest();
        let moved = self
            .piece_on(src)
            .expect("move source square must hold a piece");

        // En passant rights last exactly one ply.
        if let Some(ep) = next.en_passant.take() {
            next.hash ^= zobrist::EN_PASSANT_FILE[ep.file().index()];
        }

        next.halfmove_clock += 1;

        match mv.kind() {
            MoveKind::Normal => {
                if let Some(captured) = self.piece_on(dst) {
                    next.toggle_piece(captured, dst);
                    next.halfmove_clock = 0;
                }
                next.toggle_piece(moved, src);
                next.toggle_piece(moved, dst);

                if moved.kind() == PieceKind::Pawn {
                    next.halfmove_clock = 0;
                    if src.index().abs_diff(dst.index()) == 16 {
                        let ep = Square::from_index_unchecked(
                            ((src.index() + dst.index()) / 2) as u8,
                        );
                        next.en_passant = Some(ep);
                        next.hash ^= zobrist::EN_PASSANT_FILE[ep.file().index()];
                    }
                }
            }
            MoveKind::Promotion => {
                if let Some(captured) = self.piece_on(dst) {
                    next.toggle_piece(captured, dst);
                }
                next.toggle_piece(moved, src);
                let promoted = Piece::new(mv.promotion_piece().to_piece_kind(), us);
                next.toggle_piece(promoted, dst);
                next.halfmove_clock = 0;
            }
            MoveKind::EnPassant => {
                // The captured pawn stands beside the destination, on the
                // mover's starting rank for this capture.
                let captured_sq = Square::new(src.rank(), dst.file());
                next.toggle_piece(Piece::new(PieceKind::Pawn, !us), captured_sq);
                next.toggle_piece(moved, src);
                next.toggle_piece(moved, dst);
                next.halfmove_clock = 0;
            }
            MoveKind::Castling => {
                let (rook_src, rook_dst) = match dst {
                    Square::G1 => (Square::H1, Square::F1),
                    Square::C1 => (Square::A1, Square::D1),
                    Square::G8 => (Square::H8, Square::F8),
                    _ => (Square::A8, Square::D8),
                };
                next.toggle_piece(moved, src);
                next.toggle_piece(moved, dst);
                let rook = Piece::new(PieceKind::Rook, us);
                next.toggle_piece(rook, rook_src);
                next.toggle_piece(rook, rook_dst);
            }
        }

        let revoked = CASTLE_RIGHTS_REVOKE[src.index()].insert(CASTLE_RIGHTS_REVOKE[dst.index()]);
        let updated = next.castling.remove(revoked);
        if updated != next.castling {
            next.hash ^= zobrist::CASTLING[next.castling.bits() as usize];
            next.hash ^= zobrist::CASTLING[updated.bits() as usize];
            next.castling = updated;
        }

        next.side_to_move = !us;
        next.hash ^= zobrist::SIDE_TO_MOVE;
        if us == Color::Black {
            next.fullmove_number += 1;
        }

        next
    }
}
