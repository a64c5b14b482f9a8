//! Move generation for knights, sliders, and the king.

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::movegen::{GenClass, MoveList};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Generate moves for all pieces of one non-pawn, non-king kind.
pub(super) fn piece_moves(
    board: &Board,
    class: GenClass,
    kind: PieceKind,
    target: Bitboard,
    list: &mut MoveList,
) {
    debug_assert!(!matches!(kind, PieceKind::Pawn | PieceKind::King));

    let us = board.side_to_move();
    let them = !us;
    let occupied = board.occupied();
    let quiet_checks = class == GenClass::QuietChecks;
    let (blockers, check_squares) = if quiet_checks {
        (board.blockers_for_king(them), board.check_squares(kind))
    } else {
        (Bitboard::EMPTY, Bitboard::EMPTY)
    };

    for src in board.pieces_of(us, kind) {
        let attacks = match kind {
            PieceKind::Knight => knight_attacks(src),
            PieceKind::Bishop => bishop_attacks(src, occupied),
            PieceKind::Rook => rook_attacks(src, occupied),
            _ => queen_attacks(src, occupied),
        };
        let mut dsts = attacks & target;

        // A quiet check is either direct or made by freely moving a
        // piece that shields the enemy king. Queens cannot discover.
        if quiet_checks && (kind == PieceKind::Queen || !blockers.contains(src)) {
            dsts &= check_squares;
        }

        for dst in dsts {
            list.push(Move::new(src, dst));
        }
    }
}

/// Generate king steps, plus castling when the class includes quiets.
pub(super) fn king_moves(board: &Board, class: GenClass, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = !us;
    let ksq = board.king_square(us);

    // For quiet checks the king only contributes discovered checks.
    if class == GenClass::QuietChecks && !board.blockers_for_king(them).contains(ksq) {
        return;
    }

    let base = match class {
        GenClass::Captures => board.side(them),
        GenClass::Evasions => !board.side(us),
        _ => !board.occupied(),
    };
    let mut steps = king_attacks(ksq) & base;

    if class == GenClass::QuietChecks {
        // Leaving every line through the enemy king guarantees the
        // discovery lands.
        steps &= !queen_attacks(board.king_square(them), Bitboard::EMPTY);
    }

    if class == GenClass::Evasions {
        // Fleeing along the checker's ray is no escape; testing against
        // occupancy without the king catches that.
        let occ_no_king = board.occupied().without(ksq);
        for dst in steps {
            if !board.attacked_by(them, dst, occ_no_king) {
                list.push(Move::new(ksq, dst));
            }
        }
    } else {
        for dst in steps {
            list.push(Move::new(ksq, dst));
        }
    }

    if class == GenClass::Quiets {
        castle_moves(board, us, ksq, list);
    }
}

fn castle_moves(board: &Board, us: Color, ksq: Square, list: &mut MoveList) {
    let (home, kingside_rook, queenside_rook) = match us {
        Color::White => (Square::E1, Square::H1, Square::A1),
        Color::Black => (Square::E8, Square::H8, Square::A8),
    };
    if ksq != home {
        return;
    }
    let rooks = board.pieces_of(us, PieceKind::Rook);

    if board.castling().has(us, CastleSide::King) && rooks.contains(kingside_rook) {
        let (f, g) = match us {
            Color::White => (Square::F1, Square::G1),
            Color::Black => (Square::F8, Square::G8),
        };
        try_castle(board, us, ksq, &[f, g], &[f, g], g, list);
    }

    if board.castling().has(us, CastleSide::Queen) && rooks.contains(queenside_rook) {
        let (b, c, d) = match us {
            Color::White => (Square::B1, Square::C1, Square::D1),
            Color::Black => (Square::B8, Square::C8, Square::D8),
        };
        // The rook passes over b1/b8, but only the king's path needs to
        // be safe.
        try_castle(board, us, ksq, &[b, c, d], &[c, d], c, list);
    }
}

fn try_castle(
    board: &Board,
    us: Color,
    ksq: Square,
    empty_path: &[Square],
    safe_path: &[Square],
    dst: Square,
    list: &mut MoveList,
) {
    let occupied = board.occupied();
    if empty_path.iter().any(|&sq| occupied.contains(sq)) {
        return;
    }
    if safe_path
        .iter()
        .any(|&sq| board.attacked_by(!us, sq, occupied))
    {
        return;
    }
    list.push(Move::new_castle(ksq, dst));
}
