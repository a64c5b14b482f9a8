//! Pawn move generation: pushes, captures, promotions, en passant.

use crate::attacks::pawn_attacks;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, PromotionPiece};
use crate::color::Color;
use crate::movegen::{GenClass, MoveList};
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Shift a whole bitboard one pawn step in a compass direction, with
/// wrap-around squares masked off. Deltas are signed square-index
/// offsets: 8 north, 9 north-east, 7 north-west, negated southward.
fn shift(bb: Bitboard, delta: i32) -> Bitboard {
    match delta {
        8 => bb << 8,
        -8 => bb >> 8,
        9 => (bb & !Bitboard::FILE_H) << 9,
        7 => (bb & !Bitboard::FILE_A) << 7,
        -9 => (bb & !Bitboard::FILE_A) >> 9,
        _ => (bb & !Bitboard::FILE_H) >> 7,
    }
}

/// The square a pawn moved from, given its destination and direction.
fn origin(dst: Square, delta: i32) -> Square {
    Square::from_index_unchecked((dst.index() as i32 - delta) as u8)
}

fn push_promotions(
    list: &mut MoveList,
    class: GenClass,
    src: Square,
    dst: Square,
    capturing: bool,
) {
    let all = class == GenClass::Evasions;

    if class == GenClass::Captures || all {
        list.push(Move::new_promotion(src, dst, PromotionPiece::Queen));
    }
    // Underpromotions follow the stage their parent move belongs to: a
    // capturing underpromotion is still a capture, a quiet one a quiet.
    if (class == GenClass::Captures && capturing)
        || (class == GenClass::Quiets && !capturing)
        || all
    {
        for promo in PromotionPiece::UNDER {
            list.push(Move::new_promotion(src, dst, promo));
        }
    }
}

pub(super) fn generate(board: &Board, class: GenClass, target: Bitboard, list: &mut MoveList) {
    let us = board.side_to_move();
    let them = !us;
    let (up, up_right, up_left, rank7, rank3) = match us {
        Color::White => (8, 9, 7, Bitboard::RANK_7, Bitboard::RANK_3),
        Color::Black => (-8, -9, -7, Bitboard::RANK_2, Bitboard::RANK_6),
    };

    let pawns = board.pieces_of(us, PieceKind::Pawn);
    let pawns_on7 = pawns & rank7;
    let pawns_not_on7 = pawns & !rank7;

    // For evasions a capture must take the checker itself.
    let enemies = if class == GenClass::Evasions {
        board.checkers()
    } else {
        board.side(them)
    };
    let empty = !board.occupied();

    // Single and double pushes, no promotions.
    if class != GenClass::Captures {
        let mut b1 = shift(pawns_not_on7, up) & empty;
        let mut b2 = shift(b1 & rank3, up) & empty;

        if class == GenClass::Evasions {
            b1 &= target;
            b2 &= target;
        }

        if class == GenClass::QuietChecks {
            // A quiet pawn check is a direct check or the push of a
            // shielding pawn off the king's file.
            let ksq = board.king_square(them);
            let candidates =
                board.blockers_for_king(them) & !Bitboard::FILES[ksq.file().index()];
            b1 &= pawn_attacks(them, ksq) | shift(candidates, up);
            b2 &= pawn_attacks(them, ksq) | shift(shift(candidates, up), up);
        }

        for dst in b1 {
            list.push(Move::new(origin(dst, up), dst));
        }
        for dst in b2 {
            list.push(Move::new(origin(origin(dst, up), up), dst));
        }
    }

    // Promotions.
    if pawns_on7.is_nonempty() {
        let right = shift(pawns_on7, up_right) & enemies;
        let left = shift(pawns_on7, up_left) & enemies;
        let mut pushes = shift(pawns_on7, up) & empty;
        if class == GenClass::Evasions {
            pushes &= target;
        }

        for dst in right {
            push_promotions(list, class, origin(dst, up_right), dst, true);
        }
        for dst in left {
            push_promotions(list, class, origin(dst, up_left), dst, true);
        }
        for dst in pushes {
            push_promotions(list, class, origin(dst, up), dst, false);
        }
    }

    // Standard captures and en passant.
    if class == GenClass::Captures || class == GenClass::Evasions {
        let right = shift(pawns_not_on7, up_right) & enemies;
        let left = shift(pawns_not_on7, up_left) & enemies;

        for dst in right {
            list.push(Move::new(origin(dst, up_right), dst));
        }
        for dst in left {
            list.push(Move::new(origin(dst, up_left), dst));
        }

        if let Some(ep) = board.en_passant()
            // An en passant capture cannot answer a check that was
            // discovered through the double push's origin square.
            && !(class == GenClass::Evasions && target.contains(origin(ep, -up)))
        {
            for src in pawns_not_on7 & pawn_attacks(them, ep) {
                list.push(Move::new_en_passant(src, ep));
            }
        }
    }
}
