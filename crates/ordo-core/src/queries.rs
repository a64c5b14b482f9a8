//! Position queries: attack sets, check detection, pins, and move
//! classification.
//!
//! Everything here is read-only. The heavier predicates
//! ([`Board::pseudo_legal`], [`Board::gives_check`]) exist so callers can
//! vet moves that did not come out of the generator for this position,
//! such as a transposition-table suggestion.

use crate::attacks::{
    between, bishop_attacks, king_attacks, knight_attacks, line, pawn_attacks, queen_attacks,
    rook_attacks,
};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::chess_move::{Move, MoveKind, PromotionPiece};
use crate::color::Color;
use crate::movegen::{GenClass, generate};
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// `true` if all three squares share a rank, file, or diagonal.
fn aligned(a: Square, b: Square, c: Square) -> bool {
    line(a, b).contains(c)
}

impl Board {
    /// Every piece of either color attacking `sq`, given `occupied` as
    /// the blocking set.
    pub fn attackers_to(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let queens = self.pieces(PieceKind::Queen);
        (pawn_attacks(Color::Black, sq) & self.pieces_of(Color::White, PieceKind::Pawn))
            | (pawn_attacks(Color::White, sq) & self.pieces_of(Color::Black, PieceKind::Pawn))
            | (knight_attacks(sq) & self.pieces(PieceKind::Knight))
            | (king_attacks(sq) & self.pieces(PieceKind::King))
            | (rook_attacks(sq, occupied) & (self.pieces(PieceKind::Rook) | queens))
            | (bishop_attacks(sq, occupied) & (self.pieces(PieceKind::Bishop) | queens))
    }

    /// `true` if any piece of `color` attacks `sq` under `occupied`.
    pub(crate) fn attacked_by(&self, color: Color, sq: Square, occupied: Bitboard) -> bool {
        (self.attackers_to(sq, occupied) & self.side(color)).is_nonempty()
    }

    /// Enemy pieces currently checking the side to move.
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move();
        self.attackers_to(self.king_square(us), self.occupied()) & self.side(!us)
    }

    /// `true` if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers().is_nonempty()
    }

    /// Union of the squares attacked by every `kind` piece of `color`.
    pub fn attacks_by(&self, color: Color, kind: PieceKind) -> Bitboard {
        let occupied = self.occupied();
        let mut attacks = Bitboard::EMPTY;
        for sq in self.pieces_of(color, kind) {
            attacks |= match kind {
                PieceKind::Pawn => pawn_attacks(color, sq),
                PieceKind::Knight => knight_attacks(sq),
                PieceKind::Bishop => bishop_attacks(sq, occupied),
                PieceKind::Rook => rook_attacks(sq, occupied),
                PieceKind::Queen => queen_attacks(sq, occupied),
                PieceKind::King => king_attacks(sq),
            };
        }
        attacks
    }

    /// Squares from which a `kind` piece of the side to move would give
    /// direct check to the enemy king.
    pub fn check_squares(&self, kind: PieceKind) -> Bitboard {
        let them = !self.side_to_move();
        let ksq = self.king_square(them);
        let occupied = self.occupied();
        match kind {
            PieceKind::Pawn => pawn_attacks(them, ksq),
            PieceKind::Knight => knight_attacks(ksq),
            PieceKind::Bishop => bishop_attacks(ksq, occupied),
            PieceKind::Rook => rook_attacks(ksq, occupied),
            PieceKind::Queen => queen_attacks(ksq, occupied),
            PieceKind::King => Bitboard::EMPTY,
        }
    }

    /// Pieces of either color that are the sole shield between `color`'s
    /// king and an enemy slider. Moving one off its line exposes the
    /// king; for the opponent's own pieces that means a discovered check
    /// candidate.
    pub fn blockers_for_king(&self, color: Color) -> Bitboard {
        let ksq = self.king_square(color);
        let them = !color;
        let queens = self.pieces_of(them, PieceKind::Queen);
        let snipers = (rook_attacks(ksq, Bitboard::EMPTY)
            & (self.pieces_of(them, PieceKind::Rook) | queens))
            | (bishop_attacks(ksq, Bitboard::EMPTY)
                & (self.pieces_of(them, PieceKind::Bishop) | queens));
        let occupancy = self.occupied() ^ snipers;

        let mut blockers = Bitboard::EMPTY;
        for sniper in snipers {
            let shield = between(ksq, sniper) & occupancy;
            if shield.count() == 1 {
                blockers |= shield;
            }
        }
        blockers
    }

    /// `true` if `mv` removes an enemy piece from the board.
    pub fn is_capture(&self, mv: Move) -> bool {
        match mv.kind() {
            MoveKind::Castling => false,
            MoveKind::EnPassant => true,
            _ => self.side(!self.side_to_move()).contains(mv.dest()),
        }
    }

    /// `true` if `mv` belongs with the captures during staged move
    /// picking: a real capture or a queen promotion.
    pub fn capture_stage(&self, mv: Move) -> bool {
        self.is_capture(mv)
            || (mv.is_promotion() && mv.promotion_piece() == PromotionPiece::Queen)
    }

    /// `true` if `mv`, assumed pseudo-legal, checks the enemy king.
    pub fn gives_check(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let them = !us;
        let src = mv.source();
        let dst = mv.dest();
        let their_ksq = self.king_square(them);
        let kind = self
            .piece_kind_on(src)
            .expect("gives_check requires a piece on the source square");

        // Direct check from the destination square.
        if self.check_squares(kind).contains(dst) {
            return true;
        }

        // Discovered check: the mover shields the enemy king and leaves
        // the shared line. Castling relocates the king off any line.
        if self.blockers_for_king(them).contains(src)
            && (!aligned(src, dst, their_ksq) || mv.kind() == MoveKind::Castling)
        {
            return true;
        }

        match mv.kind() {
            MoveKind::Normal => false,
            MoveKind::Promotion => {
                let occ = self.occupied().without(src);
                let attacks = match mv.promotion_piece() {
                    PromotionPiece::Knight => knight_attacks(dst),
                    PromotionPiece::Bishop => bishop_attacks(dst, occ),
                    PromotionPiece::Rook => rook_attacks(dst, occ),
                    PromotionPiece::Queen => queen_attacks(dst, occ),
                };
                attacks.contains(their_ksq)
            }
            MoveKind::EnPassant => {
                // Removing both pawns can uncover a slider on the rank
                // or diagonal.
                let captured_sq = Square::new(src.rank(), dst.file());
                let occ = self
                    .occupied()
                    .without(src)
                    .without(captured_sq)
                    .with(dst);
                let queens = self.pieces_of(us, PieceKind::Queen);
                (rook_attacks(their_ksq, occ)
                    & (self.pieces_of(us, PieceKind::Rook) | queens))
                    .is_nonempty()
                    || (bishop_attacks(their_ksq, occ)
                        & (self.pieces_of(us, PieceKind::Bishop) | queens))
                        .is_nonempty()
            }
            MoveKind::Castling => {
                let rook_dst = match dst {
                    Square::G1 => Square::F1,
                    Square::C1 => Square::D1,
                    Square::G8 => Square::F8,
                    _ => Square::D8,
                };
                self.check_squares(PieceKind::Rook).contains(rook_dst)
            }
        }
    }

    /// `true` if `mv` could have been produced by the generator for this
    /// position. Used to vet externally supplied moves; a stale hash hit
    /// must never smuggle an impossible move into the search.
    pub fn pseudo_legal(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let src = mv.source();
        let dst = mv.dest();
        let checkers = self.checkers();

        // Promotions, en passant and castling carry extra preconditions;
        // vetting them against the generator keeps one source of truth.
        if mv.kind() != MoveKind::Normal {
            return if checkers.is_nonempty() {
                generate(self, GenClass::Evasions).contains(mv)
            } else {
                generate(self, GenClass::Captures).contains(mv)
                    || generate(self, GenClass::Quiets).contains(mv)
            };
        }

        let Some(piece) = self.piece_on(src) else {
            return false;
        };
        if piece.color() != us {
            return false;
        }
        if self.side(us).contains(dst) {
            return false;
        }

        if piece.kind() == PieceKind::Pawn {
            // A normal move never lands on a promotion rank.
            if (Bitboard::RANK_1 | Bitboard::RANK_8).contains(dst) {
                return false;
            }

            let occupied = self.occupied();
            let up: i32 = match us {
                Color::White => 8,
                Color::Black => -8,
            };
            let diff = dst.index() as i32 - src.index() as i32;

            let capture_ok =
                pawn_attacks(us, src).contains(dst) && self.side(!us).contains(dst);
            let push_ok = diff == up && !occupied.contains(dst);
            let double_ok = diff == 2 * up
                && src.relative_rank(us) == Rank::Rank2
                && !occupied.contains(dst)
                && !occupied.contains(Square::from_index_unchecked(
                    (src.index() as i32 + up) as u8,
                ));
            if !(capture_ok || push_ok || double_ok) {
                return false;
            }
        } else {
            let attacks = match piece.kind() {
                PieceKind::Knight => knight_attacks(src),
                PieceKind::Bishop => bishop_attacks(src, self.occupied()),
                PieceKind::Rook => rook_attacks(src, self.occupied()),
                PieceKind::Queen => queen_attacks(src, self.occupied()),
                _ => king_attacks(src),
            };
            if !attacks.contains(dst) {
                return false;
            }
        }

        // While in check the move must address the check.
        if checkers.is_nonempty() {
            if piece.kind() != PieceKind::King {
                // Double check can only be met by a king move.
                let Some((checker, rest)) = checkers.pop_lsb() else {
                    return false;
                };
                if rest.is_nonempty() {
                    return false;
                }
                let resolving = between(self.king_square(us), checker) | checker.bitboard();
                if !resolving.contains(dst) {
                    return false;
                }
            } else if self.attacked_by(!us, dst, self.occupied().without(src)) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkers_reports_single_and_double_check() {
        let single: Board = "4k3/8/8/8/8/2b5/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(single.checkers().count(), 1);
        assert!(single.in_check());

        let double: Board = "4k3/8/8/8/8/2b2n2/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(double.checkers().count(), 2);

        let quiet = Board::starting_position();
        assert!(!quiet.in_check());
    }

    #[test]
    fn attacks_by_pawns_covers_both_capture_directions() {
        let board = Board::starting_position();
        let white_pawns = board.attacks_by(Color::White, PieceKind::Pawn);
        assert!(white_pawns.contains(Square::A3));
        assert!(white_pawns.contains(Square::E3));
        assert_eq!(white_pawns & Bitboard::RANK_2, Bitboard::EMPTY);

        let black_pawns = board.attacks_by(Color::Black, PieceKind::Pawn);
        assert!(black_pawns.contains(Square::H6));
    }

    #[test]
    fn check_squares_for_knight_and_pawn() {
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let knight = board.check_squares(PieceKind::Knight);
        assert!(knight.contains(Square::D6));
        assert!(knight.contains(Square::F6));
        assert!(!knight.contains(Square::E6));

        let pawn = board.check_squares(PieceKind::Pawn);
        assert!(pawn.contains(Square::D7));
        assert!(pawn.contains(Square::F7));
        assert!(!pawn.contains(Square::E7));
    }

    #[test]
    fn blockers_detect_single_shield() {
        let board: Board = "4k3/4r3/8/8/4N3/8/8/4K3 w - - 0 1".parse().unwrap();
        let blockers = board.blockers_for_king(Color::White);
        assert!(blockers.contains(Square::E4));

        // Two shields on the same line pin neither.
        let two: Board = "4k3/4r3/8/4n3/4N3/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(two.blockers_for_king(Color::White).is_empty());
    }

    #[test]
    fn blockers_include_enemy_pieces() {
        // The black pawn on e4 is the sole occupant between the black
        // rook and the white king, so it counts as a blocker for White.
        let board: Board = "4r1k1/8/8/8/4p3/8/8/4K3 w - - 0 1".parse().unwrap();
        let blockers = board.blockers_for_king(Color::White);
        assert!(blockers.contains(Square::E4));
    }

    #[test]
    fn capture_classification() {
        let board: Board = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"
            .parse()
            .unwrap();
        assert!(board.is_capture(Move::new(Square::E4, Square::D5)));
        assert!(!board.is_capture(Move::new(Square::E4, Square::E5)));

        let castle: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        assert!(!castle.is_capture(Move::new_castle(Square::E1, Square::G1)));

        let promo: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let quiet_queen = Move::new_promotion(Square::A7, Square::A8, PromotionPiece::Queen);
        assert!(!promo.is_capture(quiet_queen));
        assert!(promo.capture_stage(quiet_queen));
        let quiet_knight = Move::new_promotion(Square::A7, Square::A8, PromotionPiece::Knight);
        assert!(!promo.capture_stage(quiet_knight));
    }

    #[test]
    fn gives_check_direct_and_discovered() {
        let direct: Board = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        assert!(direct.gives_check(Move::new(Square::A1, Square::A8)));
        assert!(!direct.gives_check(Move::new(Square::A1, Square::B1)));

        // The bishop shields the black king from the rook on e1; any
        // step off the e-file uncovers the check.
        let discovered: Board = "4k3/8/8/8/4B3/8/8/4RK2 w - - 0 1".parse().unwrap();
        assert!(discovered.gives_check(Move::new(Square::E4, Square::D5)));
        assert!(!discovered.gives_check(Move::new(Square::E1, Square::D1)));
    }

    #[test]
    fn gives_check_on_promotion() {
        let board: Board = "8/4P3/8/8/8/8/8/k3K3 w - - 0 1".parse().unwrap();
        let rook_promo = Move::new_promotion(Square::E7, Square::E8, PromotionPiece::Rook);
        assert!(!board.gives_check(rook_promo));

        let check_board: Board = "k7/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let queen_promo = Move::new_promotion(Square::E7, Square::E8, PromotionPiece::Queen);
        assert!(check_board.gives_check(queen_promo));
    }

    #[test]
    fn gives_check_on_en_passant_discovery() {
        // Capturing en passant removes both pawns from the fifth rank,
        // opening the rook's line to the black king.
        let board: Board = "8/8/8/KPp4r/8/8/8/4k3 w - c6 0 2".parse().unwrap();
        let ep = Move::new_en_passant(Square::B5, Square::C6);
        assert!(!board.gives_check(ep));

        let opened: Board = "8/8/8/RPpk4/8/8/8/4K3 w - c6 0 2".parse().unwrap();
        assert!(opened.gives_check(Move::new_en_passant(Square::B5, Square::C6)));
    }

    #[test]
    fn gives_check_on_castle() {
        let board: Board = "5k2/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        assert!(board.gives_check(Move::new_castle(Square::E1, Square::G1)));

        let no_check: Board = "7k/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        assert!(!no_check.gives_check(Move::new_castle(Square::E1, Square::G1)));
    }

    #[test]
    fn pseudo_legal_accepts_generated_moves() {
        let boards = [
            Board::starting_position(),
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
                .parse()
                .unwrap(),
            "4k3/8/8/8/8/2b5/8/4K3 w - - 0 1".parse().unwrap(),
        ];
        for board in boards {
            let classes = if board.in_check() {
                vec![GenClass::Evasions]
            } else {
                vec![GenClass::Captures, GenClass::Quiets]
            };
            for class in classes {
                for mv in generate(&board, class) {
                    assert!(
                        board.pseudo_legal(mv),
                        "{mv} generated but rejected in {board}"
                    );
                }
            }
        }
    }

    #[test]
    fn pseudo_legal_rejects_foreign_moves() {
        let board = Board::starting_position();
        // Black piece while White to move.
        assert!(!board.pseudo_legal(Move::new(Square::E7, Square::E6)));
        // Empty source.
        assert!(!board.pseudo_legal(Move::new(Square::E4, Square::E5)));
        // Own piece on destination.
        assert!(!board.pseudo_legal(Move::new(Square::D1, Square::D2)));
        // Knight move off its pattern.
        assert!(!board.pseudo_legal(Move::new(Square::B1, Square::B3)));
        // Pawn double push through a blocker.
        let blocked: Board = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1".parse().unwrap();
        assert!(!blocked.pseudo_legal(Move::new(Square::E2, Square::E4)));
    }

    #[test]
    fn pseudo_legal_requires_check_resolution() {
        let board: Board = "4k3/8/8/8/8/2b5/8/3RK3 w - - 0 1".parse().unwrap();
        assert!(board.in_check());
        // Rook move that ignores the check.
        assert!(!board.pseudo_legal(Move::new(Square::D1, Square::D8)));
        // Blocking the diagonal works.
        assert!(board.pseudo_legal(Move::new(Square::D1, Square::D2)));
        // King cannot step onto an attacked square.
        assert!(!board.pseudo_legal(Move::new(Square::E1, Square::D2)));
        assert!(board.pseudo_legal(Move::new(Square::E1, Square::E2)));
    }

    #[test]
    fn pseudo_legal_rejects_stale_specials() {
        // No en passant rights here, so the en passant move must fail
        // even though the squares look plausible.
        let board: Board = "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
            .parse()
            .unwrap();
        assert!(!board.pseudo_legal(Move::new_en_passant(Square::D4, Square::E3)));

        // Castling with a piece in the way.
        let blocked: Board = "4k3/8/8/8/8/8/8/4KB1R w K - 0 1".parse().unwrap();
        assert!(!blocked.pseudo_legal(Move::new_castle(Square::E1, Square::G1)));
    }
}
