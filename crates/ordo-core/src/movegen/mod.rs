//! Pseudo-legal move generation, split by class.
//!
//! [`generate`] fills a [`MoveList`] with one class of moves. Staged
//! move picking consumes the classes separately, so captures can be
//! generated and searched before any quiet move exists in memory.
//!
//! Moves are pseudo-legal: a pinned piece may still be offered. The one
//! exception is the king, which never steps onto an attacked square in
//! [`GenClass::Evasions`], and castling, which is emitted fully vetted.

mod pawns;
mod pieces;

use std::ops::Index;

use crate::attacks::between;
use crate::board::Board;
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;

pub(crate) const MAX_MOVES: usize = 256;

/// Which family of pseudo-legal moves to generate.
///
/// [`Evasions`](GenClass::Evasions) is the only valid class while the
/// side to move is in check; the other three are only valid while it is
/// not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenClass {
    /// Captures, en passant, queen promotions, and underpromotions that
    /// capture. Exactly the moves for which
    /// [`Board::capture_stage`] holds.
    Captures,
    /// Non-captures: pushes, piece moves, castling, and
    /// underpromotions that do not capture.
    Quiets,
    /// Check evasions: king steps to safe squares plus, against a
    /// single checker, blocks and captures of the checker.
    Evasions,
    /// Non-captures that give check, by direct attack or by moving a
    /// piece that shields the enemy king. No promotions, no castling.
    QuietChecks,
}

/// Fixed-capacity move buffer.
#[derive(Clone, Copy)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> MoveList {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, MAX_MOVES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter().take(self.len)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = Move;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Move>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter().copied()
    }
}

/// Generate all pseudo-legal moves of one class for the side to move.
pub fn generate(board: &Board, class: GenClass) -> MoveList {
    let mut list = MoveList::new();
    let us = board.side_to_move();
    let checkers = board.checkers();

    debug_assert!(
        (class == GenClass::Evasions) == checkers.is_nonempty(),
        "generation class must match the in-check state"
    );

    // In double check only the king can move, so the non-king target
    // collapses to nothing.
    let non_king_target = match class {
        GenClass::Captures => Some(board.side(!us)),
        GenClass::Quiets | GenClass::QuietChecks => Some(!board.occupied()),
        GenClass::Evasions => {
            let mut iter = checkers;
            match (iter.next(), iter.next()) {
                (Some(checker), None) => {
                    Some(between(board.king_square(us), checker) | checker.bitboard())
                }
                _ => None,
            }
        }
    };

    if let Some(target) = non_king_target {
        pawns::generate(board, class, target, &mut list);
        for kind in [
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ] {
            pieces::piece_moves(board, class, kind, target, &mut list);
        }
    }

    pieces::king_moves(board, class, &mut list);

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::MoveKind;
    use crate::square::Square;

    /// All legal moves, built from the class union plus a legality
    /// filter. Ground truth for the perft counts below.
    fn legal_moves(board: &Board) -> Vec<Move> {
        let mut all = Vec::new();
        if board.in_check() {
            all.extend(generate(board, GenClass::Evasions));
        } else {
            all.extend(generate(board, GenClass::Captures));
            all.extend(generate(board, GenClass::Quiets));
        }
        all.retain(|&mv| {
            let next = board.make_move(mv);
            let mover = !next.side_to_move();
            !next.attacked_by(
                next.side_to_move(),
                next.king_square(mover),
                next.occupied(),
            )
        });
        all
    }

    fn perft(board: &Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        legal_moves(board)
            .iter()
            .map(|&mv| {
                if depth == 1 {
                    1
                } else {
                    perft(&board.make_move(mv), depth - 1)
                }
            })
            .sum()
    }

    fn assert_perft(fen: &str, expected: &[u64]) {
        let board: Board = fen.parse().unwrap();
        for (depth, &nodes) in expected.iter().enumerate() {
            let depth = depth as u32 + 1;
            assert_eq!(
                perft(&board, depth),
                nodes,
                "perft({depth}) mismatch for {fen}"
            );
        }
    }

    #[test]
    fn perft_starting_position() {
        assert_perft(crate::fen::STARTING_FEN, &[20, 400, 8_902, 197_281]);
    }

    #[test]
    fn perft_kiwipete() {
        assert_perft(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            &[48, 2_039, 97_862],
        );
    }

    #[test]
    fn perft_endgame_with_en_passant_pin() {
        assert_perft("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[14, 191, 2_812, 43_238]);
    }

    #[test]
    fn perft_promotion_heavy() {
        assert_perft(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            &[6, 264, 9_467],
        );
    }

    #[test]
    fn perft_buggy_position() {
        assert_perft(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            &[44, 1_486, 62_379],
        );
    }

    #[test]
    fn perft_symmetric_middlegame() {
        assert_perft(
            "r4rk1/1pp1qppp/p1np1n2/2b1p1b1/2B1P1B1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            &[46, 2_060, 88_933],
        );
    }

    #[test]
    fn starting_position_classes() {
        let board = Board::starting_position();
        assert!(generate(&board, GenClass::Captures).is_empty());
        assert_eq!(generate(&board, GenClass::Quiets).len(), 20);
    }

    #[test]
    fn classes_are_disjoint_and_consistent() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        ];
        for fen in fens {
            let board: Board = fen.parse().unwrap();
            let captures = generate(&board, GenClass::Captures);
            let quiets = generate(&board, GenClass::Quiets);

            for mv in &captures {
                assert!(board.capture_stage(mv), "{mv} in captures but not capture stage");
                assert!(!quiets.contains(mv));
            }
            for mv in &quiets {
                assert!(!board.capture_stage(mv), "{mv} in quiets but capture stage");
            }
        }
    }

    #[test]
    fn capture_class_includes_en_passant_and_queen_promotions() {
        let ep_board: Board = "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3"
            .parse()
            .unwrap();
        let captures = generate(&ep_board, GenClass::Captures);
        assert!(captures.contains(Move::new_en_passant(Square::D4, Square::E3)));

        let promo_board: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let captures = generate(&promo_board, GenClass::Captures);
        let quiets = generate(&promo_board, GenClass::Quiets);
        use crate::chess_move::PromotionPiece;
        let queen = Move::new_promotion(Square::A7, Square::A8, PromotionPiece::Queen);
        let knight = Move::new_promotion(Square::A7, Square::A8, PromotionPiece::Knight);
        assert!(captures.contains(queen));
        assert!(!captures.contains(knight));
        assert!(quiets.contains(knight));
        assert!(!quiets.contains(queen));
    }

    #[test]
    fn underpromotion_captures_stay_with_captures() {
        let board: Board = "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let captures = generate(&board, GenClass::Captures);
        let quiets = generate(&board, GenClass::Quiets);
        use crate::chess_move::PromotionPiece;
        for promo in PromotionPiece::ALL {
            let capture = Move::new_promotion(Square::A7, Square::B8, promo);
            assert!(captures.contains(capture), "{capture} missing from captures");
            assert!(!quiets.contains(capture));
        }
    }

    #[test]
    fn evasions_against_single_check_block_capture_or_flee() {
        let board: Board = "4k3/8/8/8/8/2b5/8/3RK3 w - - 0 1".parse().unwrap();
        let evasions = generate(&board, GenClass::Evasions);
        // Block on d2, capture is impossible, king steps exist.
        assert!(evasions.contains(Move::new(Square::D1, Square::D2)));
        assert!(evasions.contains(Move::new(Square::E1, Square::E2)));
        // The king never steps onto an attacked square.
        assert!(!evasions.contains(Move::new(Square::E1, Square::D2)));
        // Unrelated rook moves are not evasions.
        assert!(!evasions.contains(Move::new(Square::D1, Square::D8)));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let board: Board = "4k3/8/8/8/8/2b2n2/8/4K3 w - - 0 1".parse().unwrap();
        let evasions = generate(&board, GenClass::Evasions);
        assert!(!evasions.is_empty());
        for mv in &evasions {
            assert_eq!(mv.source(), Square::E1, "{mv} is not a king move");
        }
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        // The double push itself gives check; taking it en passant is a
        // valid evasion.
        let board: Board = "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1".parse().unwrap();
        assert!(board.in_check());
        let evasions = generate(&board, GenClass::Evasions);
        assert!(evasions.contains(Move::new_en_passant(Square::E4, Square::D3)));
    }

    #[test]
    fn en_passant_cannot_answer_a_discovered_check() {
        // The double push b7-b5 uncovered the bishop on c8; capturing
        // the pawn en passant leaves that check standing.
        let board: Board = "2b4k/8/K7/1pP5/8/8/8/8 w - b6 0 2".parse().unwrap();
        assert!(board.in_check());
        let evasions = generate(&board, GenClass::Evasions);
        assert!(!evasions.contains(Move::new_en_passant(Square::C5, Square::B6)));
    }

    #[test]
    fn castling_requires_clear_and_safe_path() {
        let open: Board = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().unwrap();
        let quiets = generate(&open, GenClass::Quiets);
        assert!(quiets.contains(Move::new_castle(Square::E1, Square::G1)));
        assert!(quiets.contains(Move::new_castle(Square::E1, Square::C1)));

        let blocked: Board = "4k3/8/8/8/8/8/8/R2QK2R w KQ - 0 1".parse().unwrap();
        let quiets = generate(&blocked, GenClass::Quiets);
        assert!(quiets.contains(Move::new_castle(Square::E1, Square::G1)));
        assert!(!quiets.contains(Move::new_castle(Square::E1, Square::C1)));

        // Enemy rook covers f1, so kingside is off.
        let guarded: Board = "4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().unwrap();
        let quiets = generate(&guarded, GenClass::Quiets);
        assert!(!quiets.contains(Move::new_castle(Square::E1, Square::G1)));
        assert!(quiets.contains(Move::new_castle(Square::E1, Square::C1)));
    }

    #[test]
    fn quiet_checks_are_quiet_and_check() {
        let fens = [
            "4k3/8/8/8/8/8/8/RN2K3 w - - 0 1",
            "3k4/8/8/8/8/8/3P4/3QK3 w - - 0 1",
            "4k3/8/8/8/4N3/8/8/4K3 w - - 0 1",
        ];
        for fen in fens {
            let board: Board = fen.parse().unwrap();
            let checks = generate(&board, GenClass::QuietChecks);
            let quiets = generate(&board, GenClass::Quiets);
            for mv in &checks {
                assert!(!board.is_capture(mv), "{mv} is a capture");
                assert!(board.gives_check(mv), "{mv} does not give check in {fen}");
                assert!(quiets.contains(mv), "{mv} not among quiets");
                assert_ne!(mv.kind(), MoveKind::Castling);
            }
        }
    }

    #[test]
    fn quiet_checks_find_discovered_candidates() {
        // The knight on d5 shields the black king from the rook on d1;
        // every quiet knight move off the d-file is a discovered check.
        let board: Board = "3k4/8/8/3N4/8/8/8/3RK3 w - - 0 1".parse().unwrap();
        let checks = generate(&board, GenClass::QuietChecks);
        assert!(checks.contains(Move::new(Square::D5, Square::B4)));
        assert!(checks.contains(Move::new(Square::D5, Square::E3)));
        for mv in &checks {
            assert!(board.gives_check(mv));
        }
    }
}
