//! Scoring for the generated move segments.
//!
//! Captures are ranked by victim value blended with capture history,
//! quiets by the history tables plus threat and check heuristics, and
//! evasions by victim value with history as the tie-break band. A
//! mate-search overlay reweights captures and quiets toward checking
//! moves and king pressure.

use ordo_core::{
    Bitboard, Board, Move, Piece, PieceKind, bishop_attacks, king_attacks, knight_attacks,
    queen_attacks, rook_attacks,
};

use super::MovePicker;

/// Middlegame material values indexed by [`PieceKind`], used to rank
/// victims during capture and evasion scoring.
const VICTIM_VALUE: [i32; 6] = [126, 781, 825, 1276, 2538, 0];

/// Victim value for a capture destination; empty squares (en passant,
/// promotion pushes) count zero.
fn victim_value(kind: Option<PieceKind>) -> i32 {
    kind.map_or(0, |k| VICTIM_VALUE[k.index()])
}

/// Opponent attack sets bucketed by attacker value, and our pieces
/// currently standing on a square a cheaper enemy piece attacks.
struct ThreatMasks {
    by_pawn: Bitboard,
    by_minor: Bitboard,
    by_rook: Bitboard,
    threatened: Bitboard,
}

impl ThreatMasks {
    fn new(board: &Board) -> ThreatMasks {
        let us = board.side_to_move();
        let them = !us;

        let by_pawn = board.attacks_by(them, PieceKind::Pawn);
        let by_minor = board.attacks_by(them, PieceKind::Knight)
            | board.attacks_by(them, PieceKind::Bishop)
            | by_pawn;
        let by_rook = board.attacks_by(them, PieceKind::Rook) | by_minor;

        let threatened = (board.pieces_of(us, PieceKind::Queen) & by_rook)
            | (board.pieces_of(us, PieceKind::Rook) & by_minor)
            | ((board.pieces_of(us, PieceKind::Knight) | board.pieces_of(us, PieceKind::Bishop))
                & by_pawn);

        ThreatMasks {
            by_pawn,
            by_minor,
            by_rook,
            threatened,
        }
    }
}

impl MovePicker<'_> {
    fn moved_piece(&self, mv: Move) -> Piece {
        self.board
            .piece_on(mv.source())
            .expect("scored moves must have a piece on their source square")
    }

    /// Score the capture segment: seven parts victim value to one part
    /// capture history, scaled down to keep the exchange margin in the
    /// good-capture stage proportionate.
    pub(super) fn score_captures(&mut self) {
        for i in self.cur..self.end {
            let mv = self.moves[i].mv;
            let moved = self.moved_piece(mv);
            let victim = self.board.piece_kind_on(mv.dest());

            let mut value = (7 * victim_value(victim)
                + self.capture_history.get(moved, mv.dest(), victim))
                / 16;
            if self.mate_search {
                value += self.mate_pressure(mv, moved);
            }
            self.moves[i].value = value;
        }
    }

    /// Score the quiet segment from main and continuation history, with
    /// bonuses for escaping a cheaper attacker and, outside mate
    /// search, for giving check and for not walking into one.
    pub(super) fn score_quiets(&mut self) {
        let threats = ThreatMasks::new(self.board);
        let us = self.board.side_to_move();

        for i in self.cur..self.end {
            let mv = self.moves[i].mv;
            let moved = self.moved_piece(mv);
            let kind = moved.kind();
            let from = mv.source();
            let to = mv.dest();

            let mut value = 2 * self.main_history.get(us, mv);
            value += 2 * self.continuation[0].get(moved, to);
            value += self.continuation[1].get(moved, to);
            value += self.continuation[3].get(moved, to);
            value += self.continuation[5].get(moved, to);

            if threats.threatened.contains(from) {
                value += if kind == PieceKind::Queen && !threats.by_rook.contains(to) {
                    50_000
                } else if kind == PieceKind::Rook && !threats.by_minor.contains(to) {
                    25_000
                } else if !threats.by_pawn.contains(to) {
                    15_000
                } else {
                    0
                };
            }

            if self.mate_search {
                value += self.mate_pressure(mv, moved);
            } else {
                value += self.continuation[2].get(moved, to) / 4;
                value += 16_384 * i32::from(self.board.check_squares(kind).contains(to));

                // Walking an unthreatened piece into a cheaper attacker.
                if !threats.threatened.contains(from) {
                    value -= match kind {
                        PieceKind::Queen => {
                            50_000 * i32::from(threats.by_rook.contains(to))
                                + 10_000 * i32::from(threats.by_minor.contains(to))
                                + 20_000 * i32::from(threats.by_pawn.contains(to))
                        }
                        PieceKind::Rook => {
                            25_000 * i32::from(threats.by_minor.contains(to))
                                + 10_000 * i32::from(threats.by_pawn.contains(to))
                        }
                        PieceKind::Pawn => 0,
                        _ => 15_000 * i32::from(threats.by_pawn.contains(to)),
                    };
                }
            }

            self.moves[i].value = value;
        }
    }

    /// Score evasions: captures sit a full band above everything else
    /// and prefer cheap capturers of fat victims; the rest order by
    /// history.
    pub(super) fn score_evasions(&mut self) {
        let us = self.board.side_to_move();

        for i in self.cur..self.end {
            let mv = self.moves[i].mv;
            let moved = self.moved_piece(mv);

            self.moves[i].value = if self.board.capture_stage(mv) {
                victim_value(self.board.piece_kind_on(mv.dest()))
                    - (1 + moved.kind().index() as i32)
                    + (1 << 28)
            } else {
                self.main_history.get(us, mv) + self.continuation[0].get(moved, mv.dest())
            };
        }
    }

    /// Mate-search overlay for captures and quiets: direct checks are
    /// weighted by proximity to the enemy king, pawn advances by how
    /// far and how central they run, and the piece types by how much
    /// follow-up check pressure they keep on the king from their
    /// destination.
    fn mate_pressure(&self, mv: Move, moved: Piece) -> i32 {
        let board = self.board;
        let us = board.side_to_move();
        let their_king = board.king_square(!us);
        let king_ring = king_attacks(their_king);
        let kind = moved.kind();
        let to = mv.dest();
        let mut value = 0;

        if board.gives_check(mv) {
            value += 20_000 - 400 * their_king.distance(to) as i32;
            if kind == PieceKind::Knight {
                value += 3_000;
            } else if (kind == PieceKind::Queen || kind == PieceKind::Rook)
                && their_king.distance(to) == 1
            {
                value += 4_000;
            }
        }

        if kind == PieceKind::Pawn {
            value += 640 * to.file().edge_distance() as i32
                + 1280 * to.relative_rank(us).index() as i32;
            if mv.source().rank().index().abs_diff(to.rank().index()) == 2 {
                value += 4_000;
            }
        }

        let occupied = board.occupied();
        match kind {
            PieceKind::Knight => {
                if (knight_attacks(to) & board.check_squares(PieceKind::Knight)).is_nonempty() {
                    value += 6_000;
                }
                value += 2_560 * (knight_attacks(to) & king_ring).count() as i32;
            }
            PieceKind::Queen => {
                if (queen_attacks(to, occupied) & board.check_squares(PieceKind::Queen))
                    .is_nonempty()
                {
                    value += 5_000;
                }
                value += 1_280 * (queen_attacks(to, Bitboard::EMPTY) & king_ring).count() as i32;
            }
            PieceKind::Rook => {
                if (rook_attacks(to, occupied) & board.check_squares(PieceKind::Rook)).is_nonempty()
                {
                    value += 4_000;
                }
                value += 960 * (rook_attacks(to, Bitboard::EMPTY) & king_ring).count() as i32;
            }
            PieceKind::Bishop => {
                if (bishop_attacks(to, occupied) & board.check_squares(PieceKind::Bishop))
                    .is_nonempty()
                {
                    value += 3_000;
                }
                value += 640 * (bishop_attacks(to, Bitboard::EMPTY) & king_ring).count() as i32;
            }
            PieceKind::Pawn | PieceKind::King => {}
        }

        value
    }
}
