//! Staged move picker.
//!
//! A [`MovePicker`] is created per node and asked repeatedly for the
//! next move to search. Moves come out in cutoff-likelihood order: the
//! transposition-table move, then winning captures, killer and counter
//! moves, sorted quiets, and finally the losing captures that were set
//! aside along the way. Generation is lazy per stage, so a node that
//! cuts off on the table move never generates anything at all.
//!
//! Separate stage chains cover check evasions, quiescence (captures,
//! then quiet checks at the frontier depth), and ProbCut (captures
//! beating an exchange threshold only).

mod score;

use ordo_core::{Board, GenClass, Move, Square, generate};

use crate::history::{CaptureHistory, MainHistory, PieceToHistory};

/// Upper bound on moves in any position.
const MAX_MOVES: usize = 256;

/// Quiescence depth at which quiet checks are still generated.
const DEPTH_QS_CHECKS: i32 = 0;

/// Quiescence depth at or below which only recaptures are produced.
const DEPTH_QS_RECAPTURES: i32 = -5;

/// A generated move with its ordering score.
#[derive(Clone, Copy)]
struct ScoredMove {
    mv: Move,
    value: i32,
}

impl ScoredMove {
    const EMPTY: ScoredMove = ScoredMove {
        mv: Move::NULL,
        value: 0,
    };
}

/// Phases of staged selection. Stages only ever advance; each TT stage
/// is skipped at construction when the table move is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    MainTt,
    CaptureInit,
    GoodCapture,
    Refutation,
    QuietInit,
    Quiet,
    BadCapture,

    EvasionTt,
    EvasionInit,
    Evasion,

    ProbCutTt,
    ProbCutInit,
    ProbCut,

    QuiescenceTt,
    QuiescenceCaptureInit,
    QuiescenceCapture,
    QuiescenceCheckInit,
    QuiescenceCheck,
}

impl Stage {
    /// The stage that follows this one. Terminal stages map to
    /// themselves; their selectors simply run dry.
    fn next(self) -> Stage {
        match self {
            Stage::MainTt => Stage::CaptureInit,
            Stage::CaptureInit => Stage::GoodCapture,
            Stage::GoodCapture => Stage::Refutation,
            Stage::Refutation => Stage::QuietInit,
            Stage::QuietInit => Stage::Quiet,
            Stage::Quiet | Stage::BadCapture => Stage::BadCapture,
            Stage::EvasionTt => Stage::EvasionInit,
            Stage::EvasionInit | Stage::Evasion => Stage::Evasion,
            Stage::ProbCutTt => Stage::ProbCutInit,
            Stage::ProbCutInit | Stage::ProbCut => Stage::ProbCut,
            Stage::QuiescenceTt => Stage::QuiescenceCaptureInit,
            Stage::QuiescenceCaptureInit => Stage::QuiescenceCapture,
            Stage::QuiescenceCapture => Stage::QuiescenceCheckInit,
            Stage::QuiescenceCheckInit | Stage::QuiescenceCheck => Stage::QuiescenceCheck,
        }
    }
}

/// Sorts `moves` so that every entry with `value >= limit` ends up in
/// non-increasing value order. Entries below the limit are skipped and
/// may land anywhere among themselves.
fn partial_insertion_sort(moves: &mut [ScoredMove], limit: i32) {
    let mut sorted_end = 0;
    for p in 1..moves.len() {
        if moves[p].value >= limit {
            let tmp = moves[p];
            sorted_end += 1;
            moves[p] = moves[sorted_end];
            let mut q = sorted_end;
            while q > 0 && moves[q - 1].value < tmp.value {
                moves[q] = moves[q - 1];
                q -= 1;
            }
            moves[q] = tmp;
        }
    }
}

/// Hands the search one pseudo-legal move at a time, most promising
/// first, generating and scoring each move class only when the previous
/// class has run out.
///
/// The picker holds shared references into the caller's history tables
/// for its whole lifetime; all table updates happen between nodes, never
/// while a picker is live.
pub struct MovePicker<'a> {
    board: &'a Board,
    main_history: &'a MainHistory,
    capture_history: &'a CaptureHistory,
    continuation: [&'a PieceToHistory; 6],
    tt_move: Option<Move>,
    // Killers first, counter-move last.
    refutations: [Option<Move>; 3],
    ref_cur: usize,
    ref_end: usize,
    moves: [ScoredMove; MAX_MOVES],
    cur: usize,
    end: usize,
    end_bad: usize,
    stage: Stage,
    depth: i32,
    threshold: i32,
    recapture_square: Option<Square>,
    mate_search: bool,
}

impl<'a> MovePicker<'a> {
    /// Picker for a main-search node. Requires `depth > 0`.
    ///
    /// `tt_move` is vetted for pseudo-legality and dropped silently when
    /// it fails; the killers and counter-move seed the refutation stage.
    /// With `mate_search` set, scoring shifts weight onto checking moves
    /// and king pressure.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board: &'a Board,
        tt_move: Option<Move>,
        depth: i32,
        main_history: &'a MainHistory,
        capture_history: &'a CaptureHistory,
        continuation: [&'a PieceToHistory; 6],
        killers: [Option<Move>; 2],
        counter_move: Option<Move>,
        mate_search: bool,
    ) -> MovePicker<'a> {
        debug_assert!(depth > 0);

        let tt_move = tt_move.filter(|&mv| board.pseudo_legal(mv));
        let mut stage = if board.in_check() {
            Stage::EvasionTt
        } else {
            Stage::MainTt
        };
        if tt_move.is_none() {
            stage = stage.next();
        }

        MovePicker {
            board,
            main_history,
            capture_history,
            continuation,
            tt_move,
            refutations: [killers[0], killers[1], counter_move],
            ref_cur: 0,
            ref_end: 0,
            moves: [ScoredMove::EMPTY; MAX_MOVES],
            cur: 0,
            end: 0,
            end_bad: 0,
            stage,
            depth,
            threshold: 0,
            recapture_square: None,
            mate_search,
        }
    }

    /// Picker for a quiescence node. Requires `depth <= 0`.
    ///
    /// At depths at or below the recapture threshold only captures
    /// landing on `recapture_square` come out; at the frontier depth
    /// quiet checks follow the captures.
    pub fn new_quiescence(
        board: &'a Board,
        tt_move: Option<Move>,
        depth: i32,
        main_history: &'a MainHistory,
        capture_history: &'a CaptureHistory,
        continuation: [&'a PieceToHistory; 6],
        recapture_square: Option<Square>,
        mate_search: bool,
    ) -> MovePicker<'a> {
        debug_assert!(depth <= 0);

        let tt_move = tt_move.filter(|&mv| board.pseudo_legal(mv));
        let mut stage = if board.in_check() {
            Stage::EvasionTt
        } else {
            Stage::QuiescenceTt
        };
        if tt_move.is_none() {
            stage = stage.next();
        }

        MovePicker {
            board,
            main_history,
            capture_history,
            continuation,
            tt_move,
            refutations: [None; 3],
            ref_cur: 0,
            ref_end: 0,
            moves: [ScoredMove::EMPTY; MAX_MOVES],
            cur: 0,
            end: 0,
            end_bad: 0,
            stage,
            depth,
            threshold: 0,
            recapture_square,
            mate_search,
        }
    }

    /// Picker for ProbCut: captures whose static exchange value reaches
    /// `threshold`. Requires the side to move not to be in check.
    ///
    /// The table move is only trusted when it is itself a capture-stage
    /// move that beats the threshold. ProbCut stages read no history
    /// beyond capture history, so the other tables are empty stand-ins.
    pub fn new_probcut(
        board: &'a Board,
        tt_move: Option<Move>,
        threshold: i32,
        capture_history: &'a CaptureHistory,
        mate_search: bool,
    ) -> MovePicker<'a> {
        debug_assert!(!board.in_check());

        static NO_MAIN_HISTORY: MainHistory = MainHistory::new();
        static NO_CONTINUATION: PieceToHistory = PieceToHistory::new();

        let tt_move = tt_move.filter(|&mv| {
            board.capture_stage(mv) && board.pseudo_legal(mv) && board.see_ge(mv, threshold)
        });
        let stage = if tt_move.is_some() {
            Stage::ProbCutTt
        } else {
            Stage::ProbCutInit
        };

        MovePicker {
            board,
            main_history: &NO_MAIN_HISTORY,
            capture_history,
            continuation: [&NO_CONTINUATION; 6],
            tt_move,
            refutations: [None; 3],
            ref_cur: 0,
            ref_end: 0,
            moves: [ScoredMove::EMPTY; MAX_MOVES],
            cur: 0,
            end: 0,
            end_bad: 0,
            stage,
            depth: 0,
            threshold,
            recapture_square: None,
            mate_search,
        }
    }

    /// Produce the next move, or `None` once the node is exhausted.
    ///
    /// `skip_quiets` suppresses quiet generation and emission; captures,
    /// refutations, and deferred bad captures still come out. Once the
    /// quiet stage has been passed over with the flag set, clearing it
    /// later does not reopen the stage.
    pub fn next_move(&mut self, skip_quiets: bool) -> Option<Move> {
        loop {
            match self.stage {
                Stage::MainTt | Stage::EvasionTt | Stage::QuiescenceTt | Stage::ProbCutTt => {
                    self.stage = self.stage.next();
                    return self.tt_move;
                }

                Stage::CaptureInit | Stage::ProbCutInit | Stage::QuiescenceCaptureInit => {
                    self.init_captures();
                    self.stage = self.stage.next();
                }

                Stage::GoodCapture => {
                    if let Some(mv) = self.next_good_capture() {
                        return Some(mv);
                    }
                    self.begin_refutations();
                    self.stage = self.stage.next();
                }

                Stage::Refutation => {
                    if let Some(mv) = self.next_refutation() {
                        return Some(mv);
                    }
                    self.stage = self.stage.next();
                }

                Stage::QuietInit => {
                    if !skip_quiets {
                        self.init_quiets();
                    }
                    self.stage = self.stage.next();
                }

                Stage::Quiet => {
                    if !skip_quiets
                        && let Some(mv) = self.next_quiet()
                    {
                        return Some(mv);
                    }
                    // Replay the losing captures banked at the front of
                    // the buffer.
                    self.cur = 0;
                    self.end = self.end_bad;
                    self.stage = self.stage.next();
                }

                Stage::BadCapture => return self.next_in_order(),

                Stage::EvasionInit => {
                    self.init_evasions();
                    self.stage = self.stage.next();
                }

                Stage::Evasion => return self.next_best(),

                Stage::ProbCut => return self.next_probcut(),

                Stage::QuiescenceCapture => {
                    if let Some(mv) = self.next_quiescence_capture() {
                        return Some(mv);
                    }
                    if self.depth != DEPTH_QS_CHECKS {
                        return None;
                    }
                    self.stage = self.stage.next();
                }

                Stage::QuiescenceCheckInit => {
                    self.init_quiet_checks();
                    self.stage = self.stage.next();
                }

                Stage::QuiescenceCheck => return self.next_in_order(),
            }
        }
    }

    // --- Stage initialisation ---

    /// Generate, score, and fully sort the capture-stage moves.
    fn init_captures(&mut self) {
        self.cur = 0;
        self.end_bad = 0;
        let list = generate(self.board, GenClass::Captures);
        self.end = list.len();
        for (slot, mv) in self.moves.iter_mut().zip(&list) {
            *slot = ScoredMove { mv, value: 0 };
        }
        self.score_captures();
        partial_insertion_sort(&mut self.moves[..self.end], i32::MIN);
    }

    /// Generate and score quiets behind the banked bad captures,
    /// sorting only the part worth sorting at this depth.
    fn init_quiets(&mut self) {
        self.cur = self.end_bad;
        let list = generate(self.board, GenClass::Quiets);
        self.end = self.cur + list.len();
        for (slot, mv) in self.moves[self.cur..].iter_mut().zip(&list) {
            *slot = ScoredMove { mv, value: 0 };
        }
        self.score_quiets();
        partial_insertion_sort(&mut self.moves[self.cur..self.end], -3000 * self.depth);
    }

    /// Generate and score evasions. No sort; the evasion stage selects
    /// best-first.
    fn init_evasions(&mut self) {
        self.cur = 0;
        let list = generate(self.board, GenClass::Evasions);
        self.end = list.len();
        for (slot, mv) in self.moves.iter_mut().zip(&list) {
            *slot = ScoredMove { mv, value: 0 };
        }
        self.score_evasions();
    }

    /// Generate quiet checks in place. They are emitted in generation
    /// order, unscored.
    fn init_quiet_checks(&mut self) {
        self.cur = 0;
        let list = generate(self.board, GenClass::QuietChecks);
        self.end = list.len();
        for (slot, mv) in self.moves.iter_mut().zip(&list) {
            *slot = ScoredMove { mv, value: 0 };
        }
    }

    /// Point the refutation cursor at the killers and counter-move,
    /// dropping the counter-move slot when it repeats a killer.
    fn begin_refutations(&mut self) {
        self.ref_cur = 0;
        self.ref_end = if self.refutations[0] == self.refutations[2]
            || self.refutations[1] == self.refutations[2]
        {
            2
        } else {
            3
        };
    }

    // --- Stage selectors ---

    /// Emit captures that pass a score-scaled exchange margin; the rest
    /// are banked at the front of the buffer for the bad-capture stage.
    fn next_good_capture(&mut self) -> Option<Move> {
        while self.cur < self.end {
            let entry = self.moves[self.cur];
            self.cur += 1;
            if Some(entry.mv) == self.tt_move {
                continue;
            }
            if self.board.see_ge(entry.mv, -69 * entry.value / 1024) {
                return Some(entry.mv);
            }
            // The banked region trails the read cursor, so this write
            // only ever hits slots already consumed.
            debug_assert!(self.end_bad < self.cur);
            self.moves[self.end_bad] = entry;
            self.end_bad += 1;
        }
        None
    }

    /// Emit killers and the counter-move: present, not the table move,
    /// not a capture, and pseudo-legal here.
    fn next_refutation(&mut self) -> Option<Move> {
        while self.ref_cur < self.ref_end {
            let candidate = self.refutations[self.ref_cur];
            self.ref_cur += 1;
            if let Some(mv) = candidate
                && Some(mv) != self.tt_move
                && !self.board.is_capture(mv)
                && self.board.pseudo_legal(mv)
            {
                return Some(mv);
            }
        }
        None
    }

    /// Emit sorted quiets, excluding every refutation slot. All three
    /// slots are checked even when the counter-move slot was dropped
    /// from the refutation cursor as a duplicate.
    fn next_quiet(&mut self) -> Option<Move> {
        while self.cur < self.end {
            let entry = self.moves[self.cur];
            self.cur += 1;
            let mv = Some(entry.mv);
            if mv != self.tt_move
                && mv != self.refutations[0]
                && mv != self.refutations[1]
                && mv != self.refutations[2]
            {
                return Some(entry.mv);
            }
        }
        None
    }

    /// Emit the current segment in buffer order.
    fn next_in_order(&mut self) -> Option<Move> {
        while self.cur < self.end {
            let entry = self.moves[self.cur];
            self.cur += 1;
            if Some(entry.mv) != self.tt_move {
                return Some(entry.mv);
            }
        }
        None
    }

    /// Swap the highest-valued remaining entry into the cursor slot and
    /// emit it. A full scan per call; evasion lists are short.
    fn next_best(&mut self) -> Option<Move> {
        while self.cur < self.end {
            let mut best = self.cur;
            for i in (self.cur + 1)..self.end {
                if self.moves[i].value > self.moves[best].value {
                    best = i;
                }
            }
            self.moves.swap(self.cur, best);
            let entry = self.moves[self.cur];
            self.cur += 1;
            if Some(entry.mv) != self.tt_move {
                return Some(entry.mv);
            }
        }
        None
    }

    /// Emit captures whose exchange value reaches the ProbCut threshold.
    fn next_probcut(&mut self) -> Option<Move> {
        while self.cur < self.end {
            let entry = self.moves[self.cur];
            self.cur += 1;
            if Some(entry.mv) != self.tt_move && self.board.see_ge(entry.mv, self.threshold) {
                return Some(entry.mv);
            }
        }
        None
    }

    /// Emit quiescence captures; below the recapture depth only those
    /// landing on the recapture square qualify.
    fn next_quiescence_capture(&mut self) -> Option<Move> {
        while self.cur < self.end {
            let entry = self.moves[self.cur];
            self.cur += 1;
            if Some(entry.mv) == self.tt_move {
                continue;
            }
            if self.depth > DEPTH_QS_RECAPTURES
                || Some(entry.mv.dest()) == self.recapture_square
            {
                return Some(entry.mv);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{CaptureHistory, MainHistory, PieceToHistory};
    use ordo_core::{Board, Color, Move, Piece, PieceKind, Square};

    fn tables() -> (MainHistory, CaptureHistory, PieceToHistory) {
        (
            MainHistory::new(),
            CaptureHistory::new(),
            PieceToHistory::new(),
        )
    }

    fn drain(picker: &mut MovePicker<'_>, skip_quiets: bool) -> Vec<Move> {
        let mut out = Vec::new();
        while let Some(mv) = picker.next_move(skip_quiets) {
            out.push(mv);
        }
        out
    }

    // --- partial_insertion_sort ---

    fn scored(values: &[i32]) -> Vec<ScoredMove> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| ScoredMove {
                // Distinct dummy moves so entries stay distinguishable.
                mv: Move::new(Square::A1, Square::from_index(i as u8).unwrap()),
                value,
            })
            .collect()
    }

    #[test]
    fn full_sort_with_unbounded_limit() {
        let mut moves = scored(&[3, -5, 20, 0, 7]);
        partial_insertion_sort(&mut moves, i32::MIN);
        let values: Vec<i32> = moves.iter().map(|sm| sm.value).collect();
        assert_eq!(values, vec![20, 7, 3, 0, -5]);
    }

    #[test]
    fn entries_below_the_limit_stay_unsorted_but_present() {
        let mut moves = scored(&[3, -50, 20, -10, 7, 15]);
        partial_insertion_sort(&mut moves, 0);

        let above: Vec<i32> = moves.iter().map(|sm| sm.value).filter(|&v| v >= 0).collect();
        assert_eq!(above, vec![20, 15, 7, 3]);

        let mut all: Vec<i32> = moves.iter().map(|sm| sm.value).collect();
        all.sort_unstable();
        assert_eq!(all, vec![-50, -10, 3, 7, 15, 20]);
    }

    #[test]
    fn sort_is_stable_for_equal_values() {
        let mut moves = scored(&[5, 9, 5, 9]);
        partial_insertion_sort(&mut moves, i32::MIN);
        // The two nines keep their relative order, as do the fives.
        assert_eq!(moves[0].mv.dest(), Square::B1);
        assert_eq!(moves[1].mv.dest(), Square::D1);
        assert_eq!(moves[2].mv.dest(), Square::A1);
        assert_eq!(moves[3].mv.dest(), Square::C1);
    }

    #[test]
    fn empty_and_singleton_segments() {
        let mut empty: Vec<ScoredMove> = scored(&[]);
        partial_insertion_sort(&mut empty, 0);
        let mut one = scored(&[42]);
        partial_insertion_sort(&mut one, 0);
        assert_eq!(one[0].value, 42);
    }

    // --- Main stage chain ---

    #[test]
    fn yields_every_opening_move_exactly_once() {
        let board = Board::starting_position();
        let (main, capture, cont) = tables();
        let mut picker = MovePicker::new(
            &board, None, 5, &main, &capture, [&cont; 6], [None; 2], None, false,
        );
        let mut out = drain(&mut picker, false);
        assert_eq!(out.len(), 20);
        out.sort_by_key(|mv| mv.from_to());
        out.dedup();
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn table_move_comes_first_and_only_once() {
        let board = Board::starting_position();
        let (main, capture, cont) = tables();
        let tt = Move::new(Square::E2, Square::E4);
        let mut picker = MovePicker::new(
            &board,
            Some(tt),
            5,
            &main,
            &capture,
            [&cont; 6],
            [None; 2],
            None,
            false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out[0], tt);
        assert_eq!(out.iter().filter(|&&mv| mv == tt).count(), 1);
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn capture_history_reorders_equal_captures() {
        // The d5 pawn can take on c6 or e6; both victims are pawns.
        let board: Board = "k7/8/2p1p3/3P4/8/8/8/K7 w - - 0 1".parse().unwrap();
        let (main, mut capture, cont) = tables();
        capture.update(
            Piece::WHITE_PAWN,
            Square::E6,
            Some(PieceKind::Pawn),
            2000,
        );
        let mut picker = MovePicker::new(
            &board, None, 5, &main, &capture, [&cont; 6], [None; 2], None, false,
        );
        assert_eq!(picker.next_move(false), Some(Move::new(Square::D5, Square::E6)));
        assert_eq!(picker.next_move(false), Some(Move::new(Square::D5, Square::C6)));
    }

    #[test]
    fn killer_emitted_between_captures_and_quiets() {
        let board = Board::starting_position();
        let (main, capture, cont) = tables();
        let killer = Move::new(Square::G1, Square::F3);
        let mut picker = MovePicker::new(
            &board,
            None,
            5,
            &main,
            &capture,
            [&cont; 6],
            [Some(killer), None],
            None,
            false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out[0], killer);
        assert_eq!(out.iter().filter(|&&mv| mv == killer).count(), 1);
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn counter_move_equal_to_killer_emitted_once() {
        let board = Board::starting_position();
        let (main, capture, cont) = tables();
        let shared = Move::new(Square::B1, Square::C3);
        let mut picker = MovePicker::new(
            &board,
            None,
            5,
            &main,
            &capture,
            [&cont; 6],
            [Some(shared), None],
            Some(shared),
            false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out.iter().filter(|&&mv| mv == shared).count(), 1);
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn stale_killer_is_skipped() {
        let board = Board::starting_position();
        let (main, capture, cont) = tables();
        // No piece stands on e5, so this killer cannot be played here.
        let stale = Move::new(Square::E5, Square::E6);
        let mut picker = MovePicker::new(
            &board,
            None,
            5,
            &main,
            &capture,
            [&cont; 6],
            [Some(stale), None],
            None,
            false,
        );
        let out = drain(&mut picker, false);
        assert!(!out.contains(&stale));
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn skip_quiets_leaves_only_captures_and_refutations() {
        let board = Board::starting_position();
        let (main, capture, cont) = tables();
        let killer = Move::new(Square::G1, Square::F3);
        let mut picker = MovePicker::new(
            &board,
            None,
            5,
            &main,
            &capture,
            [&cont; 6],
            [Some(killer), None],
            None,
            false,
        );
        assert_eq!(drain(&mut picker, true), vec![killer]);
    }

    #[test]
    fn skip_quiets_can_cut_off_a_started_quiet_stage() {
        let board = Board::starting_position();
        let (main, capture, cont) = tables();
        let mut picker = MovePicker::new(
            &board, None, 5, &main, &capture, [&cont; 6], [None; 2], None, false,
        );
        assert!(picker.next_move(false).is_some());
        assert!(picker.next_move(false).is_some());
        // Flipping the flag mid-node silences the remaining quiets.
        assert_eq!(picker.next_move(true), None);
    }

    #[test]
    fn losing_captures_come_out_last_in_encounter_order() {
        // Both pawns the knight can grab are defended by another pawn.
        let board: Board = "k7/1p3p2/2p1p3/8/3N4/8/8/K7 w - - 0 1".parse().unwrap();
        let (main, capture, cont) = tables();
        let mut picker = MovePicker::new(
            &board, None, 5, &main, &capture, [&cont; 6], [None; 2], None, false,
        );
        let out = drain(&mut picker, false);
        let bad = [
            Move::new(Square::D4, Square::C6),
            Move::new(Square::D4, Square::E6),
        ];
        assert_eq!(&out[out.len() - 2..], &bad);
        // Everything before them is quiet.
        for mv in &out[..out.len() - 2] {
            assert!(!board.is_capture(*mv), "{mv} should be quiet");
        }
    }

    #[test]
    fn quiet_order_follows_main_history() {
        let board: Board = "k7/8/8/8/8/8/4P2P/K7 w - - 0 1".parse().unwrap();
        let (mut main, capture, cont) = tables();
        let boosted = Move::new(Square::H2, Square::H3);
        main.update(Color::White, boosted, 500);
        let mut picker = MovePicker::new(
            &board, None, 5, &main, &capture, [&cont; 6], [None; 2], None, false,
        );
        assert_eq!(picker.next_move(false), Some(boosted));
    }

    #[test]
    fn quiets_below_the_sort_limit_trail_the_sorted_ones() {
        let board: Board = "k7/8/8/8/8/8/4P2P/K7 w - - 0 1".parse().unwrap();
        let (mut main, capture, cont) = tables();
        let poisoned = Move::new(Square::E2, Square::E3);
        // 2 * -5000 = -10000, below the depth-1 limit of -3000.
        main.update(Color::White, poisoned, -5000);
        let mut picker = MovePicker::new(
            &board, None, 1, &main, &capture, [&cont; 6], [None; 2], None, false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out.last(), Some(&poisoned));
    }

    // --- Evasions ---

    #[test]
    fn evasions_capture_the_checker_first() {
        // Black rook on e4 checks; the b1 bishop can take it.
        let board: Board = "4k3/8/8/8/4r3/8/3P1P2/RB2K3 w - - 0 1".parse().unwrap();
        let (main, capture, cont) = tables();
        let mut picker = MovePicker::new(
            &board, None, 5, &main, &capture, [&cont; 6], [None; 2], None, false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out[0], Move::new(Square::B1, Square::E4));
        assert_eq!(out.len(), 3);
        assert!(out.contains(&Move::new(Square::E1, Square::D1)));
        assert!(out.contains(&Move::new(Square::E1, Square::F1)));
    }

    #[test]
    fn evasion_table_move_still_comes_first() {
        let board: Board = "4k3/8/8/8/4r3/8/3P1P2/RB2K3 w - - 0 1".parse().unwrap();
        let (main, capture, cont) = tables();
        let tt = Move::new(Square::E1, Square::F1);
        let mut picker = MovePicker::new(
            &board,
            Some(tt),
            5,
            &main,
            &capture,
            [&cont; 6],
            [None; 2],
            None,
            false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out[0], tt);
        assert_eq!(out.len(), 3);
        assert_eq!(out.iter().filter(|&&mv| mv == tt).count(), 1);
    }

    // --- ProbCut ---

    #[test]
    fn probcut_emits_only_captures_beating_the_threshold() {
        // dxe5 trades evenly (SEE 0); Rxe5 loses the rook for a pawn.
        let board: Board = "k3r3/8/8/4p3/3P4/8/4R3/K7 w - - 0 1".parse().unwrap();
        let capture = CaptureHistory::new();
        let mut picker = MovePicker::new_probcut(&board, None, 0, &capture, false);
        assert_eq!(drain(&mut picker, false), vec![Move::new(Square::D4, Square::E5)]);

        let mut picker = MovePicker::new_probcut(&board, None, 1, &capture, false);
        assert_eq!(drain(&mut picker, false), Vec::<Move>::new());
    }

    #[test]
    fn probcut_rejects_a_table_move_that_fails_the_threshold() {
        let board: Board = "k3r3/8/8/4p3/3P4/8/4R3/K7 w - - 0 1".parse().unwrap();
        let capture = CaptureHistory::new();
        let losing = Move::new(Square::E2, Square::E5);
        let mut picker = MovePicker::new_probcut(&board, Some(losing), 0, &capture, false);
        let out = drain(&mut picker, false);
        assert_eq!(out, vec![Move::new(Square::D4, Square::E5)]);
    }

    // --- Quiescence ---

    #[test]
    fn quiescence_below_recapture_depth_restricts_to_the_square() {
        // Captures available: dxe5, Rxe5, and gxh3 off to the side.
        let board: Board = "k3r3/8/8/4p3/3P4/7b/4R1P1/K7 w - - 0 1".parse().unwrap();
        let (main, capture, cont) = tables();
        let mut picker = MovePicker::new_quiescence(
            &board,
            None,
            -6,
            &main,
            &capture,
            [&cont; 6],
            Some(Square::E5),
            false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|mv| mv.dest() == Square::E5));
    }

    #[test]
    fn quiescence_above_recapture_depth_takes_everything() {
        let board: Board = "k3r3/8/8/4p3/3P4/7b/4R1P1/K7 w - - 0 1".parse().unwrap();
        let (main, capture, cont) = tables();
        let mut picker = MovePicker::new_quiescence(
            &board,
            None,
            -1,
            &main,
            &capture,
            [&cont; 6],
            Some(Square::E5),
            false,
        );
        assert_eq!(drain(&mut picker, false).len(), 3);
    }

    #[test]
    fn quiescence_adds_quiet_checks_only_at_the_frontier_depth() {
        // No captures; the e4 knight can check from d6 or f6.
        let board: Board = "4k3/8/8/8/4N3/8/8/4K3 w - - 0 1".parse().unwrap();
        let (main, capture, cont) = tables();

        let mut picker = MovePicker::new_quiescence(
            &board, None, 0, &main, &capture, [&cont; 6], None, false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out.len(), 2);
        assert!(out.contains(&Move::new(Square::E4, Square::D6)));
        assert!(out.contains(&Move::new(Square::E4, Square::F6)));

        let mut picker = MovePicker::new_quiescence(
            &board, None, -1, &main, &capture, [&cont; 6], None, false,
        );
        assert_eq!(drain(&mut picker, false), Vec::<Move>::new());
    }

    #[test]
    fn quiescence_in_check_runs_the_evasion_chain() {
        let board: Board = "4k3/8/8/8/4r3/8/3P1P2/RB2K3 w - - 0 1".parse().unwrap();
        let (main, capture, cont) = tables();
        let mut picker = MovePicker::new_quiescence(
            &board, None, -3, &main, &capture, [&cont; 6], None, false,
        );
        let out = drain(&mut picker, false);
        assert_eq!(out[0], Move::new(Square::B1, Square::E4));
        assert_eq!(out.len(), 3);
    }
}
