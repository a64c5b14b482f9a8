//! History tables: statistics the search accumulates about which moves
//! refute which positions.
//!
//! All tables share the same "gravity" update rule: a bonus is clamped
//! to the table bound, then added minus a decay term proportional to the
//! current entry, so values saturate smoothly at the bound instead of
//! clipping. The search driver owns these tables and updates them after
//! each node; the picker only reads them through shared references.

use ordo_core::{Color, Move, Piece, PieceKind, Square};
use tracing::debug;

/// Gravity update: saturates at `±bound` without hard clipping.
fn gravity(entry: &mut i32, bonus: i32, bound: i32) {
    let clamped = bonus.clamp(-bound, bound);
    *entry += clamped - *entry * clamped.abs() / bound;
    debug_assert!(entry.abs() <= bound);
}

/// Butterfly table for quiet moves, indexed by `[side][from-to pair]`.
pub struct MainHistory {
    table: [[i32; 4096]; 2],
}

impl MainHistory {
    /// Saturation bound for entries.
    pub const BOUND: i32 = 7183;

    /// Create a zeroed table.
    pub const fn new() -> MainHistory {
        MainHistory {
            table: [[0; 4096]; 2],
        }
    }

    /// Score for `mv` played by `color`.
    #[inline]
    pub fn get(&self, color: Color, mv: Move) -> i32 {
        self.table[color.index()][mv.from_to()]
    }

    /// Apply a (possibly negative) bonus to the entry for `mv`.
    pub fn update(&mut self, color: Color, mv: Move, bonus: i32) {
        gravity(&mut self.table[color.index()][mv.from_to()], bonus, Self::BOUND);
    }

    /// Zero every entry.
    pub fn clear(&mut self) {
        self.table = [[0; 4096]; 2];
        debug!("cleared main history");
    }
}

impl Default for MainHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// One slice of continuation history: scores indexed by
/// `[moved piece][destination]`, conditioned on a single earlier move.
///
/// The picker receives six of these, for the moves played 1 through 6
/// plies above the current node.
#[derive(Clone)]
pub struct PieceToHistory {
    table: [[i32; 64]; 12],
}

impl PieceToHistory {
    /// Saturation bound for entries.
    pub const BOUND: i32 = 29952;

    /// Create a zeroed slice.
    pub const fn new() -> PieceToHistory {
        PieceToHistory {
            table: [[0; 64]; 12],
        }
    }

    /// Score for `piece` landing on `to`.
    #[inline]
    pub fn get(&self, piece: Piece, to: Square) -> i32 {
        self.table[piece.index()][to.index()]
    }

    /// Apply a (possibly negative) bonus to the entry for `piece` on `to`.
    pub fn update(&mut self, piece: Piece, to: Square, bonus: i32) {
        gravity(
            &mut self.table[piece.index()][to.index()],
            bonus,
            Self::BOUND,
        );
    }
}

/// Owner table for continuation history: one [`PieceToHistory`] per
/// `[prior moved piece][prior destination]` pair, heap-allocated because
/// the full table runs to several megabytes.
pub struct ContinuationHistory {
    table: Box<[PieceToHistory]>,
}

impl ContinuationHistory {
    /// Create a zeroed table.
    pub fn new() -> ContinuationHistory {
        ContinuationHistory {
            table: vec![PieceToHistory::new(); Piece::COUNT * Square::COUNT].into_boxed_slice(),
        }
    }

    /// The slice conditioned on `piece` having just landed on `to`.
    #[inline]
    pub fn get(&self, piece: Piece, to: Square) -> &PieceToHistory {
        &self.table[piece.index() * Square::COUNT + to.index()]
    }

    /// Mutable access for the driver's post-node updates.
    #[inline]
    pub fn get_mut(&mut self, piece: Piece, to: Square) -> &mut PieceToHistory {
        &mut self.table[piece.index() * Square::COUNT + to.index()]
    }

    /// Zero every entry.
    pub fn clear(&mut self) {
        for slice in &mut self.table {
            *slice = PieceToHistory::new();
        }
        debug!("cleared continuation history");
    }
}

impl Default for ContinuationHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture statistics indexed by `[moved piece][destination][victim]`,
/// with a dedicated slot for captures that land on an empty square
/// (en passant and promotion pushes scored in the capture stage).
pub struct CaptureHistory {
    table: [[[i32; 7]; 64]; 12],
}

impl CaptureHistory {
    /// Saturation bound for entries.
    pub const BOUND: i32 = 10692;

    /// Create a zeroed table.
    pub const fn new() -> CaptureHistory {
        CaptureHistory {
            table: [[[0; 7]; 64]; 12],
        }
    }

    #[inline]
    fn victim_slot(victim: Option<PieceKind>) -> usize {
        victim.map_or(6, PieceKind::index)
    }

    /// Score for `piece` capturing `victim` on `to`.
    #[inline]
    pub fn get(&self, piece: Piece, to: Square, victim: Option<PieceKind>) -> i32 {
        self.table[piece.index()][to.index()][Self::victim_slot(victim)]
    }

    /// Apply a (possibly negative) bonus to the entry.
    pub fn update(&mut self, piece: Piece, to: Square, victim: Option<PieceKind>, bonus: i32) {
        gravity(
            &mut self.table[piece.index()][to.index()][Self::victim_slot(victim)],
            bonus,
            Self::BOUND,
        );
    }

    /// Zero every entry.
    pub fn clear(&mut self) {
        self.table = [[[0; 7]; 64]; 12];
        debug!("cleared capture history");
    }
}

impl Default for CaptureHistory {
    fn default() -> Self {
        Self::new()
    }
}
