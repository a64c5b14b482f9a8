//! Move ordering for ordo's alpha-beta search.
//!
//! The search driver owns the history tables in [`history`] and hands
//! references to a [`MovePicker`] at each node. The picker generates
//! pseudo-legal moves lazily, stage by stage, so a node that cuts off
//! early never pays for scoring and sorting the moves it skipped.

pub mod history;
pub mod movepick;

pub use history::{CaptureHistory, ContinuationHistory, MainHistory, PieceToHistory};
pub use movepick::MovePicker;
