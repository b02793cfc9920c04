use alloc::vec::Vec;

use crate::{TaskFailure, VisibleRange};

/// A lightweight, serializable snapshot of the scheduler.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerState {
    pub visible: VisibleRange,
    pub rows: usize,
    pub active_rows: usize,
    pub pending_executes: usize,
}

/// What one `update_row_states` call did.
#[derive(Debug, Default)]
pub struct TickReport {
    pub range: VisibleRange,
    /// Rows that entered the window (their executes were queued or run).
    pub entered: usize,
    /// Rows that left the window.
    pub left: usize,
    /// Whether this tick asked the host for a frame.
    pub frame_requested: bool,
    pub failures: Vec<TaskFailure>,
}

/// What one `run_frame` call did.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Rows whose executes ran.
    pub executed: usize,
    /// Queued executes dropped because their row left, was replaced or was removed.
    pub stale: usize,
    pub failures: Vec<TaskFailure>,
}
