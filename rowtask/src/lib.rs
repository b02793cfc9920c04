//! A viewport-aware lazy task scheduler for rows of large virtualized tables.
//!
//! For adapter-level utilities (an in-memory layout, a throttled scroll controller), see the
//! `rowtask-adapter` crate.
//!
//! Rows carry named tasks (word segmentation, highlighting, height measurement, ...). On every
//! scroll or resize tick the scheduler binary-searches the rows intersecting the viewport plus a
//! look-ahead/look-behind buffer, runs `cleanup` for rows that left and schedules `execute` for
//! rows that entered, so per-row work is only ever done for what is (nearly) on screen.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - a [`RowMetricsProvider`] over its layout tree (row offsets/heights, scroll position)
//! - calls to [`RowScheduler::update_row_states`] from its scroll/resize handlers
//! - calls to [`RowScheduler::run_frame`] before each repaint
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
#[cfg(feature = "std")]
pub mod global;
mod locator;
mod options;
mod provider;
mod registry;
mod scheduler;
mod state;
mod task;
mod transition;
mod types;


pub use error::{SchedulerError, TaskError};
pub use locator::{container_offset, locate};
pub use options::{Buffer, SchedulerOptions};
pub use provider::RowMetricsProvider;
pub use registry::RowRecord;
pub use scheduler::RowScheduler;
pub use state::{FrameReport, SchedulerState, TickReport};
pub use task::{Row, Task, TaskFailure, TaskPhase, TaskResult};
pub use types::{RowMetrics, VisibleRange, Window};
