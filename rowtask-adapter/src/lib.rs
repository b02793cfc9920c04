//! Adapter utilities for the `rowtask` crate.
//!
//! The `rowtask` crate is UI-agnostic and only talks to a layout through
//! `rowtask::RowMetricsProvider`. This crate provides small, framework-neutral pieces commonly
//! needed by hosts that own their geometry (headless renderers, TUIs, tests):
//!
//! - [`StackLayout`]: an in-memory row layout implementing `RowMetricsProvider`
//! - [`Controller`]: scroll/resize event handling with throttled scheduling ticks
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod layout;
mod throttle;

#[cfg(test)]
mod tests;

pub use controller::{Controller, ControllerTick};
pub use layout::{Node, StackLayout};
pub use throttle::ScrollThrottle;
