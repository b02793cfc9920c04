//! An optional, explicitly installed default scheduler for the current thread.
//!
//! Prefer owning a [`RowScheduler`] per table. This module exists for hosts that want one
//! shared instance: construct it at startup, hand it to [`install_default`], and reach it
//! through [`with_default`]. Nothing is created implicitly.

use std::any::Any;
use std::boxed::Box;
use std::cell::RefCell;

use crate::{RowMetricsProvider, RowScheduler};

thread_local! {
    static DEFAULT: RefCell<Option<Box<dyn Any>>> = const { RefCell::new(None) };
}

/// Installs `scheduler` as this thread's default instance, replacing any previous one.
///
/// Returns `true` if an instance was replaced.
pub fn install_default<P: 'static, M: RowMetricsProvider + 'static>(
    scheduler: RowScheduler<P, M>,
) -> bool {
    DEFAULT.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            rwarn!("install_default called from inside with_default");
            return false;
        };
        slot.replace(Box::new(scheduler)).is_some()
    })
}

pub fn has_default() -> bool {
    DEFAULT.with(|slot| slot.try_borrow().map(|s| s.is_some()).unwrap_or(true))
}

/// Runs `f` with the default instance.
///
/// Returns `None` when no instance is installed, when it has different type parameters, or
/// when called re-entrantly from inside another `with_default`.
pub fn with_default<P: 'static, M: RowMetricsProvider + 'static, R>(
    f: impl FnOnce(&mut RowScheduler<P, M>) -> R,
) -> Option<R> {
    DEFAULT.with(|slot| {
        let mut slot = slot.try_borrow_mut().ok()?;
        let scheduler = slot.as_mut()?.downcast_mut::<RowScheduler<P, M>>()?;
        Some(f(scheduler))
    })
}

/// Removes and returns the default instance if it has the requested type parameters.
pub fn take_default<P: 'static, M: RowMetricsProvider + 'static>() -> Option<RowScheduler<P, M>> {
    DEFAULT.with(|slot| {
        let mut slot = slot.try_borrow_mut().ok()?;
        let boxed = slot.take()?;
        match boxed.downcast::<RowScheduler<P, M>>() {
            Ok(scheduler) => Some(*scheduler),
            Err(other) => {
                *slot = Some(other);
                None
            }
        }
    })
}
