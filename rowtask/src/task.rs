use alloc::rc::Rc;
use alloc::string::String;

use crate::{RowMetricsProvider, TaskError};

pub type TaskResult = Result<(), TaskError>;

/// A borrowed view of one registered row, handed to task callbacks.
///
/// Geometry is never cached: `offset_top`, `height` and `element` go through the
/// [`RowMetricsProvider`] on every call, since rows may be recycled between reads.
pub struct Row<'a, P, M: RowMetricsProvider> {
    index: usize,
    payload: &'a P,
    metrics: &'a M,
    parent: Option<&'a M::Element>,
}

impl<'a, P, M: RowMetricsProvider> Row<'a, P, M> {
    pub(crate) fn new(
        index: usize,
        payload: &'a P,
        metrics: &'a M,
        parent: Option<&'a M::Element>,
    ) -> Self {
        Self {
            index,
            payload,
            metrics,
            parent,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn payload(&self) -> &'a P {
        self.payload
    }

    pub fn metrics(&self) -> &'a M {
        self.metrics
    }

    pub fn element(&self) -> Option<M::Element> {
        let parent = self.parent?;
        self.metrics.resolve_row_element(parent, self.index)
    }

    pub fn offset_top(&self) -> u64 {
        self.element()
            .map(|el| self.metrics.offset_top(&el))
            .unwrap_or(0)
    }

    pub fn height(&self) -> u32 {
        self.element()
            .map(|el| self.metrics.offset_height(&el))
            .unwrap_or(0)
    }
}

impl<P: core::fmt::Debug, M: RowMetricsProvider> core::fmt::Debug for Row<'_, P, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Row")
            .field("index", &self.index)
            .field("payload", self.payload)
            .finish_non_exhaustive()
    }
}

/// A named unit of deferred work attached to a row.
///
/// `execute` runs when the row enters the extended viewport, `cleanup` (if any) when it leaves.
/// Keys are unique within a row: merging a task whose key already exists replaces only the
/// existing `execute`.
pub struct Task<P, M: RowMetricsProvider> {
    pub(crate) key: String,
    pub(crate) execute: Rc<dyn Fn(&Row<'_, P, M>) -> TaskResult>,
    pub(crate) cleanup: Option<Rc<dyn Fn(&Row<'_, P, M>) -> TaskResult>>,
    /// This task's execute ran and its cleanup has not.
    pub(crate) active: bool,
}

impl<P, M: RowMetricsProvider> Task<P, M> {
    pub fn new(
        key: impl Into<String>,
        execute: impl Fn(&Row<'_, P, M>) -> TaskResult + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            execute: Rc::new(execute),
            cleanup: None,
            active: false,
        }
    }

    pub fn with_cleanup(
        mut self,
        cleanup: impl Fn(&Row<'_, P, M>) -> TaskResult + 'static,
    ) -> Self {
        self.cleanup = Some(Rc::new(cleanup));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Whether this task's execute ran and its cleanup is still owed.
    ///
    /// A task attached to a row that is already active stays inactive until the row enters
    /// the window again.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn run(&self, phase: TaskPhase, row: &Row<'_, P, M>) -> TaskResult {
        match phase {
            TaskPhase::Execute => (self.execute)(row),
            TaskPhase::Cleanup => match &self.cleanup {
                Some(cleanup) => cleanup(row),
                None => Ok(()),
            },
        }
    }
}

impl<P, M: RowMetricsProvider> Clone for Task<P, M> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            execute: Rc::clone(&self.execute),
            cleanup: self.cleanup.clone(),
            active: false,
        }
    }
}

impl<P, M: RowMetricsProvider> core::fmt::Debug for Task<P, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Task")
            .field("key", &self.key)
            .field("has_cleanup", &self.cleanup.is_some())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskPhase {
    Execute,
    Cleanup,
}

/// A task callback that returned an error. The scheduler does not retry it.
#[derive(Debug)]
pub struct TaskFailure {
    pub index: usize,
    pub key: String,
    pub phase: TaskPhase,
    pub error: TaskError,
}
