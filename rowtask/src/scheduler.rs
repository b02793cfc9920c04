use alloc::rc::Rc;
use alloc::string::String;

use crate::locator::{self, container_offset, locate};
use crate::registry::{Registry, RowRecord};
use crate::transition::{RowContext, TransitionEngine};
use crate::{
    Buffer, FrameReport, Row, RowMetricsProvider, SchedulerError, SchedulerOptions,
    SchedulerState, Task, TickReport, VisibleRange, Window,
};

/// A viewport-aware lazy task scheduler for table rows.
///
/// The rendering layer registers rows with [`Self::inject`], calls
/// [`Self::update_row_states`] from its (throttled) scroll and resize handlers, and calls
/// [`Self::run_frame`] right before the next repaint. The scheduler keeps track of which rows
/// are inside the viewport plus a buffer, and makes sure every task's `execute` and `cleanup`
/// alternate: never two executes without a cleanup in between, and the other way around.
///
/// This type is single-threaded by construction (task callbacks are `Rc`). Each table owns its
/// own instance; see [`crate::global`] for an explicitly installed default instance.
pub struct RowScheduler<P, M: RowMetricsProvider> {
    options: SchedulerOptions,
    metrics: M,
    rows: Registry<P, M>,
    engine: TransitionEngine,
    on_frame_requested: Option<Rc<dyn Fn()>>,
}

struct Containers<E> {
    scroll: E,
    parent: E,
}

impl<P, M: RowMetricsProvider> RowScheduler<P, M> {
    pub fn new(metrics: M) -> Self {
        Self::with_options(metrics, SchedulerOptions::default())
    }

    pub fn with_options(metrics: M, options: SchedulerOptions) -> Self {
        rdebug!(
            parent = ?options.parent_selector,
            scroll = ?options.scroll_selector,
            buffer = ?options.buffer,
            "RowScheduler::new"
        );
        Self {
            options,
            metrics,
            rows: Registry::new(),
            engine: TransitionEngine::default(),
            on_frame_requested: None,
        }
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SchedulerOptions) {
        rtrace!(
            parent = ?options.parent_selector,
            scroll = ?options.scroll_selector,
            buffer = ?options.buffer,
            "RowScheduler::set_options"
        );
        self.options = options;
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut SchedulerOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// Sets the row container, the scroll container and the buffer in one go.
    ///
    /// The last visible range is kept until the next `update_row_states`.
    pub fn configure(
        &mut self,
        parent_selector: impl Into<String>,
        scroll_selector: impl Into<String>,
        buffer: Buffer,
    ) {
        let parent_selector = parent_selector.into();
        let scroll_selector = scroll_selector.into();
        self.update_options(|o| {
            o.parent_selector = Some(parent_selector);
            o.scroll_selector = Some(scroll_selector);
            o.buffer = buffer;
        });
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Mutable access to the layout provider, e.g. for headless hosts that own their layout.
    pub fn metrics_mut(&mut self) -> &mut M {
        &mut self.metrics
    }

    /// Called whenever the execute queue goes from empty to non-empty, so the host can request
    /// an animation frame and call [`Self::run_frame`] from it.
    pub fn set_on_frame_requested(&mut self, on_frame_requested: impl Fn() + 'static) {
        self.on_frame_requested = Some(Rc::new(on_frame_requested));
    }

    pub fn clear_on_frame_requested(&mut self) {
        self.on_frame_requested = None;
    }

    /// Creates or replaces the row at `index`.
    ///
    /// The new record starts unprocessed and in view. Nothing runs here: the next
    /// `update_row_states` decides whether the row executes. Tasks of a replaced record are
    /// dropped without cleanup, even if they were active: the host must detach whatever the old
    /// row's executes set up before replacing it. Duplicate keys in `tasks` merge as in
    /// [`Self::set_tasks`].
    pub fn inject(&mut self, index: usize, tasks: impl IntoIterator<Item = Task<P, M>>, payload: P) {
        let mut record = RowRecord::new(index, payload);
        record.merge_tasks(tasks);
        rtrace!(index, tasks = record.tasks.len(), "inject");
        self.rows.insert(record);
    }

    /// Merges `tasks` into an existing row. Returns `false` (and does nothing) for an unknown
    /// index.
    ///
    /// A task whose key is already attached only replaces that task's `execute`; its cleanup
    /// and position stay. Other tasks are appended. No callback runs as part of this call.
    pub fn set_tasks(&mut self, index: usize, tasks: impl IntoIterator<Item = Task<P, M>>) -> bool {
        let Some(record) = self.rows.get_mut(index) else {
            return false;
        };
        record.merge_tasks(tasks);
        true
    }

    /// Detaches the task `key` from the row at `index` without running its cleanup.
    ///
    /// Returns whether a task was removed.
    pub fn remove_task(&mut self, index: usize, key: &str) -> bool {
        self.rows
            .get_mut(index)
            .is_some_and(|record| record.remove_task(key))
    }

    pub fn row(&self, index: usize) -> Option<&RowRecord<P, M>> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.len() == 0
    }

    /// The range computed by the last successful `update_row_states`.
    pub fn visible_range(&self) -> VisibleRange {
        self.engine.last()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.engine.pending_len() > 0
    }

    pub fn pending_len(&self) -> usize {
        self.engine.pending_len()
    }

    pub fn state(&self) -> SchedulerState {
        SchedulerState {
            visible: self.engine.last(),
            rows: self.rows.len(),
            active_rows: self.rows.iter().filter(|r| r.is_active).count(),
            pending_executes: self.engine.pending_len(),
        }
    }

    /// Iterates over every registered record in index order.
    pub fn for_each_row(&self, mut f: impl FnMut(&RowRecord<P, M>)) {
        for record in self.rows.iter() {
            f(record);
        }
    }

    /// Calls `f` for every registered row, visible or not, in index order.
    ///
    /// Meant for layout recomputation; it does not touch visibility state.
    pub fn calc_row_height(&self, mut f: impl FnMut(&Row<'_, P, M>)) {
        let parent = self
            .options
            .parent_selector
            .as_deref()
            .and_then(|s| self.metrics.query_selector(s));
        for record in self.rows.iter() {
            f(&Row::new(
                record.index,
                &record.payload,
                &self.metrics,
                parent.as_ref(),
            ));
        }
    }

    /// The scheduling tick.
    ///
    /// Locates the rows inside the viewport plus buffer, cleans up rows that left (right
    /// away) and schedules executes for rows that entered (on the next [`Self::run_frame`],
    /// unless `defer_execute` is off).
    ///
    /// Configuration and precondition problems are logged and returned as an error; in that
    /// case nothing changes, and a later call with a fixed setup recovers. Task failures do
    /// not fail the tick, they are listed in the report.
    pub fn update_row_states(&mut self) -> Result<TickReport, SchedulerError> {
        let containers = self.resolve_containers().inspect_err(|err| {
            rwarn!(error = %err, "update_row_states skipped");
        })?;

        self.rows.check_contiguous().inspect_err(|err| {
            rwarn!(error = %err, "update_row_states skipped");
        })?;

        let count = self.rows.len();
        if self.options.check_monotonic {
            locator::check_monotonic(&self.metrics, &containers.parent, count).inspect_err(
                |err| {
                    rwarn!(error = %err, "update_row_states skipped");
                },
            )?;
        }

        let metrics = &self.metrics;
        let scroll_top = metrics.scroll_top(&containers.scroll);
        let client_height = metrics.client_height(&containers.scroll);
        let offset = container_offset(metrics, &containers.parent, &containers.scroll);
        let buffer = self.options.buffer.resolve(client_height);
        let window = Window::extended(scroll_top, client_height, offset, buffer);
        let next = locate(count, window, |i| metrics.row_metrics(&containers.parent, i));
        rtrace!(
            scroll_top,
            client_height,
            offset,
            buffer,
            start = next.start_index,
            end = next.end_index,
            "update_row_states"
        );

        let cx = RowContext {
            metrics,
            parent: Some(&containers.parent),
        };
        let mut report = TickReport::default();
        self.engine.apply(
            &mut self.rows,
            next,
            self.options.defer_execute,
            &cx,
            &mut report,
        );

        if report.frame_requested {
            if let Some(cb) = &self.on_frame_requested {
                cb();
            }
        }
        Ok(report)
    }

    /// Runs the executes queued by previous ticks. Call this once per frame, before repaint.
    ///
    /// Executes whose row left the window (or was replaced or destroyed) since they were queued
    /// are dropped.
    pub fn run_frame(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        if self.engine.pending_len() == 0 {
            return report;
        }
        let parent = self
            .options
            .parent_selector
            .as_deref()
            .and_then(|s| self.metrics.query_selector(s));
        let cx = RowContext {
            metrics: &self.metrics,
            parent: parent.as_ref(),
        };
        self.engine.run_frame(&mut self.rows, &cx, &mut report);
        report
    }

    /// Checks the layout preconditions of the binary search: indexes are exactly `0..len` and
    /// mounted rows have non-decreasing offsets. Probes every row.
    pub fn validate_layout(&self) -> Result<(), SchedulerError> {
        self.rows.check_contiguous()?;
        let parent = self.resolve_parent()?;
        locator::check_monotonic(&self.metrics, &parent, self.rows.len())
    }

    /// Drops every row, every queued execute and the last visible range.
    ///
    /// Cleanups are not run: at teardown the caller has already detached the rows.
    pub fn destroy(&mut self) {
        rdebug!(rows = self.rows.len(), "destroy");
        self.rows.clear();
        self.engine.reset();
    }

    fn resolve_parent(&self) -> Result<M::Element, SchedulerError> {
        let selector = self
            .options
            .parent_selector
            .as_deref()
            .ok_or(SchedulerError::ParentSelectorUnset)?;
        self.metrics
            .query_selector(selector)
            .ok_or_else(|| SchedulerError::RowContainerNotFound(selector.into()))
    }

    fn resolve_containers(&self) -> Result<Containers<M::Element>, SchedulerError> {
        let selector = self
            .options
            .scroll_selector
            .as_deref()
            .ok_or(SchedulerError::ScrollSelectorUnset)?;
        let scroll = self
            .metrics
            .query_selector(selector)
            .ok_or_else(|| SchedulerError::ScrollContainerNotFound(selector.into()))?;
        let parent = self.resolve_parent()?;
        Ok(Containers { scroll, parent })
    }
}

impl<P, M: RowMetricsProvider + core::fmt::Debug> core::fmt::Debug for RowScheduler<P, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RowScheduler")
            .field("options", &self.options)
            .field("metrics", &self.metrics)
            .field("rows", &self.rows.len())
            .field("visible", &self.engine.last())
            .field("pending", &self.engine.pending_len())
            .finish_non_exhaustive()
    }
}
