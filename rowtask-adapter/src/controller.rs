use rowtask::{
    Buffer, FrameReport, RowScheduler, SchedulerError, SchedulerOptions, Task, TickReport,
};

use crate::{ScrollThrottle, StackLayout};

/// What one [`Controller::tick`] did.
#[derive(Debug, Default)]
pub struct ControllerTick {
    /// Set when a pending scroll/resize was flushed into a scheduling tick.
    pub update: Option<TickReport>,
    pub frame: FrameReport,
}

/// A framework-neutral controller that owns a [`StackLayout`] and the `rowtask::RowScheduler`
/// over it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_viewport_height` when UI events occur
/// - `tick(now_ms)` once per frame, which flushes throttled events and runs queued executes
///
/// Scroll and resize events go through a [`ScrollThrottle`]. An event swallowed by the throttle
/// is not lost: the layout is already updated, and the next `tick` that passes the throttle
/// schedules against it.
#[derive(Debug)]
pub struct Controller<P> {
    scheduler: RowScheduler<P, StackLayout>,
    throttle: ScrollThrottle,
    dirty: bool,
}

impl<P> Controller<P> {
    /// Creates a controller whose scheduler targets the layout's own selectors, with a buffer
    /// of one viewport height.
    pub fn new(layout: StackLayout, throttle_ms: u64) -> Self {
        let options = SchedulerOptions::new(layout.parent_selector(), layout.scroll_selector())
            .with_buffer(Buffer::Viewport);
        Self::with_options(layout, options, throttle_ms)
    }

    pub fn with_options(layout: StackLayout, options: SchedulerOptions, throttle_ms: u64) -> Self {
        Self {
            scheduler: RowScheduler::with_options(layout, options),
            throttle: ScrollThrottle::new(throttle_ms),
            dirty: true,
        }
    }

    pub fn from_scheduler(scheduler: RowScheduler<P, StackLayout>, throttle_ms: u64) -> Self {
        Self {
            scheduler,
            throttle: ScrollThrottle::new(throttle_ms),
            dirty: true,
        }
    }

    pub fn scheduler(&self) -> &RowScheduler<P, StackLayout> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut RowScheduler<P, StackLayout> {
        &mut self.scheduler
    }

    pub fn into_scheduler(self) -> RowScheduler<P, StackLayout> {
        self.scheduler
    }

    pub fn layout(&self) -> &StackLayout {
        self.scheduler.metrics()
    }

    /// Mutable layout access. Any change marks the controller dirty, so the next `tick` that
    /// passes the throttle reschedules.
    pub fn layout_mut(&mut self) -> &mut StackLayout {
        self.dirty = true;
        self.scheduler.metrics_mut()
    }

    pub fn throttle(&self) -> &ScrollThrottle {
        &self.throttle
    }

    /// Whether a scroll, resize or layout change is waiting for a scheduling tick.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends a row to the layout and registers it with the scheduler. Returns its index.
    pub fn push_row(
        &mut self,
        height: u32,
        tasks: impl IntoIterator<Item = Task<P, StackLayout>>,
        payload: P,
    ) -> usize {
        let index = self.scheduler.metrics_mut().push_row(height);
        self.scheduler.inject(index, tasks, payload);
        self.dirty = true;
        index
    }

    /// Call this when the UI reports a scroll offset change.
    ///
    /// Returns the tick report if the throttle let the event through, `Ok(None)` otherwise.
    pub fn on_scroll(
        &mut self,
        scroll_top: u64,
        now_ms: u64,
    ) -> Result<Option<TickReport>, SchedulerError> {
        self.scheduler.metrics_mut().set_scroll_top(scroll_top);
        rtrace!(
            scroll_top,
            applied = self.layout().current_scroll_top(),
            now_ms,
            "Controller::on_scroll"
        );
        self.dirty = true;
        self.try_update(now_ms)
    }

    /// Call this when the scroll container is resized.
    pub fn on_viewport_height(
        &mut self,
        client_height: u32,
        now_ms: u64,
    ) -> Result<Option<TickReport>, SchedulerError> {
        self.scheduler.metrics_mut().set_client_height(client_height);
        rtrace!(client_height, now_ms, "Controller::on_viewport_height");
        self.dirty = true;
        self.try_update(now_ms)
    }

    /// Advances the controller by one frame.
    ///
    /// Flushes a throttled scroll/resize if the throttle allows it, then runs the executes the
    /// scheduler has queued.
    pub fn tick(&mut self, now_ms: u64) -> Result<ControllerTick, SchedulerError> {
        let update = if self.dirty {
            self.try_update(now_ms)?
        } else {
            None
        };
        let frame = self.scheduler.run_frame();
        Ok(ControllerTick { update, frame })
    }

    /// Schedules against the current layout right away, ignoring the throttle.
    pub fn flush(&mut self) -> Result<TickReport, SchedulerError> {
        let report = self.scheduler.update_row_states()?;
        self.dirty = false;
        Ok(report)
    }

    /// Drops every row from both the layout and the scheduler.
    pub fn clear(&mut self) {
        self.scheduler.destroy();
        self.scheduler.metrics_mut().clear();
        self.throttle.reset();
        self.dirty = true;
    }

    fn try_update(&mut self, now_ms: u64) -> Result<Option<TickReport>, SchedulerError> {
        if !self.throttle.try_pass(now_ms) {
            return Ok(None);
        }
        self.flush().map(Some)
    }
}
