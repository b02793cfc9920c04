use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::registry::{Registry, RowRecord};
use crate::{
    FrameReport, Row, RowMetricsProvider, TaskFailure, TaskPhase, TickReport, VisibleRange,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PendingExecute {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

/// Diffs consecutive visible ranges and drives the execute/cleanup lifecycle.
#[derive(Debug, Default)]
pub(crate) struct TransitionEngine {
    last: VisibleRange,
    next_generation: u64,
    queue: VecDeque<PendingExecute>,
}

/// Where task callbacks read row geometry from during one pass.
pub(crate) struct RowContext<'a, M: RowMetricsProvider> {
    pub(crate) metrics: &'a M,
    pub(crate) parent: Option<&'a M::Element>,
}

impl TransitionEngine {
    pub(crate) fn last(&self) -> VisibleRange {
        self.last
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn reset(&mut self) {
        self.last = VisibleRange::EMPTY;
        self.queue.clear();
    }

    /// Every visibility flip gets a fresh stamp, unique across rows and record replacements,
    /// so a queued execute can tell whether its row flipped again since it was queued.
    fn stamp(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }

    /// Moves from the last range to `next`.
    ///
    /// Cleanups of leaving rows run synchronously. Executes of entering rows are queued for
    /// the next frame, or run right away when `defer` is false.
    pub(crate) fn apply<P, M: RowMetricsProvider>(
        &mut self,
        rows: &mut Registry<P, M>,
        next: VisibleRange,
        defer: bool,
        cx: &RowContext<'_, M>,
        report: &mut TickReport,
    ) {
        let prev = self.last;
        report.range = next;

        for index in leaving(prev, next) {
            let Some(record) = rows.get_mut(index) else {
                continue;
            };
            if !record.is_processed || record.is_out_of_view {
                continue;
            }
            record.is_out_of_view = true;
            record.generation = self.stamp();
            report.left += 1;
            // A row whose execute is still queued has nothing to clean up; the stamp above
            // cancels the queued execute.
            if core::mem::replace(&mut record.is_active, false) {
                run_tasks(record, TaskPhase::Cleanup, cx, &mut report.failures);
            }
        }

        let was_idle = self.queue.is_empty();
        for index in next.iter() {
            let Some(record) = rows.get_mut(index) else {
                continue;
            };
            if record.is_processed && !record.is_out_of_view {
                continue;
            }
            record.is_processed = true;
            record.is_out_of_view = false;
            let generation = self.stamp();
            record.generation = generation;
            report.entered += 1;
            if defer {
                self.queue.push_back(PendingExecute { index, generation });
            } else {
                record.is_active = true;
                run_tasks(record, TaskPhase::Execute, cx, &mut report.failures);
            }
        }
        report.frame_requested = was_idle && !self.queue.is_empty();

        if prev != next {
            rdebug!(
                prev_start = prev.start_index,
                prev_end = prev.end_index,
                start = next.start_index,
                end = next.end_index,
                entered = report.entered,
                left = report.left,
                "visible range changed"
            );
        }
        self.last = next;
    }

    /// Runs the queued executes whose rows are still in the state they were queued in.
    pub(crate) fn run_frame<P, M: RowMetricsProvider>(
        &mut self,
        rows: &mut Registry<P, M>,
        cx: &RowContext<'_, M>,
        report: &mut FrameReport,
    ) {
        let queue = core::mem::take(&mut self.queue);
        for pending in queue {
            let Some(record) = rows.get_mut(pending.index) else {
                report.stale += 1;
                continue;
            };
            if record.generation != pending.generation
                || record.is_active
                || record.is_out_of_view
            {
                report.stale += 1;
                continue;
            }
            record.is_active = true;
            report.executed += 1;
            run_tasks(record, TaskPhase::Execute, cx, &mut report.failures);
        }
        rtrace!(
            executed = report.executed,
            stale = report.stale,
            "run_frame"
        );
    }
}

/// Indexes of `prev` that are not part of `next`, in ascending order.
pub(crate) fn leaving(prev: VisibleRange, next: VisibleRange) -> impl Iterator<Item = usize> {
    let head = prev.start_index..prev.end_index.min(next.start_index);
    let tail = prev.start_index.max(next.end_index)..prev.end_index;
    head.chain(tail)
}

/// Runs one phase of the tasks on `record`. A failing task is logged and recorded; the
/// remaining tasks still run.
///
/// Cleanup only reaches tasks whose execute ran, so a task attached while the row was active
/// is skipped until its first execute.
fn run_tasks<P, M: RowMetricsProvider>(
    record: &mut RowRecord<P, M>,
    phase: TaskPhase,
    cx: &RowContext<'_, M>,
    failures: &mut Vec<TaskFailure>,
) {
    let row = Row::new(record.index, &record.payload, cx.metrics, cx.parent);
    for task in record.tasks.iter_mut() {
        match phase {
            TaskPhase::Execute => task.active = true,
            TaskPhase::Cleanup => {
                if !core::mem::replace(&mut task.active, false) {
                    continue;
                }
            }
        }
        if let Err(error) = task.run(phase, &row) {
            rwarn!(
                index = record.index,
                key = %task.key,
                phase = ?phase,
                error = %error,
                "task failed"
            );
            failures.push(TaskFailure {
                index: record.index,
                key: task.key.clone(),
                phase,
                error,
            });
        }
    }
}
