use crate::{RowMetrics, RowMetricsProvider, SchedulerError, VisibleRange, Window};

/// Upper bound on offset-parent hops; a provider that reports a cycle stops here.
pub(crate) const MAX_OFFSET_PARENT_DEPTH: usize = 256;

/// Sums `offset_top` from `row_container` up the offset-parent chain, stopping before
/// `scroll_container` (or at the root when the scroll container is not on the chain).
pub fn container_offset<M: RowMetricsProvider>(
    metrics: &M,
    row_container: &M::Element,
    scroll_container: &M::Element,
) -> u64 {
    let mut total = 0u64;
    let mut current = Some(row_container.clone());
    let mut depth = 0usize;
    while let Some(element) = current {
        if element == *scroll_container {
            break;
        }
        if depth == MAX_OFFSET_PARENT_DEPTH {
            rwarn!(depth, "container_offset: offset parent chain too deep");
            break;
        }
        total = total.saturating_add(metrics.offset_top(&element));
        current = metrics.offset_parent(&element);
        depth += 1;
    }
    total
}

/// Finds the rows of `0..count` that intersect `window`.
///
/// Expects `probe(i).top` to be non-decreasing in `i` (rows laid out top to bottom). Both
/// bounds are found with a binary search, so `probe` is called `O(log count)` times. A row
/// whose edge only touches the window is outside.
pub fn locate(
    count: usize,
    window: Window,
    mut probe: impl FnMut(usize) -> RowMetrics,
) -> VisibleRange {
    if count == 0 || window.is_empty() {
        return VisibleRange::EMPTY;
    }

    let start = partition_point(count, |i| probe(i).end() <= window.top);
    let end = partition_point(count, |i| probe(i).top < window.bottom);
    rtrace!(count, top = window.top, bottom = window.bottom, start, end, "locate");
    VisibleRange::new(start, end)
}

/// Returns the first index in `0..count` for which `pred` is false, assuming `pred` holds for
/// a prefix of the indexes.
fn partition_point(count: usize, mut pred: impl FnMut(usize) -> bool) -> usize {
    let mut lo = 0usize;
    let mut hi = count;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Checks that mounted rows in `0..count` have non-decreasing offsets.
///
/// Unmounted rows are skipped.
pub(crate) fn check_monotonic<M: RowMetricsProvider>(
    metrics: &M,
    parent: &M::Element,
    count: usize,
) -> Result<(), SchedulerError> {
    let mut previous: Option<u64> = None;
    for index in 0..count {
        let Some(element) = metrics.resolve_row_element(parent, index) else {
            continue;
        };
        let current = metrics.offset_top(&element);
        if let Some(previous) = previous {
            if current < previous {
                return Err(SchedulerError::NonMonotonicOffsets {
                    index,
                    previous,
                    current,
                });
            }
        }
        previous = Some(current);
    }
    Ok(())
}
