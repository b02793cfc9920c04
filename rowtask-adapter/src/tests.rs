use crate::*;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use rowtask::{
    Row, RowMetricsProvider, SchedulerError, SchedulerOptions, Task, VisibleRange,
    container_offset,
};

type Log = Rc<RefCell<Vec<(char, usize)>>>;

fn logging_task(log: &Log) -> Task<usize, StackLayout> {
    let on_execute = log.clone();
    let on_cleanup = log.clone();
    Task::new("paint", move |row: &Row<'_, usize, StackLayout>| {
        on_execute.borrow_mut().push(('E', row.index()));
        Ok(())
    })
    .with_cleanup(move |row: &Row<'_, usize, StackLayout>| {
        on_cleanup.borrow_mut().push(('C', row.index()));
        Ok(())
    })
}

fn count(log: &Log, kind: char) -> usize {
    log.borrow().iter().filter(|(k, _)| *k == kind).count()
}

fn controller(rows: usize, height: u32, throttle_ms: u64, log: &Log) -> Controller<usize> {
    let layout = StackLayout::new("#rows", "#scroll", 500);
    let mut c = Controller::new(layout, throttle_ms);
    for i in 0..rows {
        assert_eq!(c.push_row(height, [logging_task(log)], i), i);
    }
    c
}

#[test]
fn layout_stacks_rows_and_relayouts_on_height_change() {
    let mut layout = StackLayout::new("#rows", "#scroll", 100);
    for h in [10, 20, 30] {
        layout.push_row(h);
    }
    assert_eq!(layout.row_top(2), Some(30));
    assert_eq!(layout.content_height(), 60);

    assert!(layout.set_row_height(1, 5));
    assert_eq!(layout.row_top(1), Some(10));
    assert_eq!(layout.row_top(2), Some(15));
    assert_eq!(layout.content_height(), 45);

    assert!(!layout.set_row_height(3, 5));
    assert_eq!(layout.row_height(3), None);
}

#[test]
fn layout_clamps_scroll_like_a_browser() {
    let mut layout = StackLayout::new("#rows", "#scroll", 500).with_rows_offset(100);
    for _ in 0..100 {
        layout.push_row(50);
    }
    assert_eq!(layout.scroll_height(), 5100);
    assert_eq!(layout.max_scroll_top(), 4600);
    assert_eq!(layout.set_scroll_top(10_000), 4600);

    layout.truncate(10);
    assert_eq!(layout.current_scroll_top(), 100);

    layout.set_client_height(1000);
    assert_eq!(layout.current_scroll_top(), 0);

    layout.clear();
    assert_eq!(layout.row_count(), 0);
    assert_eq!(layout.max_scroll_top(), 0);
}

#[test]
fn layout_resolves_selectors_and_mounted_rows() {
    let mut layout = StackLayout::new("#rows", "#scroll", 500).with_rows_offset(40);
    layout.push_row(20);
    layout.push_row(20);

    assert_eq!(layout.query_selector("#scroll"), Some(Node::Scroll));
    assert_eq!(layout.query_selector("#rows"), Some(Node::Rows));
    assert_eq!(layout.query_selector("#nope"), None);

    assert_eq!(layout.resolve_row_element(&Node::Rows, 1), Some(Node::Row(1)));
    assert_eq!(layout.resolve_row_element(&Node::Scroll, 1), None);
    assert_eq!(layout.resolve_row_element(&Node::Rows, 2), None);

    assert!(layout.set_mounted(1, false));
    assert!(!layout.is_mounted(1));
    assert_eq!(layout.resolve_row_element(&Node::Rows, 1), None);
    assert_eq!(layout.row_metrics(&Node::Rows, 1), rowtask::RowMetrics::default());
    assert!(!layout.set_mounted(5, false));

    assert_eq!(container_offset(&layout, &Node::Rows, &Node::Scroll), 40);
}

#[test]
fn throttle_lets_one_event_per_interval() {
    let mut t = ScrollThrottle::new(16);
    assert!(t.try_pass(0));
    assert!(!t.try_pass(10));
    assert!(!t.try_pass(15));
    assert!(t.try_pass(16));
    assert_eq!(t.last_pass_ms(), Some(16));

    t.reset();
    assert!(t.try_pass(17));

    let mut unthrottled = ScrollThrottle::new(0);
    assert!(unthrottled.try_pass(5));
    assert!(unthrottled.try_pass(5));
}

#[test]
fn controller_runs_executes_on_tick() {
    let log: Log = Rc::default();
    let mut c = controller(100, 50, 16, &log);

    let report = c.on_scroll(0, 0).unwrap().unwrap();
    // Buffer::Viewport: the window is 0..1000.
    assert_eq!(report.range, VisibleRange::new(0, 20));
    assert!(report.frame_requested);
    assert_eq!(count(&log, 'E'), 0);

    let tick = c.tick(1).unwrap();
    assert!(tick.update.is_none());
    assert_eq!(tick.frame.executed, 20);
    assert_eq!(count(&log, 'E'), 20);
    assert!(!c.is_dirty());
}

#[test]
fn throttled_scroll_is_flushed_by_a_later_tick() {
    let log: Log = Rc::default();
    let mut c = controller(100, 50, 16, &log);
    c.on_scroll(0, 0).unwrap();
    c.tick(0).unwrap();
    log.borrow_mut().clear();

    assert!(c.on_scroll(2000, 5).unwrap().is_none());
    assert!(c.is_dirty());
    assert_eq!(c.scheduler().visible_range(), VisibleRange::new(0, 20));

    let tick = c.tick(10).unwrap();
    assert!(tick.update.is_none());
    assert_eq!(tick.frame.executed, 0);

    let tick = c.tick(16).unwrap();
    let update = tick.update.unwrap();
    // Window 1500..3000.
    assert_eq!(update.range, VisibleRange::new(30, 60));
    assert_eq!(update.left, 20);
    assert_eq!(update.entered, 30);
    assert_eq!(tick.frame.executed, 30);
    assert_eq!(count(&log, 'C'), 20);
    assert_eq!(count(&log, 'E'), 30);
    assert!(!c.is_dirty());
}

#[test]
fn scroll_past_the_end_is_clamped() {
    let log: Log = Rc::default();
    let mut c = controller(100, 50, 0, &log);
    let report = c.on_scroll(1_000_000, 0).unwrap().unwrap();
    assert_eq!(c.layout().current_scroll_top(), 4500);
    // Window 4000..5500.
    assert_eq!(report.range, VisibleRange::new(80, 100));
}

#[test]
fn resize_reschedules() {
    let log: Log = Rc::default();
    let mut c = controller(100, 50, 0, &log);
    c.on_scroll(0, 0).unwrap();
    c.tick(0).unwrap();

    let report = c.on_viewport_height(250, 1).unwrap().unwrap();
    // Buffer follows the viewport: window 0..500.
    assert_eq!(report.range, VisibleRange::new(0, 10));
    assert_eq!(report.left, 10);
    assert_eq!(count(&log, 'C'), 10);
}

#[test]
fn layout_changes_mark_the_controller_dirty() {
    let log: Log = Rc::default();
    let mut c = controller(100, 50, 0, &log);
    c.flush().unwrap();
    assert!(!c.is_dirty());

    for i in 0..100 {
        c.layout_mut().set_row_height(i, 100);
    }
    assert!(c.is_dirty());
    let tick = c.tick(1).unwrap();
    assert_eq!(tick.update.unwrap().range, VisibleRange::new(0, 10));
    assert_eq!(tick.frame.executed, 10);
}

#[test]
fn configuration_errors_keep_the_controller_dirty() {
    let log: Log = Rc::default();
    let layout = StackLayout::new("#rows", "#scroll", 500);
    let mut c = Controller::with_options(layout, SchedulerOptions::new("#rows", "#nope"), 0);
    c.push_row(50, [logging_task(&log)], 0);

    assert_eq!(
        c.on_scroll(0, 0).unwrap_err(),
        SchedulerError::ScrollContainerNotFound("#nope".into())
    );
    assert!(c.is_dirty());

    c.scheduler_mut()
        .update_options(|o| o.scroll_selector = Some("#scroll".into()));
    let tick = c.tick(1).unwrap();
    assert_eq!(tick.update.unwrap().range, VisibleRange::new(0, 1));
    assert_eq!(tick.frame.executed, 1);
}

#[test]
fn clear_drops_rows_everywhere() {
    let log: Log = Rc::default();
    let mut c = controller(10, 50, 0, &log);
    c.flush().unwrap();
    c.clear();

    assert!(c.scheduler().is_empty());
    assert_eq!(c.layout().row_count(), 0);
    assert_eq!(c.scheduler().pending_len(), 0);
    let tick = c.tick(0).unwrap();
    assert_eq!(tick.update.unwrap().range, VisibleRange::EMPTY);
    assert_eq!(count(&log, 'E'), 0);
    assert_eq!(count(&log, 'C'), 0);
}
