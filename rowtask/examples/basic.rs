// Example: a tiny layout provider, a scroll, and one frame.
use rowtask::{Row, RowMetricsProvider, RowScheduler, SchedulerOptions, Task};

#[derive(Clone, Copy, Debug, PartialEq)]
enum El {
    Scroll,
    Body,
    Row(usize),
}

/// 10k rows of 24px inside `#body`, scrolled inside `#viewport`.
struct Table {
    rows: usize,
    scroll_top: u64,
}

impl RowMetricsProvider for Table {
    type Element = El;

    fn query_selector(&self, selector: &str) -> Option<El> {
        match selector {
            "#viewport" => Some(El::Scroll),
            "#body" => Some(El::Body),
            _ => None,
        }
    }

    fn resolve_row_element(&self, _parent: &El, index: usize) -> Option<El> {
        (index < self.rows).then_some(El::Row(index))
    }

    fn offset_top(&self, el: &El) -> u64 {
        match *el {
            El::Row(i) => i as u64 * 24,
            _ => 0,
        }
    }

    fn offset_height(&self, el: &El) -> u32 {
        match *el {
            El::Row(_) => 24,
            _ => 480,
        }
    }

    fn offset_parent(&self, el: &El) -> Option<El> {
        match *el {
            El::Scroll => None,
            El::Body => Some(El::Scroll),
            El::Row(_) => Some(El::Body),
        }
    }

    fn scroll_top(&self, _el: &El) -> u64 {
        self.scroll_top
    }

    fn client_height(&self, _el: &El) -> u32 {
        480
    }
}

fn highlight(row: &Row<'_, String, Table>) -> rowtask::TaskResult {
    let (top, height) = (row.offset_top(), row.height());
    if row.index() % 2_000 == 0 {
        println!("highlight #{} {:?} at {top}+{height}", row.index(), row.payload());
    }
    Ok(())
}

fn main() {
    let table = Table {
        rows: 10_000,
        scroll_top: 0,
    };
    let mut s = RowScheduler::with_options(
        table,
        SchedulerOptions::new("#body", "#viewport").with_buffer_px(240),
    );
    s.set_on_frame_requested(|| println!("frame requested"));

    for i in 0..10_000 {
        let task = Task::new("highlight", highlight).with_cleanup(|_row| Ok(()));
        s.inject(i, [task], format!("line {i}"));
    }

    for scroll_top in [0, 48_000, 96_000] {
        s.metrics_mut().scroll_top = scroll_top;
        let tick = s.update_row_states().unwrap_or_default();
        let frame = s.run_frame();
        println!(
            "scroll_top={scroll_top} range={:?} entered={} left={} executed={}",
            tick.range, tick.entered, tick.left, frame.executed
        );
    }
    println!("state={:?}", s.state());
}
