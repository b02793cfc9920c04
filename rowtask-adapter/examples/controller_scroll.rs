// Example: a throttled controller over an in-memory layout.
use rowtask::{Row, Task};
use rowtask_adapter::{Controller, StackLayout};

fn main() {
    let layout = StackLayout::new("#rows", "#scroll", 400).with_rows_offset(32);
    let mut c = Controller::new(layout, 16);

    for i in 0..5_000usize {
        let height = 20 + (i % 3) as u32 * 10;
        let task = Task::new("measure", |row: &Row<'_, usize, StackLayout>| {
            let _ = row.height();
            Ok(())
        });
        c.push_row(height, [task], i);
    }

    // Simulated wheel events every 4ms, frames every 16ms.
    let mut now_ms = 0u64;
    let mut scroll_top = 0u64;
    while now_ms <= 400 {
        scroll_top += 120;
        if let Err(err) = c.on_scroll(scroll_top, now_ms) {
            eprintln!("scroll: {err}");
        }
        if now_ms % 16 == 0 {
            match c.tick(now_ms) {
                Ok(tick) => {
                    if let Some(update) = tick.update {
                        println!(
                            "t={now_ms} range={:?} executed={} stale={}",
                            update.range, tick.frame.executed, tick.frame.stale
                        );
                    }
                }
                Err(err) => eprintln!("tick: {err}"),
            }
        }
        now_ms += 4;
    }
    println!("state={:?}", c.scheduler().state());
}
