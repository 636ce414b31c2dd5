// Example: a host loop feeding scroll events, ticking the rate limiter and appending pages
// when the mounted slice reaches the end of the collection.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use infiniscroll::{BindingArgs, ScrollWindow};

const PAGE: usize = 30;

fn main() {
    let args = BindingArgs::from_pairs([
        ("scrollAxis", "y"),
        ("viewportWidth", "320"),
        ("viewportHeight", "480"),
        ("itemWidth", "100"),
        ("itemHeight", "120"),
        ("numPagesPadding", "1"),
        ("rateLimit", "250"),
    ]);
    let mut w = match ScrollWindow::from_binding_args(&args, (0..PAGE).map(Arc::new)) {
        Ok(w) => w,
        Err(err) => {
            eprintln!("bad binding: {err}");
            return;
        }
    };

    let commits = Arc::new(AtomicU64::new(0));
    w.set_on_visible_items_changed(Some({
        let commits = Arc::clone(&commits);
        move |items: &[Arc<usize>]| {
            commits.fetch_add(1, Ordering::Relaxed);
            println!("  commit: {} items mounted", items.len());
        }
    }));

    let mut now_ms = 0u64;
    let mut scroll = 0i64;
    while now_ms < 3_000 {
        // Simulate a 60fps frame with a steady fling.
        now_ms += 16;
        scroll += 40;
        w.set_scroll_y(scroll, now_ms);

        if w.tick(now_ms) && w.last_hidden_index() == w.len() {
            let start = w.len();
            w.extend_items((start..start + PAGE).map(Arc::new), now_ms);
            println!("t={now_ms}ms loaded page, len={}", w.len());
        }
    }
    w.flush();
    println!(
        "done: scroll={} first_visible={} commits={} len={}",
        w.scroll_position(),
        w.first_visible_index(),
        commits.load(Ordering::Relaxed),
        w.len()
    );
    w.dispose();
}
