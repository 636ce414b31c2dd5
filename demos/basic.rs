// Example: a 3-column grid, scrolled once, with synchronous commits.
use std::sync::Arc;

use infiniscroll::{ScrollWindow, WindowOptions};

fn main() {
    let opts = WindowOptions::new()
        .with_viewport_size(300, 400)
        .with_item_size(100, 100)
        .with_rate_limit_ms(0)
        .with_on_visible_items_changed(Some(|items: &[Arc<String>]| {
            println!("committed {} items", items.len());
        }));
    let mut w = ScrollWindow::with_items(opts, (0..1_000).map(|i| Arc::new(format!("item {i}"))));
    println!("initial: {:?}", w.metrics());

    w.set_scroll_position(1_000, 0);
    let m = w.metrics();
    println!(
        "visible={}..={} mounted={:?} spacer_before={:.1} spacer_after={:.1}",
        m.first_visible,
        m.last_visible,
        m.mounted_range(),
        m.spacer_before(),
        m.spacer_after()
    );
    println!("last mounted: {:?}", w.visible_items().last());
}
