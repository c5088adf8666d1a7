//! A click counter, driven end to end without a display server.
//!
//! The headless toolkit stands in for a real one: its event loop returns
//! immediately, so the demo pumps three clicks by hand and prints what the
//! widget tree looks like afterwards. Run with `RUST_LOG=trace` to watch
//! the reconciler decide what to touch.

use std::cell::Cell;
use std::rc::Rc;

use estuary::prelude::*;
use estuary::toolkit::Value;
use estuary_headless::Headless;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn view(count: &Rc<Cell<i64>>) -> Window {
    let clicks = count.get();
    let count = Rc::clone(count);
    window(
        "Counter",
        vflex()
            .spacing(6)
            .child(label(format!("{clicks} clicks")))
            .child(button("Count").on_click(move || count.set(count.get() + 1))),
    )
    .default_size(240, 120)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let toolkit = Headless::new();
    let count = Rc::new(Cell::new(0_i64));

    let model = Rc::clone(&count);
    let app = App::new(toolkit.clone(), move || AnyWidget::from(view(&model)));
    app.run()?;

    if let Some(counter) = toolkit.find("button") {
        for _ in 0..3 {
            toolkit.emit(counter, "clicked", &Value::Unit);
        }
    }

    if let Some(caption) = toolkit.find("label") {
        info!(clicks = count.get(), shown = ?toolkit.value(caption, "text"), "done");
    }
    Ok(())
}
