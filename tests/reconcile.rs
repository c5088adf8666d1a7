//! Render passes over a live application: what a pass touches and what it
//! leaves alone.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use estuary::prelude::*;
use estuary_headless::{Headless, Op};

#[test]
fn test_unchanged_view_second_pass_is_silent() {
    let toolkit = Headless::new();
    let app = App::new(toolkit.clone(), || {
        AnyWidget::from(window(
            "app",
            vflex()
                .spacing(4)
                .child(label("hello"))
                .child(button("go")),
        ))
    });
    app.run().unwrap();
    toolkit.take_ops();

    app.handle().redraw().unwrap();
    assert_eq!(toolkit.take_ops(), vec![], "identical tree, zero native calls");
}

#[test]
fn test_removing_list_entry_detaches_without_rebuilding() {
    let toolkit = Headless::new();
    let items = Rc::new(RefCell::new(vec!["a", "b", "c"]));

    let model = Rc::clone(&items);
    let app = App::new(toolkit.clone(), move || {
        let mut list = vflex();
        for item in model.borrow().iter() {
            list = list.child(label(*item));
        }
        AnyWidget::from(window("app", list))
    });
    app.run().unwrap();
    toolkit.take_ops();

    *items.borrow_mut() = vec!["a", "c"];
    app.handle().redraw().unwrap();

    let ops = toolkit.take_ops();
    let removes = ops
        .iter()
        .filter(|op| matches!(op, Op::RemoveChild { .. }))
        .count();
    let creates = ops
        .iter()
        .filter(|op| matches!(op, Op::Create { .. }))
        .count();
    assert_eq!(removes, 1, "one entry gone, one detach: {ops:?}");
    assert_eq!(creates, 0, "survivors update in place: {ops:?}");
}

#[test]
fn test_kind_change_attaches_replacement_before_teardown() {
    let toolkit = Headless::new();
    let show_button = Rc::new(Cell::new(false));

    let flag = Rc::clone(&show_button);
    let app = App::new(toolkit.clone(), move || {
        let body: AnyWidget = if flag.get() {
            button("same spot").into()
        } else {
            label("same spot").into()
        };
        AnyWidget::from(window("app", body))
    });
    app.run().unwrap();
    let old = toolkit.find("label").unwrap();
    toolkit.take_ops();

    show_button.set(true);
    app.handle().redraw().unwrap();

    let ops = toolkit.take_ops();
    let creates = ops
        .iter()
        .filter(|op| matches!(op, Op::Create { .. }))
        .count();
    assert_eq!(creates, 1, "exactly the replacement is built: {ops:?}");

    let attach_at = ops
        .iter()
        .position(|op| matches!(op, Op::SetChild { child: Some(_), .. }))
        .expect("replacement attached");
    let release_at = ops
        .iter()
        .position(|op| matches!(op, Op::Release { widget } if *widget == old))
        .expect("old widget released");
    assert!(
        attach_at < release_at,
        "teardown must follow re-attach: {ops:?}"
    );
}

#[test]
fn test_grid_region_move_is_one_detach_one_attach() {
    let toolkit = Headless::new();
    let moved = Rc::new(Cell::new(false));

    let flag = Rc::clone(&moved);
    let app = App::new(toolkit.clone(), move || {
        let region = if flag.get() {
            Region::at(1, 1)
        } else {
            Region::at(0, 0)
        };
        AnyWidget::from(window("app", grid().place(label("cell"), region)))
    });
    app.run().unwrap();
    let child = toolkit.find("label").unwrap();
    let parent = toolkit.find("grid").unwrap();
    toolkit.take_ops();

    moved.set(true);
    app.handle().redraw().unwrap();

    assert_eq!(
        toolkit.take_ops(),
        vec![
            Op::RemoveChild { parent, child },
            Op::AttachGrid {
                parent,
                child,
                region: Region::at(1, 1),
            },
        ],
        "a region move re-attaches the same widget, nothing more"
    );
}

#[test]
fn test_keyed_page_swap_removes_before_adding() {
    let toolkit = Headless::new();
    let keys = Rc::new(RefCell::new(vec!["x", "y"]));

    let model = Rc::clone(&keys);
    let app = App::new(toolkit.clone(), move || {
        let mut pages = deck();
        for key in model.borrow().iter() {
            pages = pages.page(*key, label(*key));
        }
        AnyWidget::from(window("app", pages))
    });
    app.run().unwrap();
    let x_widget = toolkit.find_all("label")[0];
    let y_widget = toolkit.find_all("label")[1];
    toolkit.take_ops();

    *keys.borrow_mut() = vec!["y", "z"];
    app.handle().redraw().unwrap();

    let ops = toolkit.take_ops();
    let remove_at = ops
        .iter()
        .position(|op| matches!(op, Op::RemoveChild { child, .. } if *child == x_widget))
        .expect("x detached");
    let add_at = ops
        .iter()
        .position(|op| matches!(op, Op::AddKeyed { key, .. } if key == "z"))
        .expect("z attached");
    assert!(remove_at < add_at, "removal precedes addition: {ops:?}");
    assert!(
        !ops.iter().any(|op| op.touches(y_widget)),
        "the surviving page is untouched: {ops:?}"
    );
}
