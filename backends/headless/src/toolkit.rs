//! The recording toolkit.

use core::cell::{Cell, RefCell};
use core::fmt;
use core::num::NonZeroU64;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use estuary_core::error::ToolkitError;
use estuary_core::layout::Region;
use estuary_core::toolkit::{
    Capabilities, ConnectionId, RawWidget, Response, SignalHandler, TextureId, Toolkit, Value,
};
use tracing::trace;

use crate::op::Op;

struct WidgetRecord {
    class: String,
    alive: bool,
    properties: HashMap<String, Value>,
    children: Vec<RawWidget>,
    keys: HashMap<String, RawWidget>,
}

impl WidgetRecord {
    fn new(class: &str) -> Self {
        Self {
            class: class.to_owned(),
            alive: true,
            properties: HashMap::new(),
            children: Vec::new(),
            keys: HashMap::new(),
        }
    }
}

struct HandlerRecord {
    widget: RawWidget,
    signal: String,
    handler: Rc<dyn Fn(&Value) -> Value>,
}

struct Inner {
    capabilities: Capabilities,
    next_widget: Cell<NonZeroU64>,
    next_connection: Cell<u64>,
    next_texture: Cell<u64>,
    ops: RefCell<Vec<Op>>,
    order: RefCell<Vec<RawWidget>>,
    widgets: RefCell<HashMap<RawWidget, WidgetRecord>>,
    handlers: RefCell<HashMap<ConnectionId, HandlerRecord>>,
    responses: RefCell<VecDeque<Response>>,
    failing_images: RefCell<HashSet<String>>,
}

/// A toolkit with nothing behind it.
///
/// Widgets are rows in a table, properties are map entries, and signals
/// fire only when [`emit`](Self::emit) is called. Clones share the same
/// underlying store, so a test can keep one clone for stimulus and
/// inspection while the application drives another.
///
/// The outer event loop returns immediately: tests pump events by hand.
#[derive(Clone)]
pub struct Headless {
    inner: Rc<Inner>,
}

impl Headless {
    /// A fresh toolkit reporting feature level 4.10.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::new(4, 10))
    }

    /// A fresh toolkit reporting the given feature level.
    #[must_use]
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            inner: Rc::new(Inner {
                capabilities,
                next_widget: Cell::new(NonZeroU64::MIN),
                next_connection: Cell::new(0),
                next_texture: Cell::new(0),
                ops: RefCell::new(Vec::new()),
                order: RefCell::new(Vec::new()),
                widgets: RefCell::new(HashMap::new()),
                handlers: RefCell::new(HashMap::new()),
                responses: RefCell::new(VecDeque::new()),
                failing_images: RefCell::new(HashSet::new()),
            }),
        }
    }

    /// A copy of the recorded operations.
    #[must_use]
    pub fn ops(&self) -> Vec<Op> {
        self.inner.ops.borrow().clone()
    }

    /// Drains and returns the recorded operations.
    pub fn take_ops(&self) -> Vec<Op> {
        self.inner.ops.borrow_mut().drain(..).collect()
    }

    /// Fires a signal on a widget, returning the handler's answer.
    ///
    /// Handlers installed for other signals or other widgets do not run.
    /// When several handlers match they run in connection order and the
    /// last answer wins. Not recorded in the op log: emitting is test
    /// stimulus, not framework behavior.
    pub fn emit(&self, widget: RawWidget, signal: &str, payload: &Value) -> Value {
        let matching: Vec<(ConnectionId, Rc<dyn Fn(&Value) -> Value>)> = {
            let handlers = self.inner.handlers.borrow();
            let mut found: Vec<_> = handlers
                .iter()
                .filter(|(_, record)| record.widget == widget && record.signal == signal)
                .map(|(id, record)| (*id, Rc::clone(&record.handler)))
                .collect();
            found.sort_by_key(|(id, _)| id.0);
            found
        };
        trace!(?widget, signal, handlers = matching.len(), "emitting signal");
        let mut answer = Value::Unit;
        for (_, handler) in matching {
            answer = handler(payload);
        }
        answer
    }

    /// Writes a property without recording, as a user edit would.
    pub fn set_value(&self, widget: RawWidget, name: &str, value: Value) {
        if let Some(record) = self.inner.widgets.borrow_mut().get_mut(&widget) {
            record.properties.insert(name.to_owned(), value);
        }
    }

    /// The stored value of a property, if any was ever written.
    #[must_use]
    pub fn value(&self, widget: RawWidget, name: &str) -> Option<Value> {
        self.inner
            .widgets
            .borrow()
            .get(&widget)
            .and_then(|record| record.properties.get(name).cloned())
    }

    /// The first live widget of the given class, in creation order.
    #[must_use]
    pub fn find(&self, class: &str) -> Option<RawWidget> {
        self.find_all(class).into_iter().next()
    }

    /// Every live widget of the given class, in creation order.
    #[must_use]
    pub fn find_all(&self, class: &str) -> Vec<RawWidget> {
        let widgets = self.inner.widgets.borrow();
        self.inner
            .order
            .borrow()
            .iter()
            .filter(|raw| {
                widgets
                    .get(raw)
                    .is_some_and(|record| record.alive && record.class == class)
            })
            .copied()
            .collect()
    }

    /// The class a widget was created with.
    #[must_use]
    pub fn class_of(&self, widget: RawWidget) -> Option<String> {
        self.inner
            .widgets
            .borrow()
            .get(&widget)
            .map(|record| record.class.clone())
    }

    /// The children of a widget, in attachment order.
    #[must_use]
    pub fn children_of(&self, parent: RawWidget) -> Vec<RawWidget> {
        self.inner
            .widgets
            .borrow()
            .get(&parent)
            .map(|record| record.children.clone())
            .unwrap_or_default()
    }

    /// The child stored under a key, if any.
    #[must_use]
    pub fn keyed_child(&self, parent: RawWidget, key: &str) -> Option<RawWidget> {
        self.inner
            .widgets
            .borrow()
            .get(&parent)
            .and_then(|record| record.keys.get(key).copied())
    }

    /// Whether the framework still holds its reference to a widget.
    #[must_use]
    pub fn alive(&self, widget: RawWidget) -> bool {
        self.inner
            .widgets
            .borrow()
            .get(&widget)
            .is_some_and(|record| record.alive)
    }

    /// Queues the response the next modal loop concludes with.
    pub fn queue_response(&self, response: Response) {
        self.inner.responses.borrow_mut().push_back(response);
    }

    /// Makes future loads of the given image source fail.
    pub fn fail_image(&self, source: &str) {
        self.inner
            .failing_images
            .borrow_mut()
            .insert(source.to_owned());
    }

    fn record(&self, op: Op) {
        self.inner.ops.borrow_mut().push(op);
    }

    fn with_record<T>(
        &self,
        widget: RawWidget,
        f: impl FnOnce(&mut WidgetRecord) -> T,
    ) -> Option<T> {
        self.inner.widgets.borrow_mut().get_mut(&widget).map(f)
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Headless {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Headless")
            .field("widgets", &self.inner.widgets.borrow().len())
            .field("ops", &self.inner.ops.borrow().len())
            .finish()
    }
}

impl Toolkit for Headless {
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities
    }

    fn create(&self, class: &str) -> RawWidget {
        let id = self.inner.next_widget.get();
        self.inner.next_widget.set(id.saturating_add(1));
        let raw = RawWidget::new(id);
        self.inner
            .widgets
            .borrow_mut()
            .insert(raw, WidgetRecord::new(class));
        self.inner.order.borrow_mut().push(raw);
        self.record(Op::Create {
            widget: raw,
            class: class.to_owned(),
        });
        raw
    }

    fn release(&self, widget: RawWidget) {
        self.with_record(widget, |record| record.alive = false);
        self.record(Op::Release { widget });
    }

    fn set_property(&self, widget: RawWidget, name: &str, value: Value) {
        self.with_record(widget, |record| {
            record.properties.insert(name.to_owned(), value.clone());
        });
        self.record(Op::SetProperty {
            widget,
            name: name.to_owned(),
            value,
        });
    }

    fn property(&self, widget: RawWidget, name: &str) -> Value {
        self.value(widget, name).unwrap_or_default()
    }

    fn connect(&self, widget: RawWidget, signal: &str, handler: SignalHandler) -> ConnectionId {
        let id = ConnectionId(self.inner.next_connection.get());
        self.inner.next_connection.set(id.0 + 1);
        self.inner.handlers.borrow_mut().insert(id, HandlerRecord {
            widget,
            signal: signal.to_owned(),
            handler: Rc::from(handler),
        });
        self.record(Op::Connect {
            widget,
            signal: signal.to_owned(),
            id,
        });
        id
    }

    fn disconnect(&self, widget: RawWidget, id: ConnectionId) {
        self.inner.handlers.borrow_mut().remove(&id);
        self.record(Op::Disconnect { widget, id });
    }

    fn set_child(&self, parent: RawWidget, child: Option<RawWidget>) {
        self.with_record(parent, |record| {
            record.children.clear();
            record.children.extend(child);
        });
        self.record(Op::SetChild { parent, child });
    }

    fn append(&self, parent: RawWidget, child: RawWidget) {
        self.with_record(parent, |record| record.children.push(child));
        self.record(Op::Append { parent, child });
    }

    fn insert_after(&self, parent: RawWidget, child: RawWidget, sibling: Option<RawWidget>) {
        self.with_record(parent, |record| {
            let at = match sibling {
                Some(anchor) => record
                    .children
                    .iter()
                    .position(|c| *c == anchor)
                    .map_or(record.children.len(), |i| i + 1),
                None => 0,
            };
            record.children.insert(at, child);
        });
        self.record(Op::InsertAfter {
            parent,
            child,
            sibling,
        });
    }

    fn remove_child(&self, parent: RawWidget, child: RawWidget) {
        self.with_record(parent, |record| {
            record.children.retain(|c| *c != child);
            record.keys.retain(|_, c| *c != child);
        });
        self.record(Op::RemoveChild { parent, child });
    }

    fn attach_grid(&self, parent: RawWidget, child: RawWidget, region: Region) {
        self.with_record(parent, |record| record.children.push(child));
        self.record(Op::AttachGrid {
            parent,
            child,
            region,
        });
    }

    fn add_keyed(&self, parent: RawWidget, child: RawWidget, key: &str) {
        self.with_record(parent, |record| {
            record.children.push(child);
            record.keys.insert(key.to_owned(), child);
        });
        self.record(Op::AddKeyed {
            parent,
            child,
            key: key.to_owned(),
        });
    }

    fn add_button(&self, dialog: RawWidget, label: &str, response: Response) {
        self.record(Op::AddButton {
            dialog,
            label: label.to_owned(),
            response,
        });
    }

    fn load_image(&self, source: &str) -> Result<TextureId, ToolkitError> {
        self.record(Op::LoadImage {
            source: source.to_owned(),
        });
        if self.inner.failing_images.borrow().contains(source) {
            return Err(ToolkitError::new(
                "load-image",
                format!("cannot load `{source}`"),
            ));
        }
        let id = self.inner.next_texture.get() + 1;
        self.inner.next_texture.set(id);
        Ok(TextureId(id))
    }

    fn present(&self, window: RawWidget) {
        self.record(Op::Present { window });
    }

    fn run_modal(&self, dialog: RawWidget) -> Response {
        self.record(Op::RunModal { dialog });
        self.inner
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Response::Close)
    }

    fn run(&self) {
        self.record(Op::Run);
    }

    fn quit(&self) {
        self.record(Op::Quit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_order_tracks_inserts_and_removes() {
        let toolkit = Headless::new();
        let parent = toolkit.create("flex");
        let a = toolkit.create("label");
        let b = toolkit.create("label");
        let c = toolkit.create("label");

        toolkit.append(parent, a);
        toolkit.append(parent, c);
        toolkit.insert_after(parent, b, Some(a));
        assert_eq!(toolkit.children_of(parent), vec![a, b, c]);

        toolkit.remove_child(parent, b);
        assert_eq!(toolkit.children_of(parent), vec![a, c]);
    }

    #[test]
    fn test_emit_dispatches_to_matching_handler_only() {
        let toolkit = Headless::new();
        let button = toolkit.create("button");
        let other = toolkit.create("button");

        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        toolkit.connect(button, "clicked", Box::new(move |_| {
            h.set(h.get() + 1);
            Value::Unit
        }));

        toolkit.emit(other, "clicked", &Value::Unit);
        toolkit.emit(button, "hover", &Value::Unit);
        assert_eq!(hits.get(), 0);

        toolkit.emit(button, "clicked", &Value::Unit);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_disconnect_silences_handler() {
        let toolkit = Headless::new();
        let button = toolkit.create("button");
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = toolkit.connect(button, "clicked", Box::new(move |_| {
            h.set(h.get() + 1);
            Value::Unit
        }));

        toolkit.disconnect(button, id);
        toolkit.emit(button, "clicked", &Value::Unit);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_modal_pops_queued_responses() {
        let toolkit = Headless::new();
        let dialog = toolkit.create("dialog");
        toolkit.queue_response(Response::Accept);
        assert_eq!(toolkit.run_modal(dialog), Response::Accept);
        assert_eq!(toolkit.run_modal(dialog), Response::Close);
    }

    #[test]
    fn test_failing_image_loads_error() {
        let toolkit = Headless::new();
        toolkit.fail_image("missing.png");
        assert!(toolkit.load_image("missing.png").is_err());
        assert!(toolkit.load_image("ok.png").is_ok());
    }
}
