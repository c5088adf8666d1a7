//! Event wiring between native signals and application callbacks.
//!
//! A widget connects at most one trampoline per signal, once, when its
//! state is built. The trampoline looks the current handler up through a
//! shared [`EventSlot`], so updating a description swaps the handler
//! without any native traffic. Rebuilding a state node drops its
//! [`Connection`]s, which disconnect before the widget handle is released.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::app::AppHandle;
use crate::toolkit::{ConnectionId, NativeWidget, SignalHandler, Value};

/// Shared, cheaply clonable callback invoked with a translated event.
///
/// `E` is the event payload; `R` lets a handler answer the toolkit, as a
/// window close-request handler answers whether the close is vetoed.
pub struct Callback<E, R = ()> {
    f: Rc<dyn Fn(&E) -> R>,
}

impl<E, R> Callback<E, R> {
    /// Wraps a handler function.
    pub fn new(f: impl Fn(&E) -> R + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    /// Invokes the handler.
    pub fn invoke(&self, event: &E) -> R {
        (self.f)(event)
    }
}

impl<E, R> Clone for Callback<E, R> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
        }
    }
}

impl<E, R> fmt::Debug for Callback<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Rebindable handler slot shared between a state node and its trampoline.
///
/// The trampoline captures a clone at connect time; every later update
/// pass rebinds the slot to the freshly described handler. An empty slot
/// makes the trampoline a no-op apart from read-back and redraw.
pub struct EventSlot<E, R = ()> {
    current: Rc<RefCell<Option<Callback<E, R>>>>,
}

impl<E, R> EventSlot<E, R> {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Rc::new(RefCell::new(None)),
        }
    }

    /// Swaps the handler the trampoline will see. No native traffic.
    pub fn rebind(&self, callback: Option<Callback<E, R>>) {
        *self.current.borrow_mut() = callback;
    }

    /// Invokes the current handler, if any.
    pub fn emit(&self, event: &E) -> Option<R> {
        let callback = self.current.borrow().clone();
        callback.map(|cb| cb.invoke(event))
    }
}

impl<E, R> Clone for EventSlot<E, R> {
    fn clone(&self) -> Self {
        Self {
            current: Rc::clone(&self.current),
        }
    }
}

impl<E, R> Default for EventSlot<E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, R> fmt::Debug for EventSlot<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = self.current.borrow().is_some();
        f.debug_struct("EventSlot").field("bound", &bound).finish()
    }
}

/// A live signal attachment owning its disconnect.
///
/// Holds a handle on the connected widget, so the disconnect in `Drop`
/// always runs against a live widget. State nodes list their connections
/// before their widget handle; dropping the node therefore disconnects
/// every signal before the handle is released.
#[derive(Debug)]
pub struct Connection {
    widget: NativeWidget,
    id: ConnectionId,
}

impl Connection {
    pub(crate) fn new(widget: NativeWidget, id: ConnectionId) -> Self {
        Self { widget, id }
    }

    /// The id issued by the toolkit for this connection.
    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.widget.toolkit().disconnect(self.widget.raw(), self.id);
    }
}

/// Builds the handler closure attached to one native signal.
///
/// The trampoline runs in a fixed order: translate the payload (pulling
/// read-back values as a side effect), invoke the current slot handler,
/// then request one application redraw. However many redraws the handler
/// itself requested, at most one render pass runs per signal.
pub fn trampoline<E, R>(
    handle: &AppHandle,
    slot: &EventSlot<E, R>,
    translate: impl Fn(&Value) -> Option<E> + 'static,
) -> SignalHandler
where
    E: 'static,
    R: Into<Value> + 'static,
{
    let handle = handle.clone();
    let slot = slot.clone();
    Box::new(move |payload| {
        let Some(event) = translate(payload) else {
            tracing::warn!(?payload, "signal payload did not translate; ignoring");
            return Value::Unit;
        };
        let answer = slot.emit(&event);
        if let Err(error) = handle.redraw() {
            tracing::warn!(%error, "redraw after event failed");
        }
        answer.map_or(Value::Unit, Into::into)
    })
}
