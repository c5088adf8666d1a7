//! Core reconciliation engine for the Estuary framework.
//!
//! Estuary keeps two trees: an immutable tree of widget *descriptions*
//! rebuilt by application code on every render pass, and a long-lived tree
//! of live *state* nodes, each owning one native widget. Reconciling a
//! description against existing state updates the native widget in place
//! when the kinds match and builds a replacement when they do not; the
//! replaced subtree is torn down only after its successor is attached.
//!
//! The native toolkit itself sits behind the [`Toolkit`] trait and is
//! deliberately opaque: this crate decides *what* to call, a backend
//! decides what the calls mean.

mod macros;

pub mod app;
pub mod children;
pub mod common;
pub mod environment;
pub mod error;
pub mod event;
pub mod layout;
pub mod property;
mod reconcile;
pub mod toolkit;
pub mod widget;

#[cfg(test)]
pub(crate) mod testkit;

pub use app::{App, AppHandle};
pub use children::{Child, GridChildren, KeyedChildren, OrderedChildren, Slot};
pub use common::{Common, CommonState};
pub use environment::Environment;
pub use error::{Error, Result, StructureError, ToolkitError};
pub use event::{Callback, Connection, EventSlot, trampoline};
pub use layout::{Align, ChildLayout, Orientation, Region};
pub use property::{Live, Tracked};
pub use toolkit::{
    Capabilities, ConnectionId, FromValue, NativeWidget, RawWidget, Response, SignalHandler,
    TextureId, Toolkit, Value,
};
pub use widget::{AnyState, AnyWidget, Widget, WidgetState};
