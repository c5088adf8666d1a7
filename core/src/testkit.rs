//! In-crate test doubles: a recording toolkit and two probe widget kinds.

use core::cell::{Cell, RefCell};
use core::num::NonZeroU64;
use std::collections::HashMap;
use std::rc::Rc;

use crate::app::AppHandle;
use crate::environment::Environment;
use crate::error::{Error, ToolkitError};
use crate::layout::Region;
use crate::property::Tracked;
use crate::toolkit::{
    Capabilities, ConnectionId, NativeWidget, RawWidget, Response, SignalHandler, TextureId,
    Toolkit, Value,
};
use crate::widget::{Widget, WidgetState};

/// One recorded toolkit call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MockOp {
    Create {
        widget: RawWidget,
        class: String,
    },
    Release {
        widget: RawWidget,
    },
    SetProperty {
        widget: RawWidget,
        name: String,
        value: Value,
    },
    Connect {
        widget: RawWidget,
        signal: String,
        id: ConnectionId,
    },
    Disconnect {
        widget: RawWidget,
        id: ConnectionId,
    },
    SetChild {
        parent: RawWidget,
        child: Option<RawWidget>,
    },
    Append {
        parent: RawWidget,
        child: RawWidget,
    },
    InsertAfter {
        parent: RawWidget,
        child: RawWidget,
        sibling: Option<RawWidget>,
    },
    RemoveChild {
        parent: RawWidget,
        child: RawWidget,
    },
    AttachGrid {
        parent: RawWidget,
        child: RawWidget,
        region: Region,
    },
    AddKeyed {
        parent: RawWidget,
        child: RawWidget,
        key: String,
    },
    AddButton {
        dialog: RawWidget,
        label: String,
        response: Response,
    },
    LoadImage {
        source: String,
    },
    Present {
        window: RawWidget,
    },
    RunModal {
        dialog: RawWidget,
    },
    Run,
    Quit,
}

impl MockOp {
    /// Whether this call mutates or targets the given widget.
    ///
    /// Anchor references (the `sibling` of an insert) do not count.
    pub(crate) fn touches(&self, raw: RawWidget) -> bool {
        match self {
            Self::Create { widget, .. }
            | Self::Release { widget }
            | Self::SetProperty { widget, .. }
            | Self::Connect { widget, .. }
            | Self::Disconnect { widget, .. } => *widget == raw,
            Self::SetChild { child, .. } => *child == Some(raw),
            Self::Append { child, .. }
            | Self::InsertAfter { child, .. }
            | Self::RemoveChild { child, .. }
            | Self::AttachGrid { child, .. }
            | Self::AddKeyed { child, .. } => *child == raw,
            Self::AddButton { dialog, .. } | Self::RunModal { dialog } => *dialog == raw,
            Self::Present { window } => *window == raw,
            Self::LoadImage { .. } | Self::Run | Self::Quit => false,
        }
    }
}

#[derive(Default)]
struct Inner {
    next_widget: Cell<u64>,
    next_connection: Cell<u64>,
    ops: RefCell<Vec<MockOp>>,
    created: RefCell<Vec<(RawWidget, String)>>,
    properties: RefCell<HashMap<(RawWidget, String), Value>>,
}

/// Recording toolkit double. Clones share the same log.
#[derive(Clone, Default)]
pub(crate) struct MockToolkit {
    inner: Rc<Inner>,
}

impl MockToolkit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drains and returns the recorded calls.
    pub(crate) fn take_ops(&self) -> Vec<MockOp> {
        self.inner.ops.borrow_mut().drain(..).collect()
    }

    /// All widgets created with the given class, in creation order.
    pub(crate) fn created(&self, class: &str) -> Vec<RawWidget> {
        self.inner
            .created
            .borrow()
            .iter()
            .filter(|(_, c)| c == class)
            .map(|(raw, _)| *raw)
            .collect()
    }

    /// Writes a property without recording, as a user edit would.
    pub(crate) fn set_value(&self, widget: RawWidget, name: &str, value: Value) {
        self.inner
            .properties
            .borrow_mut()
            .insert((widget, name.to_owned()), value);
    }

    fn record(&self, op: MockOp) {
        self.inner.ops.borrow_mut().push(op);
    }
}

impl Toolkit for MockToolkit {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(4, 10)
    }

    fn create(&self, class: &str) -> RawWidget {
        let id = self.inner.next_widget.get() + 1;
        self.inner.next_widget.set(id);
        let raw = RawWidget::new(NonZeroU64::MIN.saturating_add(id - 1));
        self.inner.created.borrow_mut().push((raw, class.to_owned()));
        self.record(MockOp::Create {
            widget: raw,
            class: class.to_owned(),
        });
        raw
    }

    fn release(&self, widget: RawWidget) {
        self.record(MockOp::Release { widget });
    }

    fn set_property(&self, widget: RawWidget, name: &str, value: Value) {
        self.inner
            .properties
            .borrow_mut()
            .insert((widget, name.to_owned()), value.clone());
        self.record(MockOp::SetProperty {
            widget,
            name: name.to_owned(),
            value,
        });
    }

    fn property(&self, widget: RawWidget, name: &str) -> Value {
        self.inner
            .properties
            .borrow()
            .get(&(widget, name.to_owned()))
            .cloned()
            .unwrap_or_default()
    }

    fn connect(&self, widget: RawWidget, signal: &str, _handler: SignalHandler) -> ConnectionId {
        let id = ConnectionId(self.inner.next_connection.get());
        self.inner.next_connection.set(id.0 + 1);
        self.record(MockOp::Connect {
            widget,
            signal: signal.to_owned(),
            id,
        });
        id
    }

    fn disconnect(&self, widget: RawWidget, id: ConnectionId) {
        self.record(MockOp::Disconnect { widget, id });
    }

    fn set_child(&self, parent: RawWidget, child: Option<RawWidget>) {
        self.record(MockOp::SetChild { parent, child });
    }

    fn append(&self, parent: RawWidget, child: RawWidget) {
        self.record(MockOp::Append { parent, child });
    }

    fn insert_after(&self, parent: RawWidget, child: RawWidget, sibling: Option<RawWidget>) {
        self.record(MockOp::InsertAfter {
            parent,
            child,
            sibling,
        });
    }

    fn remove_child(&self, parent: RawWidget, child: RawWidget) {
        self.record(MockOp::RemoveChild { parent, child });
    }

    fn attach_grid(&self, parent: RawWidget, child: RawWidget, region: Region) {
        self.record(MockOp::AttachGrid {
            parent,
            child,
            region,
        });
    }

    fn add_keyed(&self, parent: RawWidget, child: RawWidget, key: &str) {
        self.record(MockOp::AddKeyed {
            parent,
            child,
            key: key.to_owned(),
        });
    }

    fn add_button(&self, dialog: RawWidget, label: &str, response: Response) {
        self.record(MockOp::AddButton {
            dialog,
            label: label.to_owned(),
            response,
        });
    }

    fn load_image(&self, source: &str) -> Result<TextureId, ToolkitError> {
        self.record(MockOp::LoadImage {
            source: source.to_owned(),
        });
        Ok(TextureId(1))
    }

    fn present(&self, window: RawWidget) {
        self.record(MockOp::Present { window });
    }

    fn run_modal(&self, dialog: RawWidget) -> Response {
        self.record(MockOp::RunModal { dialog });
        Response::Close
    }

    fn run(&self) {
        self.record(MockOp::Run);
    }

    fn quit(&self) {
        self.record(MockOp::Quit);
    }
}

/// Environment over a mock toolkit with no application attached.
pub(crate) fn test_env(mock: &MockToolkit) -> Environment {
    Environment::new(Rc::new(mock.clone()), AppHandle::detached())
}

/// A minimal property-carrying widget kind.
#[derive(Debug, Default)]
pub(crate) struct Probe {
    tag: Option<String>,
}

/// A probe description with the given tag.
pub(crate) fn probe(tag: &str) -> Probe {
    Probe {
        tag: Some(tag.to_owned()),
    }
}

#[derive(Debug)]
pub(crate) struct ProbeState {
    widget: NativeWidget,
    tag: Tracked<String>,
}

impl Widget for Probe {
    const NAME: &'static str = "probe";
    type State = ProbeState;

    fn build(&self, env: &Environment) -> Result<Self::State, Error> {
        let mut state = ProbeState {
            widget: env.create(Self::NAME),
            tag: Tracked::new(),
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn update(&self, state: &mut Self::State, _env: &Environment) -> Result<(), Error> {
        self.apply(state);
        Ok(())
    }
}

impl Probe {
    fn apply(&self, state: &mut ProbeState) {
        let widget = state.widget.clone();
        state
            .tag
            .sync(self.tag.as_ref(), |tag| widget.set("tag", tag.as_str()));
    }
}

impl WidgetState for ProbeState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }
}

/// A second, property-less kind for mismatch scenarios.
#[derive(Debug, Default)]
pub(crate) struct Block;

/// A block description.
pub(crate) fn block() -> Block {
    Block
}

#[derive(Debug)]
pub(crate) struct BlockState {
    widget: NativeWidget,
}

impl Widget for Block {
    const NAME: &'static str = "block";
    type State = BlockState;

    fn build(&self, env: &Environment) -> Result<Self::State, Error> {
        Ok(BlockState {
            widget: env.create(Self::NAME),
        })
    }

    fn update(&self, _state: &mut Self::State, _env: &Environment) -> Result<(), Error> {
        Ok(())
    }
}

impl WidgetState for BlockState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }
}
