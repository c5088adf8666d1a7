//! Top-level application windows.

use estuary_core::children::Slot;
use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::{Error, StructureError};
use estuary_core::event::{Callback, Connection, EventSlot, trampoline};
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{AnyWidget, Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// A top-level window holding one child.
///
/// # Usage
///
/// ```ignore
/// window("Counter", body)
///     .default_size(300, 200)
///     .on_close(move || {
///         info!("close requested");
///         unsaved_changes()
///     })
/// ```
#[derive(Debug, Default)]
pub struct Window {
    common: Common,
    title: Option<String>,
    default_size: Option<(i32, i32)>,
    child: Option<AnyWidget>,
    on_close: Option<Callback<(), bool>>,
}

impl Window {
    /// A window with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the title bar text.
        title: String,
    }

    common_setters!();

    /// Sets the size the window opens at, in logical pixels.
    #[must_use]
    pub fn default_size(mut self, width: i32, height: i32) -> Self {
        self.default_size = Some((width, height));
        self
    }

    /// Sets the handler run when the user asks to close the window.
    ///
    /// Return `true` to veto the close and keep the window open.
    #[must_use]
    pub fn on_close(mut self, handler: impl Fn() -> bool + 'static) -> Self {
        self.on_close = Some(Callback::new(move |(): &()| handler()));
        self
    }

    /// Puts a child into the window.
    ///
    /// # Errors
    ///
    /// Returns a [`StructureError`] when the window already has a child;
    /// the existing child stays.
    pub fn add(&mut self, child: impl Into<AnyWidget>) -> Result<(), StructureError> {
        if self.child.is_some() {
            return Err(StructureError::new(<Self as Widget>::NAME));
        }
        self.child = Some(child.into());
        Ok(())
    }

    fn apply(&self, state: &mut WindowState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .title
            .sync(self.title.as_ref(), |v| widget.set("title", v.as_str()));
        state.default_size.sync(self.default_size.as_ref(), |v| {
            widget.set("default-width", v.0);
            widget.set("default-height", v.1);
        });
        state.close_slot.rebind(self.on_close.clone());
    }
}

/// Creates a window with the given title and child.
#[must_use]
pub fn window(title: impl Into<String>, child: impl Into<AnyWidget>) -> Window {
    Window {
        title: Some(title.into()),
        child: Some(child.into()),
        ..Window::default()
    }
}

/// Live state for [`Window`].
#[derive(Debug)]
pub struct WindowState {
    common: CommonState,
    title: Tracked<String>,
    default_size: Tracked<(i32, i32)>,
    close_slot: EventSlot<(), bool>,
    connections: Vec<Connection>,
    child: Slot,
    widget: NativeWidget,
}

impl Widget for Window {
    const NAME: &'static str = "window";
    type State = WindowState;

    fn build(&self, env: &Environment) -> Result<WindowState, Error> {
        let widget = env.create(Self::NAME);
        let close_slot = EventSlot::new();
        let connections = vec![widget.connect(
            "close-request",
            trampoline(env.handle(), &close_slot, |_| Some(())),
        )];
        let mut state = WindowState {
            common: CommonState::default(),
            title: Tracked::new(),
            default_size: Tracked::new(),
            close_slot,
            connections,
            child: Slot::new(),
            widget,
        };
        self.apply(&mut state);
        state.child.reconcile(self.child.as_ref(), &state.widget, env)?;
        Ok(state)
    }

    fn update(&self, state: &mut WindowState, env: &Environment) -> Result<(), Error> {
        self.apply(state);
        state.child.reconcile(self.child.as_ref(), &state.widget, env)
    }
}

impl WidgetState for WindowState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.child.read();
    }
}
