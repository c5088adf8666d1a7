//! A decorated single-child container.

use estuary_core::children::Slot;
use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::{Error, StructureError};
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{AnyWidget, Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// Draws a border and an optional caption around one child.
///
/// A frame holds at most one child. Adding a second is refused while the
/// description is being put together, before any native call; the child
/// already in place stays.
///
/// # Usage
///
/// ```ignore
/// frame(vflex().child(label("Connected")))
///     .label("Status")
/// ```
#[derive(Debug, Default)]
pub struct Frame {
    common: Common,
    label: Option<String>,
    child: Option<AnyWidget>,
}

impl Frame {
    /// An empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the caption drawn on the border.
        label: String,
    }

    common_setters!();

    /// Puts a child into the frame.
    ///
    /// # Errors
    ///
    /// Returns a [`StructureError`] when the frame already has a child;
    /// the existing child stays.
    pub fn add(&mut self, child: impl Into<AnyWidget>) -> Result<(), StructureError> {
        if self.child.is_some() {
            return Err(StructureError::new(<Self as Widget>::NAME));
        }
        self.child = Some(child.into());
        Ok(())
    }

    fn apply(&self, state: &mut FrameState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .label
            .sync(self.label.as_ref(), |v| widget.set("label", v.as_str()));
    }
}

/// Creates a frame around the given child.
#[must_use]
pub fn frame(child: impl Into<AnyWidget>) -> Frame {
    Frame {
        child: Some(child.into()),
        ..Frame::default()
    }
}

/// Live state for [`Frame`].
#[derive(Debug)]
pub struct FrameState {
    common: CommonState,
    label: Tracked<String>,
    child: Slot,
    widget: NativeWidget,
}

impl Widget for Frame {
    const NAME: &'static str = "frame";
    type State = FrameState;

    fn build(&self, env: &Environment) -> Result<FrameState, Error> {
        let mut state = FrameState {
            common: CommonState::default(),
            label: Tracked::new(),
            child: Slot::new(),
            widget: env.create(Self::NAME),
        };
        self.apply(&mut state);
        state.child.reconcile(self.child.as_ref(), &state.widget, env)?;
        Ok(state)
    }

    fn update(&self, state: &mut FrameState, env: &Environment) -> Result<(), Error> {
        self.apply(state);
        state.child.reconcile(self.child.as_ref(), &state.widget, env)
    }
}

impl WidgetState for FrameState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.child.read();
    }
}
