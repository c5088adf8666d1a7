//! Modal dialogs with response buttons.

use estuary_core::children::Slot;
use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::{Error, StructureError};
use estuary_core::property::Tracked;
use estuary_core::toolkit::{NativeWidget, Response};
use estuary_core::widget::{AnyWidget, Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// A dialog run on a nested event loop.
///
/// Open one through `App::open`: the dialog is built fresh, presented, and
/// pumped until a button is pressed or it is dismissed. Its response
/// buttons belong to the toolkit's action area and are added when the
/// dialog is built.
///
/// # Usage
///
/// ```ignore
/// let name = Live::new();
/// let response = app.open(
///     dialog("Rename")
///         .button("Cancel", Response::Reject)
///         .button("Rename", Response::Accept)
///         .body(entry().bind(&name)),
/// )?;
/// if response == Response::Accept {
///     rename_to(name.get().unwrap_or_default());
/// }
/// ```
#[derive(Debug, Default)]
pub struct Dialog {
    common: Common,
    title: Option<String>,
    buttons: Vec<(String, Response)>,
    child: Option<AnyWidget>,
}

impl Dialog {
    /// A dialog with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the title bar text.
        title: String,
    }

    common_setters!();

    /// Adds a response button to the action area.
    ///
    /// Buttons are added when the dialog is built; they are part of the
    /// dialog's construction, not of its reconciled properties.
    #[must_use]
    pub fn button(mut self, label: impl Into<String>, response: Response) -> Self {
        self.buttons.push((label.into(), response));
        self
    }

    /// Sets the dialog body, replacing any previous one.
    #[must_use]
    pub fn body(mut self, child: impl Into<AnyWidget>) -> Self {
        self.child = Some(child.into());
        self
    }

    /// Puts a body into the dialog.
    ///
    /// # Errors
    ///
    /// Returns a [`StructureError`] when the dialog already has a body;
    /// the existing body stays.
    pub fn add(&mut self, child: impl Into<AnyWidget>) -> Result<(), StructureError> {
        if self.child.is_some() {
            return Err(StructureError::new(<Self as Widget>::NAME));
        }
        self.child = Some(child.into());
        Ok(())
    }

    fn apply(&self, state: &mut DialogState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .title
            .sync(self.title.as_ref(), |v| widget.set("title", v.as_str()));
    }
}

/// Creates a dialog with the given title.
#[must_use]
pub fn dialog(title: impl Into<String>) -> Dialog {
    Dialog::new().title(title)
}

/// Live state for [`Dialog`].
#[derive(Debug)]
pub struct DialogState {
    common: CommonState,
    title: Tracked<String>,
    child: Slot,
    widget: NativeWidget,
}

impl Widget for Dialog {
    const NAME: &'static str = "dialog";
    type State = DialogState;

    fn build(&self, env: &Environment) -> Result<DialogState, Error> {
        let mut state = DialogState {
            common: CommonState::default(),
            title: Tracked::new(),
            child: Slot::new(),
            widget: env.create(Self::NAME),
        };
        self.apply(&mut state);
        for (label, response) in &self.buttons {
            env.toolkit().add_button(state.widget.raw(), label, *response);
        }
        state.child.reconcile(self.child.as_ref(), &state.widget, env)?;
        Ok(state)
    }

    fn update(&self, state: &mut DialogState, env: &Environment) -> Result<(), Error> {
        self.apply(state);
        state.child.reconcile(self.child.as_ref(), &state.widget, env)
    }
}

impl WidgetState for DialogState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.child.read();
    }
}
