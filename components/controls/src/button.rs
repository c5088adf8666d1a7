//! A clickable push button.

use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::event::{Callback, Connection, EventSlot, trampoline};
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// A button running a callback when clicked.
///
/// # Usage
///
/// ```ignore
/// button("Count").on_click(move || count.set(count.get() + 1))
///
/// button("Delete")
///     .sensitive(selection_exists)
///     .on_click(delete_selected)
/// ```
#[derive(Debug, Clone, Default)]
pub struct Button {
    common: Common,
    label: Option<String>,
    on_click: Option<Callback<()>>,
}

impl Button {
    /// A button with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the button label.
        label: String,
    }

    common_setters!();

    /// Sets the handler run when the button is clicked.
    #[must_use]
    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Callback::new(move |(): &()| handler()));
        self
    }

    fn apply(&self, state: &mut ButtonState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .label
            .sync(self.label.as_ref(), |v| widget.set("label", v.as_str()));
        state.slot.rebind(self.on_click.clone());
    }
}

/// Creates a button with the given label.
#[must_use]
pub fn button(label: impl Into<String>) -> Button {
    Button::new().label(label)
}

/// Live state for [`Button`].
///
/// Connections are listed before the widget handle, so dropping the state
/// disconnects the click trampoline before the handle is released.
#[derive(Debug)]
pub struct ButtonState {
    common: CommonState,
    label: Tracked<String>,
    slot: EventSlot<()>,
    connections: Vec<Connection>,
    widget: NativeWidget,
}

impl Widget for Button {
    const NAME: &'static str = "button";
    type State = ButtonState;

    fn build(&self, env: &Environment) -> Result<ButtonState, Error> {
        let widget = env.create(Self::NAME);
        let slot = EventSlot::new();
        let connections = vec![widget.connect(
            "clicked",
            trampoline(env.handle(), &slot, |_| Some(())),
        )];
        let mut state = ButtonState {
            common: CommonState::default(),
            label: Tracked::new(),
            slot,
            connections,
            widget,
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn update(&self, state: &mut ButtonState, _env: &Environment) -> Result<(), Error> {
        self.apply(state);
        Ok(())
    }
}

impl WidgetState for ButtonState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }
}
