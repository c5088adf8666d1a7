//! An on/off switch.

use estuary_core::common::{Common, CommonState};
use estuary_core::common_setters;
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::event::{Callback, Connection, EventSlot, trampoline};
use estuary_core::property::Live;
use estuary_core::toolkit::{NativeWidget, Value};
use estuary_core::widget::{Widget, WidgetState};

/// A control toggling between on and off.
///
/// # Usage
///
/// ```ignore
/// switch(dark_mode).on_toggle(move |on| set_dark_mode(on))
/// ```
#[derive(Debug, Clone, Default)]
pub struct Switch {
    common: Common,
    active: Option<bool>,
    bind: Option<Live<bool>>,
    on_toggle: Option<Callback<bool>>,
}

impl Switch {
    /// A switch with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    common_setters!();

    /// Sets the switch position programmatically.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Shares the switch's position through the given cell.
    ///
    /// The cell is attached when the widget is first built.
    #[must_use]
    pub fn bind(mut self, cell: &Live<bool>) -> Self {
        self.bind = Some(cell.clone());
        self
    }

    /// Sets the handler run when the user flips the switch.
    #[must_use]
    pub fn on_toggle(mut self, handler: impl Fn(bool) + 'static) -> Self {
        self.on_toggle = Some(Callback::new(move |active: &bool| handler(*active)));
        self
    }

    fn apply(&self, state: &mut SwitchState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .active
            .sync(self.active.as_ref(), |v| widget.set("active", *v));
        state.slot.rebind(self.on_toggle.clone());
    }
}

/// Creates a switch in the given position.
#[must_use]
pub fn switch(active: bool) -> Switch {
    Switch::new().active(active)
}

/// Live state for [`Switch`].
#[derive(Debug)]
pub struct SwitchState {
    common: CommonState,
    active: Live<bool>,
    slot: EventSlot<bool>,
    connections: Vec<Connection>,
    widget: NativeWidget,
}

impl Widget for Switch {
    const NAME: &'static str = "switch";
    type State = SwitchState;

    fn build(&self, env: &Environment) -> Result<SwitchState, Error> {
        let widget = env.create(Self::NAME);
        let active = self.bind.clone().unwrap_or_default();
        let slot = EventSlot::new();
        let translate = {
            let cell = active.clone();
            let widget = widget.clone();
            move |_: &Value| cell.pull(&widget, "active")
        };
        let connections = vec![widget.connect(
            "toggled",
            trampoline(env.handle(), &slot, translate),
        )];
        let mut state = SwitchState {
            common: CommonState::default(),
            active,
            slot,
            connections,
            widget,
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn update(&self, state: &mut SwitchState, _env: &Environment) -> Result<(), Error> {
        self.apply(state);
        Ok(())
    }
}

impl WidgetState for SwitchState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.active.pull(&self.widget, "active");
    }
}
