//! Continuous numeric input along a track.

use core::ops::RangeInclusive;

use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::event::{Callback, Connection, EventSlot, trampoline};
use estuary_core::property::{Live, Tracked};
use estuary_core::toolkit::{NativeWidget, Value};
use estuary_core::widget::{Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// A control selecting a value from a continuous range.
///
/// The value is a read-back: dragging the thumb changes it natively, and
/// the current position is pulled back before `on_change` runs.
///
/// # Usage
///
/// ```ignore
/// slider(0.0..=100.0)
///     .value(volume)
///     .step(5.0)
///     .on_change(move |v| set_volume(v))
/// ```
#[derive(Debug, Clone, Default)]
pub struct Slider {
    common: Common,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    value: Option<f64>,
    bind: Option<Live<f64>>,
    on_change: Option<Callback<f64>>,
}

impl Slider {
    /// A slider with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the lower bound of the track.
        min: f64,
        /// Sets the upper bound of the track.
        max: f64,
        /// Sets the increment used by keyboard and scroll input.
        step: f64,
        /// Sets the thumb position programmatically.
        value: f64,
    }

    common_setters!();

    /// Shares the slider's value through the given cell.
    ///
    /// The cell is attached when the widget is first built.
    #[must_use]
    pub fn bind(mut self, cell: &Live<f64>) -> Self {
        self.bind = Some(cell.clone());
        self
    }

    /// Sets the handler run when the user moves the thumb.
    #[must_use]
    pub fn on_change(mut self, handler: impl Fn(f64) + 'static) -> Self {
        self.on_change = Some(Callback::new(move |value: &f64| handler(*value)));
        self
    }

    fn apply(&self, state: &mut SliderState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state.min.sync(self.min.as_ref(), |v| widget.set("min", *v));
        state.max.sync(self.max.as_ref(), |v| widget.set("max", *v));
        state.step.sync(self.step.as_ref(), |v| widget.set("step", *v));
        state
            .value
            .sync(self.value.as_ref(), |v| widget.set("value", *v));
        state.slot.rebind(self.on_change.clone());
    }
}

/// Creates a slider over the given range.
#[must_use]
pub fn slider(range: RangeInclusive<f64>) -> Slider {
    Slider::new().min(*range.start()).max(*range.end())
}

/// Live state for [`Slider`].
#[derive(Debug)]
pub struct SliderState {
    common: CommonState,
    min: Tracked<f64>,
    max: Tracked<f64>,
    step: Tracked<f64>,
    value: Live<f64>,
    slot: EventSlot<f64>,
    connections: Vec<Connection>,
    widget: NativeWidget,
}

impl Widget for Slider {
    const NAME: &'static str = "slider";
    type State = SliderState;

    fn build(&self, env: &Environment) -> Result<SliderState, Error> {
        let widget = env.create(Self::NAME);
        let value = self.bind.clone().unwrap_or_default();
        let slot = EventSlot::new();
        let translate = {
            let cell = value.clone();
            let widget = widget.clone();
            move |_: &Value| cell.pull(&widget, "value")
        };
        let connections = vec![widget.connect(
            "value-changed",
            trampoline(env.handle(), &slot, translate),
        )];
        let mut state = SliderState {
            common: CommonState::default(),
            min: Tracked::new(),
            max: Tracked::new(),
            step: Tracked::new(),
            value,
            slot,
            connections,
            widget,
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn update(&self, state: &mut SliderState, _env: &Environment) -> Result<(), Error> {
        self.apply(state);
        Ok(())
    }
}

impl WidgetState for SliderState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.value.pull(&self.widget, "value");
    }
}
