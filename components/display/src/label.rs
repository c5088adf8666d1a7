//! A run of read-only text.

use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// Displays a piece of static text.
///
/// # Usage
///
/// ```ignore
/// label("Ready.")
///
/// label(format!("{count} items selected"))
///     .wrap(true)
///     .tooltip("Selection summary")
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    common: Common,
    text: Option<String>,
    wrap: Option<bool>,
}

impl Label {
    /// A label with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the displayed text.
        text: String,
        /// Enables or disables line wrapping.
        wrap: bool,
    }

    common_setters!();

    fn apply(&self, state: &mut LabelState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .text
            .sync(self.text.as_ref(), |v| widget.set("text", v.as_str()));
        state.wrap.sync(self.wrap.as_ref(), |v| widget.set("wrap", *v));
    }
}

/// Creates a label showing the given text.
#[must_use]
pub fn label(text: impl Into<String>) -> Label {
    Label::new().text(text)
}

/// Live state for [`Label`].
#[derive(Debug)]
pub struct LabelState {
    common: CommonState,
    text: Tracked<String>,
    wrap: Tracked<bool>,
    widget: NativeWidget,
}

impl Widget for Label {
    const NAME: &'static str = "label";
    type State = LabelState;

    fn build(&self, env: &Environment) -> Result<LabelState, Error> {
        let mut state = LabelState {
            common: CommonState::default(),
            text: Tracked::new(),
            wrap: Tracked::new(),
            widget: env.create(Self::NAME),
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn update(&self, state: &mut LabelState, _env: &Environment) -> Result<(), Error> {
        self.apply(state);
        Ok(())
    }
}

impl WidgetState for LabelState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }
}
