//! A bar showing how far a long-running task has come.

use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// Displays task completion as a filled fraction of a bar.
///
/// # Usage
///
/// ```ignore
/// progress_bar(bytes_done as f64 / total as f64)
///     .text(format!("{bytes_done} of {total} bytes"))
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressBar {
    common: Common,
    fraction: Option<f64>,
    text: Option<String>,
}

impl ProgressBar {
    /// An empty progress bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the filled fraction, from `0.0` to `1.0`.
        fraction: f64,
        /// Sets the text shown on the bar.
        text: String,
    }

    common_setters!();

    fn apply(&self, state: &mut ProgressBarState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .fraction
            .sync(self.fraction.as_ref(), |v| widget.set("fraction", *v));
        state
            .text
            .sync(self.text.as_ref(), |v| widget.set("text", v.as_str()));
    }
}

/// Creates a progress bar filled to the given fraction.
#[must_use]
pub fn progress_bar(fraction: f64) -> ProgressBar {
    ProgressBar::new().fraction(fraction)
}

/// Live state for [`ProgressBar`].
#[derive(Debug)]
pub struct ProgressBarState {
    common: CommonState,
    fraction: Tracked<f64>,
    text: Tracked<String>,
    widget: NativeWidget,
}

impl Widget for ProgressBar {
    const NAME: &'static str = "progress";
    type State = ProgressBarState;

    fn build(&self, env: &Environment) -> Result<ProgressBarState, Error> {
        let mut state = ProgressBarState {
            common: CommonState::default(),
            fraction: Tracked::new(),
            text: Tracked::new(),
            widget: env.create(Self::NAME),
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn update(&self, state: &mut ProgressBarState, _env: &Environment) -> Result<(), Error> {
        self.apply(state);
        Ok(())
    }
}

impl WidgetState for ProgressBarState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }
}
