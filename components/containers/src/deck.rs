//! A keyed stack of pages showing one at a time.

use estuary_core::children::KeyedChildren;
use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{AnyWidget, Widget, WidgetState};
use estuary_core::{common_setters, setters};
use indexmap::IndexMap;
use tracing::debug;

/// Holds pages under string keys and shows one of them.
///
/// Pages survive passes by key: the same key means the same live subtree,
/// wherever it sits in the description. Switching the visible page is a
/// single property write; the hidden pages keep their state.
///
/// # Usage
///
/// ```ignore
/// deck()
///     .page("editor", editor_view())
///     .page("settings", settings_view())
///     .visible(current_tab)
/// ```
#[derive(Debug, Default)]
pub struct Deck {
    common: Common,
    pages: IndexMap<String, AnyWidget>,
    visible: Option<String>,
    transition: Option<String>,
}

impl Deck {
    /// A deck with no pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets which page key is shown.
        visible: String,
        /// Sets the animation used when the visible page changes.
        ///
        /// Toolkits older than 4.8 do not animate page changes; the
        /// property is skipped there.
        transition: String,
    }

    common_setters!();

    /// Adds a page under a key, replacing any page with the same key.
    #[must_use]
    pub fn page(mut self, key: impl Into<String>, widget: impl Into<AnyWidget>) -> Self {
        self.pages.insert(key.into(), widget.into());
        self
    }

    fn apply(&self, state: &mut DeckState, env: &Environment) -> Result<(), Error> {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        let capabilities = env.capabilities();
        state.transition.sync(self.transition.as_ref(), |v| {
            if capabilities.at_least(4, 8) {
                widget.set("transition", v.as_str());
            } else {
                debug!(
                    transition = v.as_str(),
                    "toolkit predates page transitions; property skipped"
                );
            }
        });
        state.pages.reconcile(&self.pages, widget, env)?;
        // The visible key is pushed after the pages exist under it.
        state
            .visible
            .sync(self.visible.as_ref(), |v| widget.set("visible-child", v.as_str()));
        Ok(())
    }
}

/// Creates a deck with no pages.
#[must_use]
pub fn deck() -> Deck {
    Deck::new()
}

/// Live state for [`Deck`].
#[derive(Debug)]
pub struct DeckState {
    common: CommonState,
    transition: Tracked<String>,
    visible: Tracked<String>,
    pages: KeyedChildren,
    widget: NativeWidget,
}

impl Widget for Deck {
    const NAME: &'static str = "deck";
    type State = DeckState;

    fn build(&self, env: &Environment) -> Result<DeckState, Error> {
        let mut state = DeckState {
            common: CommonState::default(),
            transition: Tracked::new(),
            visible: Tracked::new(),
            pages: KeyedChildren::new(),
            widget: env.create(Self::NAME),
        };
        self.apply(&mut state, env)?;
        Ok(state)
    }

    fn update(&self, state: &mut DeckState, env: &Environment) -> Result<(), Error> {
        self.apply(state, env)
    }
}

impl WidgetState for DeckState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.pages.read();
    }
}
