//! Single-line text input.

use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::event::{Callback, Connection, EventSlot, trampoline};
use estuary_core::property::{Live, Tracked};
use estuary_core::toolkit::{NativeWidget, Value};
use estuary_core::widget::{Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// A one-line text field.
///
/// The text property is a read-back: the user edits it natively, and the
/// current content is pulled back into the framework before `on_change` or
/// `on_activate` runs. Bind a [`Live`] cell to keep the content available
/// after the widget is gone, as when a dialog closes.
///
/// # Usage
///
/// ```ignore
/// let name = Live::new();
///
/// entry()
///     .placeholder("Full name")
///     .bind(&name)
///     .on_activate(|text| info!("submitted {text}"))
/// ```
#[derive(Debug, Clone, Default)]
pub struct Entry {
    common: Common,
    text: Option<String>,
    placeholder: Option<String>,
    bind: Option<Live<String>>,
    on_change: Option<Callback<String>>,
    on_activate: Option<Callback<String>>,
}

impl Entry {
    /// An entry with no properties set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the content programmatically.
        text: String,
        /// Sets the hint shown while the entry is empty.
        placeholder: String,
    }

    common_setters!();

    /// Shares the entry's content through the given cell.
    ///
    /// The cell is attached when the widget is first built; the trampoline
    /// and [`read`](WidgetState::read) keep it current from then on.
    #[must_use]
    pub fn bind(mut self, cell: &Live<String>) -> Self {
        self.bind = Some(cell.clone());
        self
    }

    /// Sets the handler run on every edit, with the current content.
    #[must_use]
    pub fn on_change(mut self, handler: impl Fn(&str) + 'static) -> Self {
        self.on_change = Some(Callback::new(move |text: &String| handler(text)));
        self
    }

    /// Sets the handler run when the user presses enter.
    #[must_use]
    pub fn on_activate(mut self, handler: impl Fn(&str) + 'static) -> Self {
        self.on_activate = Some(Callback::new(move |text: &String| handler(text)));
        self
    }

    fn apply(&self, state: &mut EntryState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state.placeholder.sync(self.placeholder.as_ref(), |v| {
            widget.set("placeholder", v.as_str());
        });
        state
            .text
            .sync(self.text.as_ref(), |v| widget.set("text", v.as_str()));
        state.change_slot.rebind(self.on_change.clone());
        state.activate_slot.rebind(self.on_activate.clone());
    }
}

/// Creates an empty entry.
#[must_use]
pub fn entry() -> Entry {
    Entry::new()
}

/// Live state for [`Entry`].
#[derive(Debug)]
pub struct EntryState {
    common: CommonState,
    placeholder: Tracked<String>,
    text: Live<String>,
    change_slot: EventSlot<String>,
    activate_slot: EventSlot<String>,
    connections: Vec<Connection>,
    widget: NativeWidget,
}

fn pull_text(
    cell: &Live<String>,
    widget: &NativeWidget,
) -> impl Fn(&Value) -> Option<String> + 'static {
    let cell = cell.clone();
    let widget = widget.clone();
    move |_| cell.pull(&widget, "text")
}

impl Widget for Entry {
    const NAME: &'static str = "entry";
    type State = EntryState;

    fn build(&self, env: &Environment) -> Result<EntryState, Error> {
        let widget = env.create(Self::NAME);
        let text = self.bind.clone().unwrap_or_default();
        let change_slot = EventSlot::new();
        let activate_slot = EventSlot::new();
        let connections = vec![
            widget.connect(
                "changed",
                trampoline(env.handle(), &change_slot, pull_text(&text, &widget)),
            ),
            widget.connect(
                "activate",
                trampoline(env.handle(), &activate_slot, pull_text(&text, &widget)),
            ),
        ];
        let mut state = EntryState {
            common: CommonState::default(),
            placeholder: Tracked::new(),
            text,
            change_slot,
            activate_slot,
            connections,
            widget,
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn update(&self, state: &mut EntryState, _env: &Environment) -> Result<(), Error> {
        self.apply(state);
        Ok(())
    }
}

impl WidgetState for EntryState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.text.pull(&self.widget, "text");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use estuary_core::app::AppHandle;
    use estuary_core::widget::AnyWidget;
    use estuary_headless::Headless;
    use std::rc::Rc;

    fn test_env(toolkit: &Headless) -> Environment {
        Environment::new(Rc::new(toolkit.clone()), AppHandle::detached())
    }

    #[test]
    fn test_edit_pulls_content_before_callback() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let _state = AnyWidget::from(
            entry().on_change(move |text| log.borrow_mut().push(text.to_owned())),
        )
        .build(&env)
        .unwrap();

        let widget = toolkit.find("entry").unwrap();
        toolkit.set_value(widget, "text", Value::Text("ab".into()));
        toolkit.emit(widget, "changed", &Value::Unit);
        assert_eq!(*seen.borrow(), vec!["ab".to_owned()]);
    }

    #[test]
    fn test_bound_cell_suppresses_echo_push() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let cell = Live::new();
        let mut state = AnyWidget::from(entry().bind(&cell)).build(&env).unwrap();

        let widget = toolkit.find("entry").unwrap();
        toolkit.set_value(widget, "text", Value::Text("typed".into()));
        toolkit.emit(widget, "changed", &Value::Unit);
        assert_eq!(cell.get(), Some("typed".to_owned()));
        toolkit.take_ops();

        // Describing the text the user already typed pushes nothing.
        AnyWidget::from(entry().bind(&cell).text("typed"))
            .reconcile(Some(&mut state), &env)
            .unwrap();
        assert!(toolkit.take_ops().is_empty());
    }

    #[test]
    fn test_activate_delivers_current_content() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let submitted = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&submitted);
        let _state = AnyWidget::from(
            entry().on_activate(move |text| *sink.borrow_mut() = text.to_owned()),
        )
        .build(&env)
        .unwrap();

        let widget = toolkit.find("entry").unwrap();
        toolkit.set_value(widget, "text", Value::Text("done".into()));
        toolkit.emit(widget, "activate", &Value::Unit);
        assert_eq!(*submitted.borrow(), "done");
    }

    #[test]
    fn test_described_text_is_pushed() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let _state = AnyWidget::from(entry().text("seed").placeholder("hint"))
            .build(&env)
            .unwrap();

        let widget = toolkit.find("entry").unwrap();
        assert_eq!(
            toolkit.value(widget, "text"),
            Some(Value::Text("seed".into()))
        );
        assert_eq!(
            toolkit.value(widget, "placeholder"),
            Some(Value::Text("hint".into()))
        );
    }
}
