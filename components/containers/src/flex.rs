//! An ordered container stacking children along one axis.

use estuary_core::children::{Child, OrderedChildren};
use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::layout::{ChildLayout, Orientation};
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{AnyWidget, Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// Lays out children in a row or a column.
///
/// Children are matched to their previous pass by position. Each child
/// carries a [`ChildLayout`] telling the toolkit whether it expands along
/// the main axis and how it aligns in the space it is granted.
///
/// # Usage
///
/// ```ignore
/// vflex()
///     .spacing(6)
///     .child(label("Volume"))
///     .child_with(slider(0.0..=100.0), ChildLayout::new().expand())
/// ```
#[derive(Debug, Default)]
pub struct Flex {
    common: Common,
    orientation: Orientation,
    spacing: Option<i32>,
    children: Vec<Child<ChildLayout>>,
}

impl Flex {
    /// A flex container along the given axis.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    setters! {
        /// Sets the gap between adjacent children, in logical pixels.
        spacing: i32,
    }

    common_setters!();

    /// Appends a child with default layout.
    #[must_use]
    pub fn child(self, widget: impl Into<AnyWidget>) -> Self {
        self.child_with(widget, ChildLayout::new())
    }

    /// Appends a child with the given layout.
    #[must_use]
    pub fn child_with(mut self, widget: impl Into<AnyWidget>, layout: ChildLayout) -> Self {
        self.children.push(Child::new(widget, layout));
        self
    }

    fn apply(&self, state: &mut FlexState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .orientation
            .sync(Some(&self.orientation), |v| widget.set("orientation", *v));
        state
            .spacing
            .sync(self.spacing.as_ref(), |v| widget.set("spacing", *v));
    }
}

/// Creates a flex container flowing left to right.
#[must_use]
pub fn hflex() -> Flex {
    Flex::new(Orientation::Horizontal)
}

/// Creates a flex container flowing top to bottom.
#[must_use]
pub fn vflex() -> Flex {
    Flex::new(Orientation::Vertical)
}

/// Live state for [`Flex`].
#[derive(Debug)]
pub struct FlexState {
    common: CommonState,
    orientation: Tracked<Orientation>,
    spacing: Tracked<i32>,
    children: OrderedChildren<ChildLayout>,
    widget: NativeWidget,
}

impl Widget for Flex {
    const NAME: &'static str = "flex";
    type State = FlexState;

    fn build(&self, env: &Environment) -> Result<FlexState, Error> {
        let mut state = FlexState {
            common: CommonState::default(),
            orientation: Tracked::new(),
            spacing: Tracked::new(),
            children: OrderedChildren::new(),
            widget: env.create(Self::NAME),
        };
        self.apply(&mut state);
        state
            .children
            .reconcile(&self.children, &state.widget, env, apply_layout)?;
        Ok(state)
    }

    fn update(&self, state: &mut FlexState, env: &Environment) -> Result<(), Error> {
        self.apply(state);
        state
            .children
            .reconcile(&self.children, &state.widget, env, apply_layout)
    }
}

fn apply_layout(widget: &NativeWidget, layout: &ChildLayout) {
    layout.apply(widget);
}

impl WidgetState for FlexState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.children.read();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estuary_core::app::AppHandle;
    use estuary_core::toolkit::Value;
    use estuary_display::label;
    use estuary_headless::{Headless, Op};
    use std::rc::Rc;

    fn test_env(toolkit: &Headless) -> Environment {
        Environment::new(Rc::new(toolkit.clone()), AppHandle::detached())
    }

    #[test]
    fn test_removing_middle_child_detaches_once() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let three = vflex()
            .child(label("a"))
            .child(label("b"))
            .child(label("c"));
        let mut state = AnyWidget::from(three).build(&env).unwrap();
        toolkit.take_ops();

        let two = vflex().child(label("a")).child(label("c"));
        AnyWidget::from(two).reconcile(Some(&mut state), &env).unwrap();

        let ops = toolkit.take_ops();
        let removes = ops
            .iter()
            .filter(|op| matches!(op, Op::RemoveChild { .. }))
            .count();
        let creates = ops
            .iter()
            .filter(|op| matches!(op, Op::Create { .. }))
            .count();
        assert_eq!(removes, 1, "{ops:?}");
        assert_eq!(creates, 0, "{ops:?}");

        let flex = toolkit.find("flex").unwrap();
        assert_eq!(toolkit.children_of(flex).len(), 2);
    }

    #[test]
    fn test_orientation_and_spacing_are_pushed() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let _state = AnyWidget::from(hflex().spacing(12)).build(&env).unwrap();

        let flex = toolkit.find("flex").unwrap();
        assert_eq!(
            toolkit.value(flex, "orientation"),
            Some(Value::Text("horizontal".into()))
        );
        assert_eq!(toolkit.value(flex, "spacing"), Some(Value::Int(12)));
    }

    #[test]
    fn test_child_layout_lands_on_child() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let desc = vflex().child_with(label("a"), ChildLayout::new().expand());
        let _state = AnyWidget::from(desc).build(&env).unwrap();

        let child = toolkit.find("label").unwrap();
        assert_eq!(toolkit.value(child, "expand"), Some(Value::Bool(true)));
    }
}
