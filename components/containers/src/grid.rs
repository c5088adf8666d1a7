//! A container placing children in cell regions.

use estuary_core::children::{Child, GridChildren};
use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::layout::Region;
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{AnyWidget, Widget, WidgetState};
use estuary_core::{common_setters, setters};

/// Arranges children on a grid of rows and columns.
///
/// Each child occupies a [`Region`]. Moving a child to another region
/// between passes re-attaches the same native widget; nothing is rebuilt.
///
/// # Usage
///
/// ```ignore
/// grid()
///     .row_spacing(4)
///     .place(label("Name"), Region::at(0, 0))
///     .place(entry(), Region::at(1, 0).span(2, 1))
/// ```
#[derive(Debug, Default)]
pub struct Grid {
    common: Common,
    row_spacing: Option<i32>,
    column_spacing: Option<i32>,
    children: Vec<Child<Region>>,
}

impl Grid {
    /// An empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the gap between rows, in logical pixels.
        row_spacing: i32,
        /// Sets the gap between columns, in logical pixels.
        column_spacing: i32,
    }

    common_setters!();

    /// Places a child in the given region.
    #[must_use]
    pub fn place(mut self, widget: impl Into<AnyWidget>, region: Region) -> Self {
        self.children.push(Child::new(widget, region));
        self
    }

    fn apply(&self, state: &mut GridState) {
        let widget = &state.widget;
        state.common.sync(&self.common, widget);
        state
            .row_spacing
            .sync(self.row_spacing.as_ref(), |v| widget.set("row-spacing", *v));
        state.column_spacing.sync(self.column_spacing.as_ref(), |v| {
            widget.set("column-spacing", *v);
        });
    }
}

/// Creates an empty grid.
#[must_use]
pub fn grid() -> Grid {
    Grid::new()
}

/// Live state for [`Grid`].
#[derive(Debug)]
pub struct GridState {
    common: CommonState,
    row_spacing: Tracked<i32>,
    column_spacing: Tracked<i32>,
    children: GridChildren,
    widget: NativeWidget,
}

impl Widget for Grid {
    const NAME: &'static str = "grid";
    type State = GridState;

    fn build(&self, env: &Environment) -> Result<GridState, Error> {
        let mut state = GridState {
            common: CommonState::default(),
            row_spacing: Tracked::new(),
            column_spacing: Tracked::new(),
            children: GridChildren::new(),
            widget: env.create(Self::NAME),
        };
        self.apply(&mut state);
        state.children.reconcile(&self.children, &state.widget, env)?;
        Ok(state)
    }

    fn update(&self, state: &mut GridState, env: &Environment) -> Result<(), Error> {
        self.apply(state);
        state.children.reconcile(&self.children, &state.widget, env)
    }
}

impl WidgetState for GridState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }

    fn read(&mut self) {
        self.children.read();
    }
}
