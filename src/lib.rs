#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub use estuary_containers as containers;
pub use estuary_controls as controls;
pub use estuary_display as display;
pub use estuary_window as window;

pub use estuary_core::{
    app, children, common, environment, error, event, layout, property, toolkit, widget,
};

#[doc(inline)]
pub use estuary_core::{
    AnyState, AnyWidget, App, AppHandle, Environment, Error, Result, Widget, WidgetState,
};

/// The types and constructors most applications need.
///
/// # Example
///
/// ```ignore
/// use estuary::prelude::*;
///
/// fn view(clicks: i64) -> Window {
///     window(
///         "Counter",
///         vflex()
///             .spacing(6)
///             .child(label(format!("{clicks} clicks")))
///             .child(button("Count")),
///     )
/// }
/// ```
pub mod prelude {
    pub use estuary_containers::{Deck, Flex, Frame, Grid, deck, frame, grid, hflex, vflex};
    pub use estuary_controls::{Button, Entry, Slider, Switch, button, entry, slider, switch};
    pub use estuary_core::layout::{Align, ChildLayout, Orientation, Region};
    pub use estuary_core::property::Live;
    pub use estuary_core::toolkit::Response;
    pub use estuary_core::{AnyWidget, App, AppHandle, Error, Result, Widget};
    pub use estuary_display::{Image, Label, ProgressBar, image, label, progress_bar};
    pub use estuary_window::{Dialog, Window, dialog, window};
}

pub use tracing as log;
