//! Properties every widget kind understands.

use crate::property::Tracked;
use crate::toolkit::NativeWidget;

/// Universal properties embedded in every description.
///
/// All fields are optional; absence means the toolkit default stays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Common {
    /// Whether the widget reacts to input.
    pub sensitive: Option<bool>,
    /// Hover tooltip text.
    pub tooltip: Option<String>,
    /// Uniform margin around the widget, in logical pixels.
    pub margin: Option<i32>,
    /// Minimum size request as `(width, height)` in logical pixels.
    pub size_request: Option<(i32, i32)>,
}

/// Last-applied values for [`Common`].
#[derive(Debug, Default)]
pub struct CommonState {
    sensitive: Tracked<bool>,
    tooltip: Tracked<String>,
    margin: Tracked<i32>,
    size_request: Tracked<(i32, i32)>,
}

impl CommonState {
    /// Pushes changed common properties onto the widget.
    ///
    /// Property order is fixed here once, so every kind applies the
    /// common block identically at build and at update.
    pub fn sync(&mut self, desc: &Common, widget: &NativeWidget) {
        self.sensitive
            .sync(desc.sensitive.as_ref(), |v| widget.set("sensitive", *v));
        self.tooltip
            .sync(desc.tooltip.as_ref(), |v| widget.set("tooltip", v.as_str()));
        self.margin
            .sync(desc.margin.as_ref(), |v| widget.set("margin", *v));
        self.size_request.sync(desc.size_request.as_ref(), |v| {
            widget.set("width-request", v.0);
            widget.set("height-request", v.1);
        });
    }
}
