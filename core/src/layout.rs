//! Attachment metadata carried by container children.
//!
//! Containers do not compute layout; the native toolkit does. What crosses
//! the boundary is per-child metadata: which axis an ordered container
//! stacks along, how a child aligns inside the space it is granted, and
//! which cell region a grid child occupies.

use crate::toolkit::{NativeWidget, Value};

/// Axis along which an ordered container lays out its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Children flow left to right.
    #[default]
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

impl Orientation {
    /// The toolkit property value for this orientation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl From<Orientation> for Value {
    fn from(orientation: Orientation) -> Self {
        Self::Text(orientation.as_str().into())
    }
}

/// Alignment of a child inside the space its parent grants it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Stretch to fill the granted space.
    #[default]
    Fill,
    /// Snap to the start edge.
    Start,
    /// Center within the granted space.
    Center,
    /// Snap to the end edge.
    End,
}

impl Align {
    /// The toolkit property value for this alignment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

impl From<Align> for Value {
    fn from(align: Align) -> Self {
        Self::Text(align.as_str().into())
    }
}

/// Per-child layout metadata of ordered containers.
///
/// Applied as properties on the child widget when the child is first
/// attached and re-applied whenever it changes or the child is rebuilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChildLayout {
    /// Whether the child receives extra space along the main axis.
    pub expand: bool,
    /// Horizontal alignment.
    pub halign: Align,
    /// Vertical alignment.
    pub valign: Align,
}

impl ChildLayout {
    /// Default metadata: no expansion, fill on both axes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            expand: false,
            halign: Align::Fill,
            valign: Align::Fill,
        }
    }

    /// Grants the child extra space along the main axis.
    #[must_use]
    pub const fn expand(mut self) -> Self {
        self.expand = true;
        self
    }

    /// Sets the horizontal alignment.
    #[must_use]
    pub const fn halign(mut self, align: Align) -> Self {
        self.halign = align;
        self
    }

    /// Sets the vertical alignment.
    #[must_use]
    pub const fn valign(mut self, align: Align) -> Self {
        self.valign = align;
        self
    }

    /// Pushes this metadata onto a child widget.
    pub fn apply(&self, widget: &NativeWidget) {
        widget.set("expand", self.expand);
        widget.set("halign", self.halign);
        widget.set("valign", self.valign);
    }
}

/// Rectangular cell region occupied by a grid child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Leftmost column.
    pub column: i32,
    /// Topmost row.
    pub row: i32,
    /// Number of columns spanned.
    pub columns: i32,
    /// Number of rows spanned.
    pub rows: i32,
}

impl Region {
    /// A single-cell region at the given column and row.
    #[must_use]
    pub const fn at(column: i32, row: i32) -> Self {
        Self {
            column,
            row,
            columns: 1,
            rows: 1,
        }
    }

    /// Extends the region to span the given number of columns and rows.
    #[must_use]
    pub const fn span(mut self, columns: i32, rows: i32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::at(0, 0)
    }
}
