//! The recorded operation log.

use estuary_core::layout::Region;
use estuary_core::toolkit::{ConnectionId, RawWidget, Response, Value};

/// One framework-initiated toolkit call.
///
/// Test-side stimuli (emitting signals, writing values behind the
/// framework's back) are not recorded; the log shows exactly what the
/// framework asked the toolkit to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// A widget was created.
    Create {
        /// The new widget.
        widget: RawWidget,
        /// Its class tag.
        class: String,
    },
    /// The framework dropped its reference to a widget.
    Release {
        /// The released widget.
        widget: RawWidget,
    },
    /// A property was written.
    SetProperty {
        /// The target widget.
        widget: RawWidget,
        /// Property name.
        name: String,
        /// Written value.
        value: Value,
    },
    /// A signal handler was installed.
    Connect {
        /// The target widget.
        widget: RawWidget,
        /// Signal name.
        signal: String,
        /// Issued connection id.
        id: ConnectionId,
    },
    /// A signal handler was removed.
    Disconnect {
        /// The target widget.
        widget: RawWidget,
        /// The removed connection.
        id: ConnectionId,
    },
    /// The single child of a widget was set or cleared.
    SetChild {
        /// The parent widget.
        parent: RawWidget,
        /// The new child, or `None` to clear.
        child: Option<RawWidget>,
    },
    /// A child was appended to an ordered container.
    Append {
        /// The parent widget.
        parent: RawWidget,
        /// The appended child.
        child: RawWidget,
    },
    /// A child was inserted after a sibling in an ordered container.
    InsertAfter {
        /// The parent widget.
        parent: RawWidget,
        /// The inserted child.
        child: RawWidget,
        /// The anchor sibling, or `None` for the front.
        sibling: Option<RawWidget>,
    },
    /// A child was detached from its parent.
    RemoveChild {
        /// The parent widget.
        parent: RawWidget,
        /// The detached child.
        child: RawWidget,
    },
    /// A child was attached to a grid region.
    AttachGrid {
        /// The parent grid.
        parent: RawWidget,
        /// The attached child.
        child: RawWidget,
        /// The occupied region.
        region: Region,
    },
    /// A child was added under a key.
    AddKeyed {
        /// The parent container.
        parent: RawWidget,
        /// The added child.
        child: RawWidget,
        /// The key.
        key: String,
    },
    /// A response button was added to a dialog.
    AddButton {
        /// The dialog.
        dialog: RawWidget,
        /// Button label.
        label: String,
        /// Response the button concludes with.
        response: Response,
    },
    /// An image resource was loaded.
    LoadImage {
        /// The requested source.
        source: String,
    },
    /// A window was presented.
    Present {
        /// The presented window.
        window: RawWidget,
    },
    /// A nested modal loop ran for a dialog.
    RunModal {
        /// The dialog.
        dialog: RawWidget,
    },
    /// The outer event loop ran.
    Run,
    /// The outer event loop was asked to stop.
    Quit,
}

impl Op {
    /// Whether this call mutates or targets the given widget.
    ///
    /// Anchor references (the `sibling` of an insert) do not count.
    #[must_use]
    pub fn touches(&self, raw: RawWidget) -> bool {
        match self {
            Self::Create { widget, .. }
            | Self::Release { widget }
            | Self::SetProperty { widget, .. }
            | Self::Connect { widget, .. }
            | Self::Disconnect { widget, .. } => *widget == raw,
            Self::SetChild { child, .. } => *child == Some(raw),
            Self::Append { child, .. }
            | Self::InsertAfter { child, .. }
            | Self::RemoveChild { child, .. }
            | Self::AttachGrid { child, .. }
            | Self::AddKeyed { child, .. } => *child == raw,
            Self::AddButton { dialog, .. } | Self::RunModal { dialog } => *dialog == raw,
            Self::Present { window } => *window == raw,
            Self::LoadImage { .. } | Self::Run | Self::Quit => false,
        }
    }

    /// Whether this call attaches a child to a parent.
    #[must_use]
    pub const fn is_attach(&self) -> bool {
        matches!(
            self,
            Self::SetChild { child: Some(_), .. }
                | Self::Append { .. }
                | Self::InsertAfter { .. }
                | Self::AttachGrid { .. }
                | Self::AddKeyed { .. }
        )
    }

    /// Whether this call detaches a child from a parent.
    #[must_use]
    pub const fn is_detach(&self) -> bool {
        matches!(
            self,
            Self::RemoveChild { .. } | Self::SetChild { child: None, .. }
        )
    }
}
