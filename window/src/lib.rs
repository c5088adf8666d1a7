//! Top-level windows and modal dialogs.
//!
//! A [`Window`] is the usual root of an application's widget tree; the
//! application presents it when the tree is first built. A [`Dialog`] is
//! built fresh each time it is opened, runs a nested event loop, and is
//! torn down when that loop concludes.

/// Modal dialogs with response buttons.
pub mod dialog;
/// Top-level application windows.
pub mod window;

pub use dialog::{Dialog, dialog};
pub use window::{Window, window};
