//! Read-only display widgets.
//!
//! Everything in this crate shows state without accepting input: text
//! labels, images loaded from external sources, and progress bars.

/// Images loaded from external sources.
pub mod image;
/// Static text display.
pub mod label;
/// Task progress display.
pub mod progress;

pub use image::{Image, image};
pub use label::{Label, label};
pub use progress::{ProgressBar, progress_bar};
