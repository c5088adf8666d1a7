//! Container widgets.
//!
//! Containers own their children through the reconciliation strategies in
//! `estuary-core`: [`Flex`] diffs an ordered list, [`Grid`] tracks cell
//! regions, [`Deck`] addresses pages by key, and [`Frame`] holds a single
//! child. None of them computes layout; they forward attachment metadata
//! and let the toolkit lay things out.

/// Keyed pages with one visible at a time.
pub mod deck;
/// Ordered children along one axis.
pub mod flex;
/// A decorated single-child container.
pub mod frame;
/// Children placed in cell regions.
pub mod grid;

pub use deck::{Deck, deck};
pub use flex::{Flex, hflex, vflex};
pub use frame::{Frame, frame};
pub use grid::{Grid, grid};
