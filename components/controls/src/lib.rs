//! Interactive control widgets.
//!
//! Every control here connects its native signals once, when its state is
//! built. Updating a description swaps handlers behind the existing
//! connections, so an unchanged tree costs nothing at the toolkit
//! boundary. Controls whose value the user edits natively (entries,
//! sliders, switches) pull the edited value back before their callback
//! runs and can share it through a bound cell.

/// Clickable push buttons.
pub mod button;
/// Single-line text input.
pub mod entry;
/// Continuous numeric input along a track.
pub mod slider;
/// On/off switches.
pub mod switch;

pub use button::{Button, button};
pub use entry::{Entry, entry};
pub use slider::{Slider, slider};
pub use switch::{Switch, switch};
