//! Pointer and touch interaction.
//!
//! Turns pointer gestures into per-model target rotations: a press picks
//! the nearest visible model under the cursor, drags rotate it, and on
//! the single-model layout horizontal touch swipes step the selection.

mod controller;
mod picking;
mod swipe;

pub use controller::{DragDelta, DragSession, InteractionController, MoveOutcome};
pub use picking::{pick, PickTarget};
pub use swipe::{step_selection, SwipeTracker};
