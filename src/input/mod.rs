//! Host input events.
//!
//! The host (browser shim, winit window, test harness) translates its
//! native events into [`InputEvent`] values and feeds them to the
//! showcase.

mod event;

pub use event::{InputEvent, NavDirection, PointerKind};
