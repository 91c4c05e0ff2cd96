//! Fixed viewing camera and picking rays.
//!
//! The showcase camera never moves: it sits on the +Z axis looking at the
//! model plane. Layout reads its visible extent; hit-testing casts rays
//! through it.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Ray primitives for CPU hit-testing.
pub mod ray;

pub use self::core::{Camera, SceneUniform};
pub use ray::Ray;
