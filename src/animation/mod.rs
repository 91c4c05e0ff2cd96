//! Per-frame rotation motion: exponential easing toward a target and the
//! idle auto-return of pitch.

mod idle;

pub use idle::IdleReturn;

use glam::Vec3;

/// Orientation a model eases toward. Pitch is rotation about X, yaw about
/// Y; roll is not user-controllable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetRotation {
    /// Rotation about X, radians.
    pub pitch: f32,
    /// Rotation about Y, radians.
    pub yaw: f32,
}

impl TargetRotation {
    /// Target matching a rest rotation (`x` → pitch, `y` → yaw).
    #[must_use]
    pub fn from_rest(rotation: Vec3) -> Self {
        Self {
            pitch: rotation.x,
            yaw: rotation.y,
        }
    }
}

/// One exponential smoothing step: move `factor` of the way to `target`.
#[inline]
#[must_use]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Ease a model rotation's pitch and yaw toward `target`; roll is left
/// alone.
pub fn ease_rotation(rotation: &mut Vec3, target: TargetRotation, factor: f32) {
    rotation.y = approach(rotation.y, target.yaw, factor);
    rotation.x = approach(rotation.x, target.pitch, factor);
}
