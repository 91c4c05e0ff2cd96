use glam::{EulerRot, Mat4, Quat, Vec3};

/// Placement of one model: component-wise scale, Euler XYZ rotation
/// (radians), translation. Composed as translate · rotate · scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// Component-wise scale.
    pub scale: Vec3,
    /// World-space translation.
    pub position: Vec3,
    /// Euler angles (pitch about X, yaw about Y, roll about Z).
    pub rotation: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

impl ModelTransform {
    /// Rotation as a quaternion (intrinsic X, then Y, then Z).
    #[must_use]
    pub fn quat(&self) -> Quat {
        euler_xyz(self.rotation)
    }

    /// Model-to-world matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.quat(),
            self.position,
        )
    }
}

/// Quaternion for XYZ Euler angles.
#[must_use]
pub fn euler_xyz(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}
