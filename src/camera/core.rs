use glam::{Mat4, Vec2, Vec3, Vec4};

use super::ray::Ray;
use crate::options::{CameraOptions, LightingOptions, MAX_DIRECTIONAL_LIGHTS};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +Z axis looking at the origin.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Update the aspect ratio; degenerate sizes are ignored.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// View matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Distance from the eye to the `z = 0` model plane.
    #[must_use]
    pub fn distance_to_plane(&self) -> f32 {
        self.eye.z.abs()
    }

    /// World-space height visible at the model plane.
    #[must_use]
    pub fn visible_height(&self) -> f32 {
        2.0 * (self.fovy.to_radians() * 0.5).tan() * self.distance_to_plane()
    }

    /// World-space width visible at the model plane.
    #[must_use]
    pub fn visible_width(&self) -> f32 {
        self.visible_height() * self.aspect
    }

    /// World ray through a point in normalized device coordinates
    /// (`x`, `y` in `[-1, 1]`, `y` up).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.build_matrix().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        // Mid-depth rather than the far plane keeps the unprojection well
        // conditioned in f32.
        let mid = inv.project_point3(ndc.extend(0.5));
        Ray::new(near, mid - near)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform holding the view-projection matrix and scene lights.
pub struct SceneUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub eye: [f32; 3],
    /// Ambient light intensity.
    pub ambient: f32,
    /// Directional lights: xyz = unit direction toward the light,
    /// w = intensity (0 for unused slots).
    pub lights: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneUniform {
    /// Uniform with identity view-projection and no lights.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0; 3],
            ambient: 0.0,
            lights: [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.eye = camera.eye.to_array();
    }

    /// Copy ambient and directional lights.
    pub fn update_lighting(&mut self, lighting: &LightingOptions) {
        self.ambient = lighting.ambient;
        self.lights = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
        for (slot, light) in
            self.lights.iter_mut().zip(lighting.directional.iter())
        {
            let dir = Vec3::from_array(light.position).normalize_or_zero();
            *slot = Vec4::from((dir, light.intensity)).to_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::from_options(&CameraOptions::default(), 16.0 / 9.0)
    }

    #[test]
    fn visible_extent_at_model_plane() {
        let cam = camera();
        let expected = 2.0 * 20f32.to_radians().tan() * 7.5;
        assert!((cam.visible_height() - expected).abs() < 1e-5);
        assert!(
            (cam.visible_width() - expected * 16.0 / 9.0).abs() < 1e-4
        );
    }

    #[test]
    fn centre_ray_points_down_the_axis() {
        let ray = camera().ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(ray.origin.x.abs() < 1e-4 && ray.origin.y.abs() < 1e-4);
    }

    #[test]
    fn corner_ray_reaches_visible_edge() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::new(1.0, 1.0));
        // Walk to the z = 0 plane.
        let t = -ray.origin.z / ray.direction.z;
        let p = ray.at(t);
        assert!((p.x - cam.visible_width() * 0.5).abs() < 1e-3);
        assert!((p.y - cam.visible_height() * 0.5).abs() < 1e-3);
    }

    #[test]
    fn degenerate_aspect_is_ignored() {
        let mut cam = camera();
        cam.set_aspect(0.0, 100.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn lighting_fills_four_slots() {
        let mut uniform = SceneUniform::new();
        uniform.update_lighting(&LightingOptions::default());
        assert_eq!(uniform.ambient, 1.5);
        for light in uniform.lights {
            let len = Vec3::new(light[0], light[1], light[2]).length();
            assert!((len - 1.0).abs() < 1e-5);
            assert!(light[3] > 0.0);
        }
    }
}
