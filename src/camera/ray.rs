//! Ray primitives for CPU hit-testing.

use glam::{Mat4, Vec3};

use crate::asset::mesh::Aabb;

/// Determinant magnitude below which a triangle is treated as parallel to
/// the ray.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A half-line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction (not required to be unit length).
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t`.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Express this ray in another space. Direction length is preserved
    /// as transformed so parameters stay comparable within that space.
    #[must_use]
    pub fn transformed(&self, m: Mat4) -> Self {
        Self {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }

    /// Slab test. Returns the entry parameter (clamped to 0 when the origin
    /// is inside the box).
    #[must_use]
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let inv = self.direction.recip();
        let t0 = (aabb.min - self.origin) * inv;
        let t1 = (aabb.max - self.origin) * inv;
        // 0 * inf: an axis-parallel ray lying exactly in a face plane.
        // Grazing counts as a miss.
        if t0.is_nan() || t1.is_nan() {
            return None;
        }
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        if t_near <= t_far && t_far >= 0.0 {
            Some(t_near.max(0.0))
        } else {
            None
        }
    }

    /// Möller–Trumbore, double sided.
    #[must_use]
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}
