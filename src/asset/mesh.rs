//! CPU-side mesh graph produced by a [`ModelLoader`](super::ModelLoader).
//!
//! The loader flattens the source scene hierarchy: each [`MeshNode`] carries
//! its accumulated node-to-model transform, so bounds and hit tests only
//! ever need one matrix multiply per node.

use glam::{Mat4, Vec3};

use crate::camera::ray::Ray;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box from explicit corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`, or `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    /// Midpoint.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest edge length.
    #[must_use]
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The eight corners.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box enclosing this box after an affine transform.
    #[must_use]
    pub fn transformed(&self, m: Mat4) -> Self {
        let corners = self.corners().map(|c| m.transform_point3(c));
        // Eight corners, never empty.
        Self::from_points(corners).unwrap_or(*self)
    }
}

/// One triangle-list primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPrimitive {
    /// Vertex positions in node space.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, same length as `positions`.
    pub normals: Vec<Vec3>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
    /// Linear RGBA base color.
    pub color: [f32; 4],
}

impl MeshPrimitive {
    /// Build a primitive, generating normals when none are supplied.
    #[must_use]
    pub fn new(
        positions: Vec<Vec3>,
        normals: Option<Vec<Vec3>>,
        indices: Vec<u32>,
        color: [f32; 4],
    ) -> Self {
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => vertex_normals(&positions, &indices),
        };
        Self {
            positions,
            normals,
            indices,
            color,
        }
    }

    /// Iterate triangles as vertex triples, skipping out-of-range indices.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }
}

/// Area-weighted vertex normals.
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len()
        {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

/// A primitive placed in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    /// Node-to-model transform (accumulated over the source hierarchy).
    pub transform: Mat4,
    /// Geometry.
    pub primitive: MeshPrimitive,
    local_bounds: Option<Aabb>,
}

impl MeshNode {
    /// Place a primitive; local bounds are computed once here.
    #[must_use]
    pub fn new(transform: Mat4, primitive: MeshPrimitive) -> Self {
        let local_bounds = Aabb::from_points(primitive.positions.iter().copied());
        Self {
            transform,
            primitive,
            local_bounds,
        }
    }

    /// Bounds in node space, `None` for an empty primitive.
    #[must_use]
    pub fn local_bounds(&self) -> Option<Aabb> {
        self.local_bounds
    }
}

/// Loaded model geometry: a flat list of placed primitives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshGraph {
    /// Source name (file name or scene name).
    pub name: String,
    /// Placed primitives.
    pub nodes: Vec<MeshNode>,
}

impl MeshGraph {
    /// Empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Append a node.
    #[must_use]
    pub fn with_node(mut self, node: MeshNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Total triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.primitive.indices.len() / 3)
            .sum()
    }

    /// Bounds of the whole graph under `model`, transforming each node's
    /// local box rather than every vertex.
    #[must_use]
    pub fn bounds(&self, model: Mat4) -> Option<Aabb> {
        self.nodes
            .iter()
            .filter_map(|node| {
                node.local_bounds
                    .map(|b| b.transformed(model * node.transform))
            })
            .reduce(|acc, b| acc.union(&b))
    }

    /// Nearest world-space hit distance of `ray` against this graph placed
    /// by `model`.
    #[must_use]
    pub fn raycast(&self, ray: &Ray, model: Mat4) -> Option<f32> {
        let mut nearest: Option<f32> = None;
        for node in &self.nodes {
            let Some(bounds) = node.local_bounds else {
                continue;
            };
            let node_to_world = model * node.transform;
            let world_to_node = node_to_world.inverse();
            if !world_to_node.is_finite() {
                continue;
            }
            let local_ray = ray.transformed(world_to_node);
            if local_ray.intersect_aabb(&bounds).is_none() {
                continue;
            }
            for [a, b, c] in node.primitive.triangles() {
                let Some(t) = local_ray.intersect_triangle(a, b, c) else {
                    continue;
                };
                let world_hit = node_to_world.transform_point3(local_ray.at(t));
                let distance = world_hit.distance(ray.origin);
                if nearest.map_or(true, |d| distance < d) {
                    nearest = Some(distance);
                }
            }
        }
        nearest
    }
}

/// Axis-aligned box mesh, handy as a stand-in asset.
#[must_use]
pub fn cuboid(name: &str, size: Vec3, color: [f32; 4]) -> MeshGraph {
    let h = size * 0.5;
    let corners = Aabb::new(-h, h).corners();
    // Two triangles per face, indexing into `corners`.
    const FACES: [[u32; 6]; 6] = [
        [0, 2, 1, 1, 2, 3], // -z
        [4, 5, 6, 5, 7, 6], // +z
        [0, 1, 4, 1, 5, 4], // -y
        [2, 6, 3, 3, 6, 7], // +y
        [0, 4, 2, 2, 4, 6], // -x
        [1, 3, 5, 3, 7, 5], // +x
    ];
    let indices = FACES.iter().flatten().copied().collect();
    let primitive = MeshPrimitive::new(corners.to_vec(), None, indices, color);
    MeshGraph::new(name).with_node(MeshNode::new(Mat4::IDENTITY, primitive))
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    #[test]
    fn cuboid_bounds_match_size() {
        let graph = cuboid("box", Vec3::new(2.0, 1.0, 0.5), [1.0; 4]);
        let b = graph.bounds(Mat4::IDENTITY).unwrap();
        assert!((b.size() - Vec3::new(2.0, 1.0, 0.5)).length() < 1e-6);
        assert!(b.center().length() < 1e-6);
        assert_eq!(graph.triangle_count(), 12);
    }

    #[test]
    fn bounds_follow_model_transform() {
        let graph = cuboid("box", Vec3::new(2.0, 1.0, 1.0), [1.0; 4]);
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let b = graph.bounds(m).unwrap();
        // Rotated 90° about Z: width and height swap, then doubled.
        assert!((b.size() - Vec3::new(2.0, 4.0, 2.0)).length() < 1e-4);
        assert!((b.center() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn empty_graph_has_no_bounds() {
        assert!(MeshGraph::new("empty").bounds(Mat4::IDENTITY).is_none());
    }

    #[test]
    fn raycast_reports_world_distance() {
        let graph = cuboid("box", Vec3::ONE, [1.0; 4]);
        let model = Mat4::from_scale(Vec3::splat(4.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        // Front face of the scaled box sits at z = 2.
        let d = graph.raycast(&ray, model).unwrap();
        assert!((d - 8.0).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn raycast_misses_beside_the_box() {
        let graph = cuboid("box", Vec3::ONE, [1.0; 4]);
        let ray = Ray::new(Vec3::new(3.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(graph.raycast(&ray, Mat4::IDENTITY).is_none());
    }

    #[test]
    fn generated_normals_are_unit_length() {
        let graph = cuboid("box", Vec3::ONE, [1.0; 4]);
        for n in &graph.nodes[0].primitive.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}
