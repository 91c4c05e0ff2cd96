//! Model loading seam.
//!
//! The viewport only needs "path in, mesh graph out"; everything format
//! specific lives behind [`ModelLoader`]. [`GltfLoader`] is the default.

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};

use super::mesh::{MeshGraph, MeshNode, MeshPrimitive};
use crate::error::VitrineError;

/// Fallback base color for primitives without a material.
const DEFAULT_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 1.0];

/// Loads a model file into a [`MeshGraph`].
///
/// Implementations are called from loader threads, one call per
/// descriptor, and must not touch viewport state.
pub trait ModelLoader: Send + Sync {
    /// Resolve and decode one asset.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::AssetLoad`] when the file is missing or
    /// cannot be decoded.
    fn load(&self, file_name: &str) -> Result<MeshGraph, VitrineError>;
}

/// glTF 2.0 (`.gltf` / `.glb`) loader rooted at an asset directory.
#[derive(Debug, Clone)]
pub struct GltfLoader {
    root: PathBuf,
}

impl GltfLoader {
    /// Loader resolving file names against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModelLoader for GltfLoader {
    fn load(&self, file_name: &str) -> Result<MeshGraph, VitrineError> {
        let path = self.root.join(file_name);
        let (document, buffers, _images) = gltf::import(&path)
            .map_err(|e| VitrineError::asset_load(&path, e))?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| VitrineError::asset_load(&path, "no scene"))?;

        let mut graph = MeshGraph::new(file_name);
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, &buffers, &mut graph);
        }
        if graph.nodes.is_empty() {
            return Err(VitrineError::asset_load(&path, "scene has no meshes"));
        }

        log::debug!(
            "loaded {file_name}: {} primitives, {} triangles",
            graph.nodes.len(),
            graph.triangle_count()
        );
        Ok(graph)
    }
}

/// Depth-first walk accumulating node transforms.
fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    graph: &mut MeshGraph,
) {
    let world =
        parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            if let Some(p) = read_primitive(&primitive, buffers) {
                graph.nodes.push(MeshNode::new(world, p));
            }
        }
    }

    for child in node.children() {
        collect_node(&child, world, buffers, graph);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Option<MeshPrimitive> {
    let reader =
        primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

    let positions: Vec<Vec3> =
        reader.read_positions()?.map(Vec3::from_array).collect();
    if positions.is_empty() {
        return None;
    }
    let normals = reader
        .read_normals()
        .map(|n| n.map(Vec3::from_array).collect::<Vec<_>>());
    let indices: Vec<u32> = reader.read_indices().map_or_else(
        || (0..positions.len() as u32).collect(),
        |i| i.into_u32().collect(),
    );
    let factor = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();

    Some(MeshPrimitive::new(positions, normals, indices, base_color(factor)))
}

/// Opaque base color for a material factor. Translucent materials are
/// drawn fully opaque.
fn base_color(factor: [f32; 4]) -> [f32; 4] {
    let [r, g, b, _] = factor;
    // Textures are not sampled, so a bare white factor means "unknown".
    if [r, g, b] == [1.0; 3] {
        DEFAULT_COLOR
    } else {
        [r, g, b, 1.0]
    }
}
