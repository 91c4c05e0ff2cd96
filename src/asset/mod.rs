//! Asset configuration, geometry, and asynchronous loading.

/// Per-asset descriptors and stable slot identifiers.
pub mod descriptor;
/// Format-agnostic loader seam and the glTF implementation.
pub mod loader;
/// CPU-side mesh graph, bounds, and ray hits.
pub mod mesh;
/// Asynchronous load tracking with the edge-triggered "all loaded" event.
pub mod repository;

pub use descriptor::{default_descriptors, Adjustment, AssetDescriptor, SlotId};
pub use loader::{GltfLoader, ModelLoader};
pub use mesh::{Aabb, MeshGraph, MeshNode, MeshPrimitive};
pub use repository::{ModelRepository, RepositoryEvent};
