//! GPU resource management: device/surface setup, the mesh pipeline, and
//! the wgpu [`SceneRenderer`](crate::engine::SceneRenderer).

/// Flat-shaded mesh renderer.
pub mod mesh_renderer;
/// Shared wgpu boilerplate for the mesh pipeline.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment.
pub mod texture;

pub use mesh_renderer::{MeshRenderer, MeshVertex, ModelUniform};
pub use render_context::{RenderContext, RenderContextError};
