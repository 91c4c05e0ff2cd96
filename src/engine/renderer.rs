use glam::Mat4;

use crate::asset::{MeshGraph, SlotId};
use crate::camera::Camera;
use crate::error::VitrineError;

/// One model to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Slot whose uploaded geometry to use.
    pub slot: SlotId,
    /// Model-to-world matrix.
    pub model: Mat4,
}

/// Drawing backend driven by the showcase.
///
/// [`MeshRenderer`](crate::gpu::MeshRenderer) is the wgpu implementation;
/// tests use a recording stand-in.
pub trait SceneRenderer {
    /// Make `graph` drawable under `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if GPU resources cannot be created; the slot is
    /// then treated as never loaded.
    fn upload(&mut self, slot: SlotId, graph: &MeshGraph) -> Result<(), VitrineError>;

    /// Render target changed size (physical pixels).
    fn resize(&mut self, width: u32, height: u32);

    /// Draw `items` with `camera` as one frame.
    ///
    /// # Errors
    ///
    /// Returns an error for unrecoverable surface failures; the showcase
    /// logs it and skips the frame.
    fn draw(&mut self, camera: &Camera, items: &[DrawItem]) -> Result<(), VitrineError>;

    /// Free everything held for `slot`.
    fn release(&mut self, slot: SlotId);
}
