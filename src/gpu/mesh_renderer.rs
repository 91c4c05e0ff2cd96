//! wgpu implementation of [`SceneRenderer`]: flat-colored, Lambert-lit
//! triangle meshes over a transparent clear.

use glam::Mat4;
use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use super::pipeline_helpers::{create_mesh_pipeline, uniform_buffer};
use super::render_context::RenderContext;
use super::texture::DepthTarget;
use crate::asset::{MeshGraph, MeshPrimitive, SlotId};
use crate::camera::{Camera, SceneUniform};
use crate::engine::{DrawItem, SceneRenderer};
use crate::error::VitrineError;
use crate::options::Options;

/// Interleaved vertex as consumed by `mesh.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Node-space position.
    pub position: [f32; 3],
    /// Node-space normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout for the mesh pipeline.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-primitive uniform: world matrix, its normal matrix, base color.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Node-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`.
    pub normal: [[f32; 4]; 4],
    /// Linear RGBA base color.
    pub color: [f32; 4],
}

impl ModelUniform {
    /// Uniform for a node placed by `world`.
    #[must_use]
    pub fn new(world: Mat4, color: [f32; 4]) -> Self {
        let normal = if world.determinant().abs() > f32::EPSILON {
            world.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };
        Self {
            model: world.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            color,
        }
    }
}

struct GpuPrimitive {
    node_transform: Mat4,
    color: [f32; 4],
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuPrimitive {
    fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}

/// GPU renderer for the showcase's loaded models.
pub struct MeshRenderer {
    context: RenderContext,
    depth: DepthTarget,
    pipeline: wgpu::RenderPipeline,
    scene_uniform: SceneUniform,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    models: FxHashMap<SlotId, Vec<GpuPrimitive>>,
    clear_color: wgpu::Color,
}

impl MeshRenderer {
    /// Build the mesh pipeline on an initialized context.
    #[must_use]
    pub fn new(context: RenderContext, options: &Options) -> Self {
        let device = &context.device;
        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Mesh Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("shaders/mesh.wgsl").into(),
                ),
            });

        let scene_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Layout"),
                entries: &[uniform_buffer(0)],
            });
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Layout"),
                entries: &[uniform_buffer(0)],
            });

        let mut scene_uniform = SceneUniform::new();
        scene_uniform.update_lighting(&options.lighting);
        let scene_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Scene Uniform"),
                contents: bytemuck::bytes_of(&scene_uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let scene_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Scene Bind Group"),
                layout: &scene_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                }],
            });

        let pipeline = create_mesh_pipeline(
            device,
            "Mesh Pipeline",
            &shader,
            context.format(),
            &[&scene_layout, &model_layout],
            MeshVertex::layout(),
        );

        let (width, height) = context.size();
        let depth = DepthTarget::new(device, width, height);
        let [r, g, b, a] = options.display.clear_color.map(f64::from);

        Self {
            context,
            depth,
            pipeline,
            scene_uniform,
            scene_buffer,
            scene_bind_group,
            model_layout,
            models: FxHashMap::default(),
            clear_color: wgpu::Color { r, g, b, a },
        }
    }

    fn upload_primitive(
        &self,
        slot: SlotId,
        node_transform: Mat4,
        primitive: &MeshPrimitive,
    ) -> Option<GpuPrimitive> {
        if primitive.indices.len() < 3 || primitive.positions.is_empty() {
            return None;
        }
        let device = &self.context.device;
        let vertices: Vec<MeshVertex> = primitive
            .positions
            .iter()
            .zip(&primitive.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Slot {slot} Vertices")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Slot {slot} Indices")),
                contents: bytemuck::cast_slice(&primitive.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform = ModelUniform::new(node_transform, primitive.color);
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Slot {slot} Model Uniform")),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Slot {slot} Model Bind Group")),
            layout: &self.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Trailing partial triangles are dropped.
        let index_count = (primitive.indices.len() / 3 * 3) as u32;
        Some(GpuPrimitive {
            node_transform,
            color: primitive.color,
            vertex_buffer,
            index_buffer,
            index_count,
            uniform_buffer,
            bind_group,
        })
    }

    fn write_uniforms(&mut self, camera: &Camera, items: &[DrawItem]) {
        self.scene_uniform.update_view_proj(camera);
        self.context.queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&self.scene_uniform),
        );
        for item in items {
            let Some(primitives) = self.models.get(&item.slot) else {
                continue;
            };
            for prim in primitives {
                let uniform = ModelUniform::new(
                    item.model * prim.node_transform,
                    prim.color,
                );
                self.context.queue.write_buffer(
                    &prim.uniform_buffer,
                    0,
                    bytemuck::bytes_of(&uniform),
                );
            }
        }
    }
}

impl SceneRenderer for MeshRenderer {
    fn upload(
        &mut self,
        slot: SlotId,
        graph: &MeshGraph,
    ) -> Result<(), VitrineError> {
        let primitives: Vec<GpuPrimitive> = graph
            .nodes
            .iter()
            .filter_map(|node| {
                self.upload_primitive(slot, node.transform, &node.primitive)
            })
            .collect();
        if primitives.is_empty() {
            return Err(VitrineError::asset_load(
                &graph.name,
                "no drawable triangles",
            ));
        }
        log::debug!(
            "uploaded slot {slot}: {} primitive(s), {} triangle(s)",
            primitives.len(),
            graph.triangle_count()
        );
        if let Some(old) = self.models.insert(slot, primitives) {
            old.iter().for_each(GpuPrimitive::destroy);
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.context.size() == (width, height)
        {
            return;
        }
        self.context.resize(width, height);
        self.depth.texture.destroy();
        self.depth = DepthTarget::new(&self.context.device, width, height);
    }

    fn draw(
        &mut self,
        camera: &Camera,
        items: &[DrawItem],
    ) -> Result<(), VitrineError> {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(VitrineError::Surface(e)),
        };

        self.write_uniforms(camera, items);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Mesh Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.scene_bind_group, &[]);
            for item in items {
                let Some(primitives) = self.models.get(&item.slot) else {
                    continue;
                };
                for prim in primitives {
                    pass.set_bind_group(1, &prim.bind_group, &[]);
                    pass.set_vertex_buffer(0, prim.vertex_buffer.slice(..));
                    pass.set_index_buffer(
                        prim.index_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    pass.draw_indexed(0..prim.index_count, 0, 0..1);
                }
            }
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn release(&mut self, slot: SlotId) {
        if let Some(primitives) = self.models.remove(&slot) {
            primitives.iter().for_each(GpuPrimitive::destroy);
            log::debug!("released slot {slot}");
        }
    }
}
