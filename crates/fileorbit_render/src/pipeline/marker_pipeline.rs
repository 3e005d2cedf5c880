//! Instanced marker pipeline
//!
//! One shader, three pipeline variants:
//! - `Solid` - lit triangles with depth test and write
//! - `Wire` - flat lines with depth test
//! - `Overlay` - flat translucent triangles drawn over everything
//!
//! Each frame all instances of all batches are packed into one instance
//! buffer and drawn in batch order inside a single render pass.

use std::ops::Range;
use wgpu::util::DeviceExt;

use super::types::{FrameUniforms, MarkerInstance, MarkerVertex};
use crate::mesh::MeshKind;
use crate::presentation::{DrawBatch, Frame};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Instance buffer capacity before the first growth
const INITIAL_INSTANCE_CAPACITY: usize = 256;

/// How a batch is rasterized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipelineVariant {
    Solid,
    Wire,
    Overlay,
}

impl PipelineVariant {
    /// Depth write flag and compare function
    ///
    /// Only solid markers write depth; wire lines are tested against them,
    /// overlays ignore depth entirely.
    pub fn depth_mode(self) -> (bool, wgpu::CompareFunction) {
        match self {
            PipelineVariant::Solid => (true, wgpu::CompareFunction::Less),
            PipelineVariant::Wire => (false, wgpu::CompareFunction::Less),
            PipelineVariant::Overlay => (false, wgpu::CompareFunction::Always),
        }
    }
}

/// A mesh uploaded to the GPU
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, kind: MeshKind) -> Self {
        let data = kind.build();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Index Buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.index_count() as u32,
        }
    }
}

/// Render pipeline for markers and overlays
pub struct MarkerPipeline {
    solid: wgpu::RenderPipeline,
    wire: wgpu::RenderPipeline,
    overlay: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl MarkerPipeline {
    /// Create the pipelines and upload all meshes
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Marker Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Marker Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Marker Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/marker.wgsl").into()),
        });

        let build = |variant: PipelineVariant| {
            Self::create_pipeline(device, &pipeline_layout, &shader, surface_format, variant)
        };
        let solid = build(PipelineVariant::Solid);
        let wire = build(PipelineVariant::Wire);
        let overlay = build(PipelineVariant::Overlay);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Marker Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let meshes = MeshKind::ALL.iter().map(|&kind| GpuMesh::upload(device, kind)).collect();

        Self {
            solid,
            wire,
            overlay,
            uniform_buffer,
            bind_group,
            meshes,
            instance_buffer: Self::create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY),
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            depth_texture: None,
            depth_size: (0, 0),
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        variant: PipelineVariant,
    ) -> wgpu::RenderPipeline {
        let (label, topology, fragment_entry) = match variant {
            PipelineVariant::Solid => (
                "Marker Solid Pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                "fs_lit",
            ),
            PipelineVariant::Wire => (
                "Marker Wire Pipeline",
                wgpu::PrimitiveTopology::LineList,
                "fs_flat",
            ),
            PipelineVariant::Overlay => (
                "Marker Overlay Pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                "fs_flat",
            ),
        };
        let (depth_write, depth_compare) = variant.depth_mode();

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout(), Self::instance_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: match topology {
                    wgpu::PrimitiveTopology::TriangleList => Some(wgpu::Face::Back),
                    _ => None,
                },
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: depth_write,
                depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Get the vertex buffer layout for MarkerVertex
    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }

    /// Get the instance buffer layout for MarkerInstance
    fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // model columns
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 5,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 64,
                    shader_location: 6,
                },
            ],
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Marker Instance Buffer"),
            size: (capacity * std::mem::size_of::<MarkerInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn pipeline(&self, variant: PipelineVariant) -> &wgpu::RenderPipeline {
        match variant {
            PipelineVariant::Solid => &self.solid,
            PipelineVariant::Wire => &self.wire,
            PipelineVariant::Overlay => &self.overlay,
        }
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Marker Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture = Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Pack every batch's instances into the instance buffer
    ///
    /// Returns the instance range of each batch, in batch order.
    fn upload_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        batches: &[DrawBatch],
    ) -> Vec<Range<u32>> {
        let (packed, ranges) = pack_instances(batches);

        if packed.len() > self.instance_capacity {
            let capacity = packed.len().next_power_of_two();
            log::debug!("Growing instance buffer to {} instances", capacity);
            self.instance_buffer = Self::create_instance_buffer(device, capacity);
            self.instance_capacity = capacity;
        }
        if !packed.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&packed));
        }
        ranges
    }

    /// Record one frame into `encoder`
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &Frame,
        clear_color: wgpu::Color,
    ) {
        self.update_uniforms(queue, &frame.uniforms);
        let ranges = self.upload_instances(device, queue, &frame.batches);

        let Some(depth_view) = self.depth_texture.as_ref() else {
            log::warn!("Depth texture missing; skipping frame");
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Marker Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        for (batch, instances) in frame.batches.iter().zip(ranges) {
            if instances.is_empty() {
                continue;
            }
            let mesh = &self.meshes[batch.mesh.index()];
            render_pass.set_pipeline(self.pipeline(batch.variant));
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..mesh.index_count, 0, instances);
        }
    }
}

/// Concatenate batch instances and record where each batch landed
fn pack_instances(batches: &[DrawBatch]) -> (Vec<MarkerInstance>, Vec<Range<u32>>) {
    let mut packed = Vec::with_capacity(batches.iter().map(|b| b.instances.len()).sum());
    let mut ranges = Vec::with_capacity(batches.len());
    for batch in batches {
        let start = packed.len() as u32;
        packed.extend_from_slice(&batch.instances);
        ranges.push(start..packed.len() as u32);
    }
    (packed, ranges)
}

/// Perspective projection for wgpu clip space (depth 0 to 1, right-handed)
pub fn perspective_matrix(fov_y: f32, aspect: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}
