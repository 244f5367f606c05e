//! wgpu-backed implementation of the [`Canvas`] facade.
//!
//! Draw calls are recorded CPU-side as shape instances (the translate
//! and scale of the current transform are folded into each instance, so
//! a non-uniformly scaled circle arrives at the GPU as an ellipse).
//! Instances are grouped into ordered batches that split whenever the
//! blend mode changes; `present` uploads the instance buffer once and
//! replays the batches over the two pre-built pipelines.

use std::ops::Range;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::canvas::{BlendMode, Canvas, Color, TextAlign};
use crate::error::GpuError;
use crate::font;
use crate::shader::SHADER_SOURCE;

const SHAPE_CIRCLE: u32 = 0;
const SHAPE_RECT: u32 = 1;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    resolution: [f32; 2],
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ShapeInstance {
    center: [f32; 2],
    half_size: [f32; 2],
    color: [f32; 4],
    kind: u32,
    _pad: [u32; 3],
}

/// Scale-then-translate 2D transform; the canvas facade exposes no
/// rotation, so two axes of scale and an offset are enough.
#[derive(Clone, Copy)]
struct Transform {
    tx: f32,
    ty: f32,
    sx: f32,
    sy: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
    };

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (self.sx * x + self.tx, self.sy * y + self.ty)
    }
}

/// Fill style and transform, stacked by save/restore.
#[derive(Clone, Copy)]
struct DrawState {
    fill: Color,
    alpha: f32,
    blend: BlendMode,
    transform: Transform,
}

impl DrawState {
    fn reset() -> Self {
        Self {
            fill: Color::BLACK,
            alpha: 1.0,
            blend: BlendMode::Alpha,
            transform: Transform::IDENTITY,
        }
    }
}

struct Batch {
    blend: BlendMode,
    range: Range<u32>,
}

/// GPU surface exposing the 2D canvas facade.
pub struct GpuCanvas {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Sketch coordinate space; the surface itself may be larger on
    /// scaled displays and the vertex mapping stretches to fill it.
    resolution: [f32; 2],
    alpha_pipeline: wgpu::RenderPipeline,
    additive_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    state: DrawState,
    stack: Vec<DrawState>,
    path: Option<(f32, f32, f32)>,
    instances: Vec<ShapeInstance>,
    batches: Vec<Batch>,
}

impl GpuCanvas {
    pub async fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        // The window was requested at a logical size; on scaled
        // displays its physical surface is larger. The surface runs at
        // physical pixels, drawing stays in sketch coordinates.
        let inner = window.inner_size();
        let (surface_width, surface_height) = if inner.width > 0 && inner.height > 0 {
            (inner.width, inner.height)
        } else {
            (width, height)
        };

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: surface_width,
            height: surface_height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            resolution: [width as f32, height as f32],
            _pad: [0.0; 2],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let additive_blend = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let alpha_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            wgpu::BlendState::ALPHA_BLENDING,
            "Alpha Pipeline",
        );
        let additive_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            additive_blend,
            "Additive Pipeline",
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            resolution: [width as f32, height as f32],
            alpha_pipeline,
            additive_pipeline,
            uniform_buffer,
            uniform_bind_group,
            state: DrawState::reset(),
            stack: Vec::new(),
            path: None,
            instances: Vec::new(),
            batches: Vec::new(),
        })
    }

    /// Match the surface to a new physical size. The resolution uniform
    /// stays at the sketch's dimensions so sketch coordinates keep
    /// mapping to the full surface.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size (after a Lost error).
    pub fn reconfigure(&mut self) {
        self.resize(winit::dpi::PhysicalSize {
            width: self.config.width,
            height: self.config.height,
        });
    }

    /// Drop last frame's recording and reset style state for a new tick.
    pub fn begin_frame(&mut self) {
        self.state = DrawState::reset();
        self.stack.clear();
        self.path = None;
        self.instances.clear();
        self.batches.clear();
    }

    fn push_instance(&mut self, instance: ShapeInstance, blend: BlendMode) {
        let index = self.instances.len() as u32;
        self.instances.push(instance);

        match self.batches.last_mut() {
            Some(batch) if batch.blend == blend => batch.range.end = index + 1,
            _ => self.batches.push(Batch {
                blend,
                range: index..index + 1,
            }),
        }
    }

    fn push_shape(&mut self, x: f32, y: f32, half_w: f32, half_h: f32, kind: u32) {
        let t = self.state.transform;
        let (cx, cy) = t.apply(x, y);
        let color = self.state.fill.with_alpha_scaled(self.state.alpha);
        let blend = self.state.blend;

        self.push_instance(
            ShapeInstance {
                center: [cx, cy],
                half_size: [(half_w * t.sx).abs(), (half_h * t.sy).abs()],
                color: [color.r, color.g, color.b, color.a],
                kind,
                _pad: [0; 3],
            },
            blend,
        );
    }

    /// Upload this frame's instances and replay the batches.
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Zero-sized vertex buffers are legal but pointless; an empty
        // frame still clears.
        let instance_buffer = if self.instances.is_empty() {
            None
        } else {
            Some(
                self.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Shape Instance Buffer"),
                        contents: bytemuck::cast_slice(&self.instances),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
            )
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(buffer) = &instance_buffer {
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));

                for batch in &self.batches {
                    let pipeline = match batch.blend {
                        BlendMode::Alpha => &self.alpha_pipeline,
                        BlendMode::Additive => &self.additive_pipeline,
                    };
                    render_pass.set_pipeline(pipeline);
                    render_pass.draw(0..6, batch.range.clone());
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Canvas for GpuCanvas {
    fn set_background(&mut self, color: Color) {
        // Whole surface, untransformed, at full opacity.
        let [w, h] = self.resolution;
        let blend = self.state.blend;
        self.push_instance(
            ShapeInstance {
                center: [w / 2.0, h / 2.0],
                half_size: [w / 2.0, h / 2.0],
                color: [color.r, color.g, color.b, color.a],
                kind: SHAPE_RECT,
                _pad: [0; 3],
            },
            blend,
        );
    }

    fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha;
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.state.blend = mode;
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let t = &mut self.state.transform;
        t.tx += t.sx * dx;
        t.ty += t.sy * dy;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        let t = &mut self.state.transform;
        t.sx *= sx;
        t.sy *= sy;
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.push_shape(x + w / 2.0, y + h / 2.0, w / 2.0, h / 2.0, SHAPE_RECT);
    }

    fn circle(&mut self, x: f32, y: f32, radius: f32) {
        self.path = Some((x, y, radius));
    }

    fn fill(&mut self) {
        if let Some((x, y, radius)) = self.path.take() {
            self.push_shape(x, y, radius, radius, SHAPE_CIRCLE);
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign) {
        for [px, py, w, h] in font::layout(text, x, y, size, align) {
            self.rect(px, py, w, h);
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ShapeInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 8,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 16,
                        shader_location: 2,
                        format: wgpu::VertexFormat::Float32x4,
                    },
                    wgpu::VertexAttribute {
                        offset: 32,
                        shader_location: 3,
                        format: wgpu::VertexFormat::Uint32,
                    },
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
