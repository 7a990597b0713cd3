use std::f32::consts::TAU;

use bytemuck::{AnyBitPattern, NoUninit};
use palette::Srgb;
use ultraviolet::Vec2;
use wgpu::util::DeviceExt;

use crate::render::{arrow_segments, Painter};

const CIRCLE_SEGMENTS: usize = 48;

#[derive(Clone, Copy, NoUninit, AnyBitPattern)]
#[repr(C)]
struct Vertex {
    position: Vec2,
    color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[derive(Clone, Copy, NoUninit, AnyBitPattern)]
#[repr(C)]
struct Screen {
    size: [f32; 2],
    _padding: [f32; 2],
}

/// Colour in the encoding the surface expects.
fn surface_color(color: Srgb<u8>, srgb_surface: bool) -> [f32; 4] {
    let color = color.into_format::<f32>();
    let (r, g, b) = if srgb_surface {
        color.into_linear::<f32>().into_components()
    } else {
        color.into_components()
    };
    [r, g, b, 1.0]
}

/// Collects circles and arrows for a frame and draws them in one pass.
///
/// Circles go through a triangle-list pipeline, arrows through a line-list
/// pipeline; both share the pixel-space shader.
pub struct Canvas {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    background: wgpu::Color,
    body_color: [f32; 4],
    arrow_color: [f32; 4],
    triangles: Vec<Vertex>,
    lines: Vec<Vertex>,
}

impl Canvas {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("canvas shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let screen_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("screen uniform"),
            size: std::mem::size_of::<Screen>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("canvas bind group layout"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("canvas bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("canvas pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };
        let fill_pipeline = pipeline("circle pipeline", wgpu::PrimitiveTopology::TriangleList);
        let line_pipeline = pipeline("arrow pipeline", wgpu::PrimitiveTopology::LineList);

        let srgb = format.is_srgb();
        let [r, g, b, a] = surface_color(Srgb::new(0xFF, 0xFF, 0xFF), srgb);

        Self {
            fill_pipeline,
            line_pipeline,
            screen_buffer,
            bind_group,
            background: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
            body_color: surface_color(Srgb::new(0x20, 0x20, 0x20), srgb),
            arrow_color: surface_color(Srgb::new(0xAF, 0xAF, 0xAF), srgb),
            triangles: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn resize(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let screen = Screen {
            size: [width as f32, height as f32],
            _padding: [0.0; 2],
        };
        queue.write_buffer(&self.screen_buffer, 0, bytemuck::bytes_of(&screen));
    }

    /// Draws everything painted since the last `clear` onto `view`.
    pub fn flush(&self, view: &wgpu::TextureView, device: &wgpu::Device, queue: &wgpu::Queue) {
        let upload = |label: &str, vertices: &[Vertex]| {
            (!vertices.is_empty()).then(|| {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(label),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
            })
        };
        let triangles = upload("circle vertices", &self.triangles);
        let lines = upload("arrow vertices", &self.lines);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("canvas encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("canvas pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_bind_group(0, &self.bind_group, &[]);

            if let Some(buffer) = &triangles {
                pass.set_pipeline(&self.fill_pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..self.triangles.len() as u32, 0..1);
            }
            if let Some(buffer) = &lines {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..self.lines.len() as u32, 0..1);
            }
        }
        queue.submit(Some(encoder.finish()));
    }
}

impl Painter for Canvas {
    fn clear(&mut self) {
        self.triangles.clear();
        self.lines.clear();
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        let color = self.body_color;
        let rim = |i: usize| {
            let (sin, cos) = (i as f32 / CIRCLE_SEGMENTS as f32 * TAU).sin_cos();
            center + Vec2::new(cos, sin) * radius
        };

        for i in 0..CIRCLE_SEGMENTS {
            for position in [center, rim(i), rim(i + 1)] {
                self.triangles.push(Vertex { position, color });
            }
        }
    }

    fn draw_arrow(&mut self, from: Vec2, to: Vec2) {
        let color = self.arrow_color;
        for (start, end) in arrow_segments(from, to) {
            self.lines.push(Vertex { position: start, color });
            self.lines.push(Vertex { position: end, color });
        }
    }
}
