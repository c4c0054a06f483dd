use bytemuck::{Pod, Zeroable};

use crate::coords::{Point, Viewport};
use crate::device::{Gpu, GpuFrame};
use crate::paint::Color;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct LineVertex {
    pub pos: [f32; 2], // physical px, pixel centers
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side list of line segments waiting for the next present.
///
/// Segments come in logical pixels and are stored in physical pixels. A
/// logical line is stroked with a square brush `ceil(scale)` physical pixels
/// wide, so lines one logical pixel apart stay contiguous on HiDPI surfaces.
#[derive(Debug, Clone)]
pub struct LineBatch {
    scale: f32,
    brush: u32,
    segments: usize,
    vertices: Vec<LineVertex>,
}

impl Default for LineBatch {
    fn default() -> Self {
        Self::with_scale(1.0)
    }
}

impl LineBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch for a surface with `scale` physical pixels per logical pixel.
    pub fn with_scale(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale as f32 } else { 1.0 };
        Self {
            scale,
            brush: (scale.ceil() as u32).max(1),
            segments: 0,
            vertices: Vec::new(),
        }
    }

    /// Appends one segment, both endpoints lit.
    ///
    /// GPU line rasterization leaves out the final pixel of a line, so every
    /// brush stroke gets a one pixel tail past `to` along the major axis.
    pub fn push(&mut self, from: Point, to: Point, color: Color) {
        let color = color.to_array();
        let a = self.to_physical(from);
        let b = self.to_physical(to);
        let step = end_step(from, to);
        let tail = [b[0] + step[0], b[1] + step[1]];

        for dy in 0..self.brush {
            for dx in 0..self.brush {
                // Pixel centers of this brush pixel.
                let off = [dx as f32 + 0.5, dy as f32 + 0.5];
                for p in [a, b, b, tail] {
                    self.vertices.push(LineVertex {
                        pos: [p[0] + off[0], p[1] + off[1]],
                        color,
                    });
                }
            }
        }
        self.segments += 1;
    }

    pub fn clear(&mut self) {
        self.segments = 0;
        self.vertices.clear();
    }

    /// Number of segments pushed since the last clear.
    pub fn len(&self) -> usize {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments == 0
    }

    pub(crate) fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Top-left physical pixel of a logical pixel.
    fn to_physical(&self, p: Point) -> [f32; 2] {
        [
            (p.x as f32 * self.scale).floor(),
            (p.y as f32 * self.scale).floor(),
        ]
    }
}

/// One pixel past the end of `from -> to` along its major axis.
fn end_step(from: Point, to: Point) -> [f32; 2] {
    let dx = to.x.saturating_sub(from.x);
    let dy = to.y.saturating_sub(from.y);
    let sign = |d: i32| if d < 0 { -1.0 } else { 1.0 };

    if dx.unsigned_abs() >= dy.unsigned_abs() {
        [sign(dx), 0.0]
    } else {
        [0.0, sign(dy)]
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// Draws a [`LineBatch`] as a `LineList` in a single render pass.
///
/// Pipeline and buffers are created lazily on first use and rebuilt only when
/// the surface format changes.
#[derive(Default)]
pub struct LineRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records into `frame`: clear to `background`, then every segment of
    /// `batch`, in `viewport` pixel coordinates.
    pub fn render(
        &mut self,
        gpu: &Gpu,
        frame: &mut GpuFrame,
        viewport: Viewport,
        background: Color,
        batch: &LineBatch,
    ) {
        self.ensure_pipeline(gpu);
        self.ensure_bindings(gpu);

        if !batch.is_empty() {
            self.write_viewport_uniform(gpu, viewport);
            self.ensure_vertex_capacity(gpu, batch.vertices().len());
            if let Some(vbo) = self.vertex_vbo.as_ref() {
                gpu.queue().write_buffer(vbo, 0, bytemuck::cast_slice(batch.vertices()));
            }
        }

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("redx line pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(background.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if batch.is_empty() {
            return;
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..batch.vertices().len() as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, gpu: &Gpu) {
        let format = gpu.surface_format();
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        let shader = gpu.device().create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("redx line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let bind_group_layout =
            gpu.device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("redx line bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<ViewportUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            gpu.device()
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("redx line pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = gpu.device().create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("redx line pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[LineVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, gpu: &Gpu) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("redx line viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("redx line bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&self, gpu: &Gpu, viewport: Viewport) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let u = ViewportUniform {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        };
        gpu.queue().write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_vertex_capacity(&mut self, gpu: &Gpu, required: usize) {
        if required <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        self.vertex_vbo = Some(gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("redx line vbo"),
            size: (new_cap * std::mem::size_of::<LineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CrossShape;

    /// Same mapping as `vs_main` in `line.wgsl`.
    fn ndc(pos: [f32; 2], viewport: Viewport) -> [f32; 2] {
        [
            pos[0] / viewport.width * 2.0 - 1.0,
            1.0 - pos[1] / viewport.height * 2.0,
        ]
    }

    /// Start vertices of the main strokes (tails excluded).
    fn stroke_starts(batch: &LineBatch) -> Vec<[f32; 2]> {
        batch.vertices().chunks(4).map(|v| v[0].pos).collect()
    }

    #[test]
    fn push_emits_line_and_tail_at_pixel_centers() {
        let mut batch = LineBatch::new();
        batch.push(Point::new(0, 0), Point::new(799, 599), Color::RED);

        assert_eq!(batch.len(), 1);
        let v = batch.vertices();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0].pos, [0.5, 0.5]);
        assert_eq!(v[1].pos, [799.5, 599.5]);
        assert_eq!(v[2].pos, [799.5, 599.5]);
        assert_eq!(v[3].pos, [800.5, 599.5]);
        assert_eq!(v[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn tail_follows_the_major_axis_direction() {
        let mut batch = LineBatch::new();
        batch.push(Point::new(799, 0), Point::new(0, 599), Color::RED);
        batch.push(Point::new(3, 10), Point::new(3, 2), Color::RED);
        batch.push(Point::new(7, 7), Point::new(7, 7), Color::RED);

        let v = batch.vertices();
        assert_eq!(v[3].pos, [-0.5, 599.5]);
        assert_eq!(v[7].pos, [3.5, 1.5]);
        // A single point still lights its pixel through the tail.
        assert_eq!((v[10].pos, v[11].pos), ([7.5, 7.5], [8.5, 7.5]));
    }

    #[test]
    fn clear_empties_the_batch() {
        let mut batch = LineBatch::new();
        batch.push(Point::new(1, 2), Point::new(3, 4), Color::RED);
        batch.clear();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
        assert!(batch.vertices().is_empty());
    }

    #[test]
    fn scale_two_covers_the_whole_physical_block() {
        let mut batch = LineBatch::with_scale(2.0);
        batch.push(Point::new(3, 4), Point::new(3, 4), Color::RED);

        assert_eq!(batch.len(), 1);
        assert_eq!(
            stroke_starts(&batch),
            vec![[6.5, 8.5], [7.5, 8.5], [6.5, 9.5], [7.5, 9.5]]
        );
    }

    #[test]
    fn neighbouring_lines_stay_contiguous_at_scale_two() {
        let mut batch = LineBatch::with_scale(2.0);
        batch.push(Point::new(0, 0), Point::new(0, 10), Color::RED);
        batch.push(Point::new(1, 0), Point::new(1, 10), Color::RED);

        let mut xs: Vec<f32> = stroke_starts(&batch).iter().map(|p| p[0]).collect();
        xs.sort_by(f32::total_cmp);
        xs.dedup();
        assert_eq!(xs, vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn cross_at_scale_two_maps_into_clip_space() {
        let viewport = Viewport::new(1600.0, 1200.0);
        let mut batch = LineBatch::with_scale(2.0);
        for seg in CrossShape::new(800, 600, 5).segments() {
            batch.push(seg.from, seg.to, Color::RED);
        }

        assert_eq!(batch.len(), 20);
        for stroke in batch.vertices().chunks(4) {
            for v in &stroke[..2] {
                let [x, y] = ndc(v.pos, viewport);
                assert!((-1.0..=1.0).contains(&x) && (-1.0..=1.0).contains(&y), "{v:?}");
            }
        }

        let first = ndc(batch.vertices()[0].pos, viewport);
        assert_eq!(first, [0.5 / 800.0 - 1.0, 1.0 - 0.5 / 600.0]);
    }

    #[test]
    fn fractional_scale_stays_on_the_surface() {
        let mut batch = LineBatch::with_scale(1.5);
        batch.push(Point::new(0, 0), Point::new(799, 599), Color::RED);

        // brush of 2x2 physical pixels
        assert_eq!(batch.vertices().len(), 16);
        let end = batch.vertices()[batch.vertices().len() - 3].pos;
        assert_eq!(end, [1199.5, 899.5]);
    }

    #[test]
    fn invalid_scale_falls_back_to_one() {
        let mut batch = LineBatch::with_scale(f64::NAN);
        batch.push(Point::new(2, 2), Point::new(4, 2), Color::RED);
        assert_eq!(batch.vertices().len(), 4);
        assert_eq!(batch.vertices()[0].pos, [2.5, 2.5]);
    }

    #[test]
    fn vertex_layout_matches_struct_size() {
        assert_eq!(LineVertex::layout().array_stride, 24);
    }
}
