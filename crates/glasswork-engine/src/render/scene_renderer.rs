use anyhow::Result;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use glasswork_geometry::Mesh;

use crate::camera::{Camera, Light};
use crate::paint::{Color, ImageData};
use crate::scene::{DrawCmd, DrawList};

use super::common::{align_up, cover_uv_scale, uniform_binding_size, DrawUniform, FrameUniform};
use super::ctx::{PassAttachments, RenderCtx};
use super::mesh_store::{MeshId, MeshStore};
use super::pipelines::{grid::grid_lines, Layouts, Pipelines};
use super::texture_store::{
    linear_clamp_sampler, texture_bind_group, texture_bind_group_layout, TextureId, TextureStore,
};

/// Camera, light and clear color used for one scene pass.
#[derive(Debug, Copy, Clone)]
pub struct SceneView<'a> {
    pub camera: &'a Camera,
    pub light: &'a Light,
    pub clear: Color,
    /// Color the glass shows where the capture is transparent.
    pub background: Color,
}

/// Records draw lists into render passes.
///
/// Uniforms of every pass in a frame live side by side in one arena buffer,
/// so the background and foreground passes of the same submission never
/// overwrite each other. Call [`SceneRenderer::begin_frame`] once per frame.
pub struct SceneRenderer {
    layouts: Layouts,
    pipelines: Vec<Pipelines>,
    sampler: wgpu::Sampler,

    meshes: MeshStore,
    textures: TextureStore,
    grids: Vec<GridLines>,

    arena: UniformArena,

    warned_missing: bool,
    warned_no_capture: bool,
}

struct GridLines {
    size_bits: u32,
    divisions: u32,
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

enum Prepared {
    Glass(MeshId),
    Plane(TextureId),
    Grid(usize),
    Backdrop,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device) -> Self {
        let frame = uniform_layout::<FrameUniform>(device, "glasswork frame bgl");
        let draw = uniform_layout::<DrawUniform>(device, "glasswork draw bgl");
        let texture = texture_bind_group_layout(device);
        let layouts = Layouts { frame, draw, texture };

        let arena = UniformArena::new(device, &layouts, 16);

        Self {
            layouts,
            pipelines: Vec::new(),
            sampler: linear_clamp_sampler(device, "glasswork linear sampler"),
            meshes: MeshStore::new(),
            textures: TextureStore::new(),
            grids: Vec::new(),
            arena,
            warned_missing: false,
            warned_no_capture: false,
        }
    }

    /// Rewinds the uniform arena. Must run before the first pass of a frame.
    pub fn begin_frame(&mut self) {
        self.arena.cursor = 0;
    }

    pub fn upload_mesh(&mut self, device: &wgpu::Device, mesh: &Mesh) -> MeshId {
        self.meshes.upload(device, mesh)
    }

    pub fn replace_mesh(&mut self, device: &wgpu::Device, id: MeshId, mesh: &Mesh) -> MeshId {
        self.meshes.replace(device, id, mesh)
    }

    pub fn upload_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &ImageData,
    ) -> TextureId {
        self.textures.upload(device, queue, &self.layouts.texture, &self.sampler, image)
    }

    /// Bind group exposing `view` to the glass and backdrop pipelines.
    pub fn capture_bind_group(&self, device: &wgpu::Device, view: &wgpu::TextureView) -> wgpu::BindGroup {
        texture_bind_group(device, &self.layouts.texture, view, &self.sampler, "glasswork capture bind group")
    }

    /// Records `list` into one render pass that clears `target` first.
    ///
    /// Items that need the capture are skipped when `capture` is `None`;
    /// items referring to unknown meshes or textures are skipped too.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        target: PassAttachments<'_>,
        view: SceneView<'_>,
        list: &mut DrawList,
        capture: Option<&wgpu::BindGroup>,
    ) -> Result<()> {
        let pipeline_index = self.ensure_pipelines(ctx.device, target.format);

        let frame = FrameUniform::new(
            view.camera,
            view.light,
            (target.size.width, target.size.height),
            ctx.time,
            view.background,
        );

        let mut prepared: Vec<Prepared> = Vec::with_capacity(list.len());
        let mut uniforms: Vec<DrawUniform> = Vec::with_capacity(list.len());

        for item in list.iter_in_paint_order() {
            if item.cmd.samples_capture() && capture.is_none() {
                if !self.warned_no_capture {
                    log::debug!("pass has no capture; skipping glass/backdrop items");
                    self.warned_no_capture = true;
                }
                continue;
            }

            match &item.cmd {
                DrawCmd::Glass(cmd) => {
                    if self.meshes.get(cmd.mesh).is_none() {
                        continue;
                    }
                    uniforms.push(DrawUniform::glass(cmd.transform, &cmd.binding.material));
                    prepared.push(Prepared::Glass(cmd.mesh));
                }
                DrawCmd::Plane(cmd) => {
                    let Some(texture) = self.textures.get(cmd.texture) else {
                        if !self.warned_missing {
                            log::warn!("plane refers to unknown texture {:?}", cmd.texture);
                            self.warned_missing = true;
                        }
                        continue;
                    };
                    let quad_aspect = if cmd.size.y > 0.0 { cmd.size.x / cmd.size.y } else { 1.0 };
                    let cover = cover_uv_scale(quad_aspect, texture.aspect());
                    let model = cmd.transform * Mat4::from_scale(cmd.size.extend(1.0));
                    uniforms.push(DrawUniform::plane(model, cmd.tint, cmd.zoom, cover));
                    prepared.push(Prepared::Plane(cmd.texture));
                }
                DrawCmd::Grid(cmd) => {
                    let grid = ensure_grid(&mut self.grids, ctx.device, cmd.size, cmd.divisions);
                    uniforms.push(DrawUniform::solid(cmd.transform, cmd.color));
                    prepared.push(Prepared::Grid(grid));
                }
                DrawCmd::Backdrop(cmd) => {
                    let color = Color::from_premul(0.0, 0.0, 0.0, cmd.opacity.clamp(0.0, 1.0));
                    uniforms.push(DrawUniform::solid(Mat4::IDENTITY, color));
                    prepared.push(Prepared::Backdrop);
                }
            }
        }

        let (frame_offset, draw_offsets) = self.arena.write(ctx.device, ctx.queue, &self.layouts, &frame, &uniforms);

        let pipelines = &self.pipelines[pipeline_index];

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glasswork scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(view.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, &self.arena.frame_bind_group, &[frame_offset]);

        for (item, &offset) in prepared.iter().zip(&draw_offsets) {
            rpass.set_bind_group(1, &self.arena.draw_bind_group, &[offset]);
            match *item {
                Prepared::Glass(id) => {
                    let (Some(mesh), Some(capture)) = (self.meshes.get(id), capture) else { continue };
                    rpass.set_pipeline(&pipelines.glass);
                    rpass.set_bind_group(2, capture, &[]);
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
                Prepared::Plane(id) => {
                    let Some(texture) = self.textures.get(id) else { continue };
                    rpass.set_pipeline(&pipelines.plane);
                    rpass.set_bind_group(2, &texture.bind_group, &[]);
                    rpass.draw(0..6, 0..1);
                }
                Prepared::Grid(index) => {
                    let grid = &self.grids[index];
                    rpass.set_pipeline(&pipelines.grid);
                    rpass.set_vertex_buffer(0, grid.buffer.slice(..));
                    rpass.draw(0..grid.vertex_count, 0..1);
                }
                Prepared::Backdrop => {
                    let Some(capture) = capture else { continue };
                    rpass.set_pipeline(&pipelines.backdrop);
                    rpass.set_bind_group(2, capture, &[]);
                    rpass.draw(0..3, 0..1);
                }
            }
        }

        Ok(())
    }

    fn ensure_pipelines(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) -> usize {
        if let Some(i) = self.pipelines.iter().position(|p| p.format == format) {
            return i;
        }
        self.pipelines.push(Pipelines::new(device, &self.layouts, format));
        self.pipelines.len() - 1
    }
}

fn ensure_grid(grids: &mut Vec<GridLines>, device: &wgpu::Device, size: f32, divisions: u32) -> usize {
    let size_bits = size.to_bits();
    if let Some(i) = grids.iter().position(|g| g.size_bits == size_bits && g.divisions == divisions) {
        return i;
    }

    let vertices: Vec<[f32; 3]> = grid_lines(size, divisions).iter().map(Vec3::to_array).collect();
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("glasswork grid vbo"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    grids.push(GridLines { size_bits, divisions, buffer, vertex_count: vertices.len() as u32 });
    grids.len() - 1
}

fn uniform_layout<T>(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: uniform_binding_size::<T>(),
            },
            count: None,
        }],
    })
}

// ── uniform arena ─────────────────────────────────────────────────────────

/// Growable uniform buffer holding aligned frame/draw records.
struct UniformArena {
    buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    draw_bind_group: wgpu::BindGroup,
    stride: u64,
    capacity_slots: u64,
    cursor: u64,
}

impl UniformArena {
    fn new(device: &wgpu::Device, layouts: &Layouts, slots: u64) -> Self {
        let align = device.limits().min_uniform_buffer_offset_alignment as u64;
        let record = std::mem::size_of::<DrawUniform>().max(std::mem::size_of::<FrameUniform>()) as u64;
        let stride = align_up(record, align.max(1).next_power_of_two());
        let slots = slots.max(1);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glasswork uniform arena"),
            size: stride * slots,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind = |layout: &wgpu::BindGroupLayout, size: usize, label: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &buffer,
                        offset: 0,
                        size: std::num::NonZeroU64::new(size as u64),
                    }),
                }],
            })
        };
        let frame_bind_group =
            bind(&layouts.frame, std::mem::size_of::<FrameUniform>(), "glasswork frame bind group");
        let draw_bind_group =
            bind(&layouts.draw, std::mem::size_of::<DrawUniform>(), "glasswork draw bind group");

        Self { buffer, frame_bind_group, draw_bind_group, stride, capacity_slots: slots, cursor: 0 }
    }

    /// Appends one frame record and `draws`, returning their dynamic offsets.
    fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layouts: &Layouts,
        frame: &FrameUniform,
        draws: &[DrawUniform],
    ) -> (u32, Vec<u32>) {
        let needed = 1 + draws.len() as u64;
        if self.cursor + needed > self.capacity_slots {
            // Passes already recorded keep the old buffer alive until submit.
            let slots = (self.cursor + needed).next_power_of_two().max(self.capacity_slots * 2);
            log::debug!("growing uniform arena to {slots} slots");
            let cursor = self.cursor;
            *self = Self::new(device, layouts, slots);
            self.cursor = cursor;
        }

        let stride = self.stride as usize;
        let mut bytes = vec![0u8; stride * needed as usize];
        bytes[..std::mem::size_of::<FrameUniform>()].copy_from_slice(bytemuck::bytes_of(frame));
        for (i, draw) in draws.iter().enumerate() {
            let at = stride * (i + 1);
            bytes[at..at + std::mem::size_of::<DrawUniform>()].copy_from_slice(bytemuck::bytes_of(draw));
        }

        let base = self.cursor * self.stride;
        queue.write_buffer(&self.buffer, base, &bytes);
        self.cursor += needed;

        let frame_offset = base as u32;
        let draw_offsets = (0..draws.len() as u64).map(|i| (base + self.stride * (i + 1)) as u32).collect();
        (frame_offset, draw_offsets)
    }
}
