use glam::{Mat4, Vec3};

use glasswork_engine::camera::Camera;
use glasswork_engine::composite::{CompositorConfig, DualSceneCompositor, OffscreenBuffer, WgpuBackend};
use glasswork_engine::coords::PixelSize;
use glasswork_engine::core::{App, AppControl, FrameCtx};
use glasswork_engine::device::DepthTexture;
use glasswork_engine::paint::{Color, ImageData};
use glasswork_engine::render::{MeshId, SceneRenderer, TextureId};
use glasswork_engine::scene::{DrawCmd, DrawList, GlassCmd, GridCmd, PlaneCmd, RenderOrder};
use glasswork_engine::text::{rasterize_caption, CaptionStyle, FontId, FontSystem};
use glasswork_geometry::{extrude_shapes, ExtrusionParams, Mesh, NormalizeCache, PathSet, DEFAULT_TARGET_SIZE};

use crate::content::{caption_size, picture_layout, procedural_picture, Breakpoint, CAPTION_Z, PICTURE_COUNT};
use crate::controls::{apply_keys, scroll_lines, title};
use crate::params::Params;
use crate::scroll::Scroll;

const GRID_Z: f32 = -50.0;

/// Grid sized for the camera-to-grid distance, relative to a 21-unit
/// reference distance.
fn grid_cmd(camera: &Camera) -> GridCmd {
    let s = (camera.position.z - GRID_Z) / 21.0;
    GridCmd {
        transform: Mat4::from_translation(Vec3::new(0.0, 0.0, GRID_Z)),
        size: 100.0 * s,
        divisions: (400.0 * s) as u32,
        color: Color::from_srgb_u8(0x33, 0x33, 0x33, 0xff),
    }
}

#[derive(Debug, Copy, Clone)]
struct Caption {
    texture: TextureId,
    aspect: f32,
    line_px: f32,
    height_px: f32,
}

/// Handles of the uploaded scene content.
#[derive(Debug, Copy, Clone)]
struct SceneIds {
    shape: MeshId,
    pictures: [TextureId; PICTURE_COUNT],
    caption: Option<Caption>,
}

/// GPU-side resources, created on the first frame.
struct GpuResources {
    renderer: SceneRenderer,
    depth: DepthTexture,
    ids: SceneIds,
}

/// Whether the solid must be re-extruded: the normalization was recomputed,
/// or the extrusion settings differ from the last build.
fn needs_rebuild(recomputed: bool, built: Option<&ExtrusionParams>, extrusion: &ExtrusionParams) -> bool {
    recomputed || built != Some(extrusion)
}

/// The glass demo: an extruded SVG solid over a scrolling background.
pub struct GlassApp {
    params: Params,
    shape_source: PathSet,
    normalize: NormalizeCache,
    /// Extrusion the current mesh was built with.
    built: Option<ExtrusionParams>,

    scroll: Scroll,
    rotation: f32,
    titled: bool,
    camera: Camera,

    compositor: DualSceneCompositor<OffscreenBuffer>,
    fonts: FontSystem,
    font: Option<FontId>,
    gpu: Option<GpuResources>,
}

impl GlassApp {
    /// The caption uses the first readable font in `font_paths`; without one
    /// it is left out.
    pub fn new(params: Params, shape_source: PathSet, font_paths: &[&str]) -> Self {
        let mut fonts = FontSystem::new();
        let font = fonts.load_first_available(font_paths);
        if font.is_none() {
            log::warn!("no usable font found; caption disabled");
        }

        Self {
            params,
            shape_source,
            normalize: NormalizeCache::new(),
            built: None,
            scroll: Scroll::default(),
            rotation: 0.0,
            titled: false,
            camera: Camera::default(),
            compositor: DualSceneCompositor::new(CompositorConfig::default(), PixelSize::default()),
            fonts,
            font,
            gpu: None,
        }
    }

    fn init_gpu(&self, device: &wgpu::Device, queue: &wgpu::Queue, size: PixelSize) -> GpuResources {
        let mut renderer = SceneRenderer::new(device);
        let depth = DepthTexture::new(device, size, "glasswork primary depth");
        let shape = renderer.upload_mesh(device, &Mesh::new());

        let pictures = std::array::from_fn(|i| {
            let image = self.load_picture(i);
            renderer.upload_texture(device, queue, &image)
        });

        let caption = self.font.and_then(|font| {
            let style = CaptionStyle::default();
            let image = rasterize_caption(&self.fonts, font, &self.params.background.caption, &style)?;
            let line_px = style.px;
            let height_px = image.height as f32;
            let aspect = image.aspect();
            Some(Caption { texture: renderer.upload_texture(device, queue, &image), aspect, line_px, height_px })
        });

        log::info!("uploaded {} pictures, caption {}", PICTURE_COUNT, caption.is_some());
        GpuResources { renderer, depth, ids: SceneIds { shape, pictures, caption } }
    }

    fn load_picture(&self, index: usize) -> ImageData {
        match self.params.background.images.get(index) {
            Some(path) => ImageData::load(path).unwrap_or_else(|err| {
                log::warn!("{err:#}; using a generated picture");
                procedural_picture(index)
            }),
            None => procedural_picture(index),
        }
    }

    /// Records both scenes for this frame.
    fn record(&mut self, ids: &SceneIds, logical_width: f32) {
        self.compositor.begin_frame();

        if self.params.background.show_demo_elements {
            let height = self.camera.visible_extent_at(0.0).1;
            record_background(
                self.compositor.background_mut(),
                ids,
                &self.scroll,
                height,
                Breakpoint::from_width(logical_width),
            );
        }

        let (norm, _) = self.normalize.get_or_compute(
            &self.shape_source,
            self.params.geometry.roundness,
            DEFAULT_TARGET_SIZE,
        );
        let transform = Mat4::from_rotation_y(self.rotation) * norm.outer_transform(self.params.geometry.scale);

        let binding = self.compositor.glass_binding(self.params.material());
        let foreground = self.compositor.foreground_mut();
        foreground.push(RenderOrder::GRID, DrawCmd::Grid(grid_cmd(&self.camera)));
        foreground.push(binding.order, DrawCmd::Glass(GlassCmd { mesh: ids.shape, transform, binding }));
    }

    /// Follows the surface size; the capture is never sized from anything
    /// else, so scale-factor changes are covered as well as resizes.
    fn sync_viewport(&mut self, surface: PixelSize) {
        self.compositor.resize(surface);
    }

    /// The solid's new mesh, when the normalization or extrusion inputs
    /// changed since the last build.
    fn shape_update(&mut self) -> Option<Mesh> {
        let extrusion = self.params.extrusion();
        let (result, recomputed) = self.normalize.get_or_compute(
            &self.shape_source,
            self.params.geometry.roundness,
            DEFAULT_TARGET_SIZE,
        );
        if !needs_rebuild(recomputed, self.built.as_ref(), &extrusion) {
            return None;
        }

        let mesh = extrude_shapes(result.shapes.iter().map(|s| &s.shape), &extrusion);
        log::debug!(
            "rebuilt solid: {} shapes, {} triangles, scale {:.5}",
            result.shapes.len(),
            mesh.triangle_count(),
            result.scale_factor
        );
        self.built = Some(extrusion);
        Some(mesh)
    }

    fn rebuild_shape(&mut self, device: &wgpu::Device) {
        if self.gpu.is_none() {
            return;
        }
        let Some(mesh) = self.shape_update() else {
            return;
        };
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.ids.shape = gpu.renderer.replace_mesh(device, gpu.ids.shape, &mesh);
        }
    }
}

fn record_background(
    list: &mut DrawList,
    ids: &SceneIds,
    scroll: &Scroll,
    height: f32,
    breakpoint: Breakpoint,
) {
    let shift = scroll.shift(height);

    for placement in picture_layout(height) {
        let Some(&texture) = ids.pictures.get(placement.picture) else {
            continue;
        };
        list.push(
            RenderOrder::SHAPE,
            DrawCmd::Plane(PlaneCmd {
                texture,
                transform: placement.transform(shift),
                size: placement.size,
                zoom: placement.zoom.zoom(scroll),
                tint: Color::WHITE,
            }),
        );
    }

    if let Some(caption) = &ids.caption {
        let size = caption_size(breakpoint.font_size(), caption.aspect, caption.line_px, caption.height_px);
        list.push(
            RenderOrder::SHAPE,
            DrawCmd::Plane(PlaneCmd {
                texture: caption.texture,
                transform: Mat4::from_translation(Vec3::new(0.0, shift, CAPTION_Z)),
                size,
                zoom: 1.0,
                tint: Color::WHITE,
            }),
        );
    }
}

impl App for GlassApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let dt = ctx.time.dt;

        let controls = apply_keys(&mut self.params, ctx.input_frame);
        if controls.exit {
            return AppControl::Exit;
        }
        if controls.geometry || controls.material || !self.titled {
            ctx.runtime.set_title(title(&self.params));
            self.titled = true;
        }

        self.scroll.scroll_lines(scroll_lines(ctx.input_frame));
        self.scroll.update(dt);
        self.rotation += dt / 4.0;

        let viewport = ctx.window.viewport();
        self.camera.set_aspect(viewport.aspect());

        let size = ctx.gpu.size();
        self.sync_viewport(size);
        if self.gpu.is_none() {
            let gpu = self.init_gpu(ctx.gpu.device(), ctx.gpu.queue(), size);
            self.gpu = Some(gpu);
        }
        self.rebuild_shape(ctx.gpu.device());

        let Some(ids) = self.gpu.as_ref().map(|gpu| gpu.ids) else {
            return AppControl::Continue;
        };
        self.record(&ids, viewport.width);

        let Some(gpu) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };
        let (compositor, camera) = (&mut self.compositor, &self.camera);

        ctx.render(|rctx, target| {
            let mut backend = WgpuBackend::new(rctx, target, &mut gpu.renderer, &mut gpu.depth, None);
            compositor.render_frame(&mut backend, camera)?;
            Ok(())
        })
    }
}
