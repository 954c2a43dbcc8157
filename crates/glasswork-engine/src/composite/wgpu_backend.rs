use anyhow::Result;

use crate::coords::PixelSize;
use crate::device::DepthTexture;
use crate::render::{PassAttachments, RenderCtx, RenderTarget, SceneRenderer, SceneView};
use crate::scene::DrawList;

use super::{CompositeBackend, OffscreenBuffer, OffscreenTarget, PassTarget};

/// [`CompositeBackend`] recording into one frame's command encoder.
///
/// Built once per frame inside [`FrameCtx::render`](crate::core::FrameCtx::render);
/// construction rewinds the renderer's uniform arena.
pub struct WgpuBackend<'f> {
    ctx: &'f RenderCtx<'f>,
    encoder: &'f mut wgpu::CommandEncoder,
    primary_view: &'f wgpu::TextureView,
    primary_size: PixelSize,
    renderer: &'f mut SceneRenderer,
    primary_depth: &'f mut DepthTexture,
    offscreen_format: wgpu::TextureFormat,
}

impl<'f> WgpuBackend<'f> {
    /// `offscreen_format` defaults to the surface format so the backdrop
    /// quad reproduces the capture exactly.
    pub fn new(
        ctx: &'f RenderCtx<'f>,
        target: &'f mut RenderTarget<'_>,
        renderer: &'f mut SceneRenderer,
        primary_depth: &'f mut DepthTexture,
        offscreen_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        renderer.begin_frame();
        Self {
            ctx,
            encoder: &mut *target.encoder,
            primary_view: target.color_view,
            primary_size: target.size,
            renderer,
            primary_depth,
            offscreen_format: offscreen_format.unwrap_or(ctx.surface_format),
        }
    }
}

impl CompositeBackend for WgpuBackend<'_> {
    type Buffer = OffscreenBuffer;

    fn allocate_buffer(&mut self, size: PixelSize) -> Result<OffscreenBuffer> {
        let max = self.ctx.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            !size.is_empty() && size.width <= max && size.height <= max,
            "capture size {}x{} outside device limit {max}",
            size.width,
            size.height
        );

        let device = self.ctx.device;
        let renderer = &*self.renderer;
        Ok(OffscreenBuffer::new(device, size, self.offscreen_format, |view| {
            renderer.capture_bind_group(device, view)
        }))
    }

    fn render_scene(
        &mut self,
        target: PassTarget<'_, OffscreenBuffer>,
        scene: &mut DrawList,
        view: SceneView<'_>,
        capture: Option<&OffscreenBuffer>,
    ) -> Result<()> {
        let capture = capture.map(|b| &b.capture);

        match target {
            PassTarget::Offscreen(buffer) => {
                let attachments = PassAttachments {
                    color: &buffer.color_view,
                    depth: buffer.depth.view(),
                    format: buffer.format,
                    size: buffer.size(),
                };
                self.renderer.render(self.ctx, self.encoder, attachments, view, scene, capture)
            }
            PassTarget::Primary => {
                let size = self.primary_size;
                self.primary_depth.ensure_size(self.ctx.device, size, "glasswork primary depth");
                let attachments = PassAttachments {
                    color: self.primary_view,
                    depth: self.primary_depth.view(),
                    format: self.ctx.surface_format,
                    size,
                };
                self.renderer.render(self.ctx, self.encoder, attachments, view, scene, capture)
            }
        }
    }
}
