use crate::coords::PixelSize;
use crate::device::DepthTexture;

use super::OffscreenTarget;

/// Color + depth textures the background scene is captured into.
///
/// `capture` binds the color texture for sampling; it is created together
/// with the texture so it never outlives a reallocation.
pub struct OffscreenBuffer {
    _color: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth: DepthTexture,
    pub(crate) capture: wgpu::BindGroup,
    pub(crate) format: wgpu::TextureFormat,
    size: PixelSize,
}

impl OffscreenBuffer {
    pub(crate) fn new(
        device: &wgpu::Device,
        size: PixelSize,
        format: wgpu::TextureFormat,
        make_capture: impl FnOnce(&wgpu::TextureView) -> wgpu::BindGroup,
    ) -> Self {
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glasswork capture color"),
            size: size.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = DepthTexture::new(device, size, "glasswork capture depth");
        let capture = make_capture(&color_view);

        Self { _color: color, color_view, depth, capture, format, size }
    }
}

impl OffscreenTarget for OffscreenBuffer {
    #[inline]
    fn size(&self) -> PixelSize {
        self.size
    }
}
