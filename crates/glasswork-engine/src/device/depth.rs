use crate::coords::PixelSize;

/// Depth format used by every 3D pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth attachment that follows a color target's size.
pub struct DepthTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: PixelSize,
}

impl DepthTexture {
    pub fn new(device: &wgpu::Device, size: PixelSize, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: size.clamped(device.limits().max_texture_dimension_2d).extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { _texture: texture, view, size }
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Recreates the texture when `size` differs from the current one.
    pub fn ensure_size(&mut self, device: &wgpu::Device, size: PixelSize, label: &str) {
        if self.size != size {
            *self = Self::new(device, size, label);
        }
    }
}
