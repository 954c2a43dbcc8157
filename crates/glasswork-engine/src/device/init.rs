/// GPU setup for the demo window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// The glass pass samples the capture several times per fragment, so a
    /// discrete adapter is requested by default.
    pub power_preference: wgpu::PowerPreference,

    /// `true` presents with FIFO; `false` lets the backend pick a
    /// non-blocking mode.
    pub vsync: bool,

    /// Prefer an sRGB surface. Shaders write linear color and rely on the
    /// target's encoding.
    pub prefer_srgb: bool,

    /// Capture buffers larger than `max_texture_dimension_2d` are refused.
    pub required_limits: wgpu::Limits,

    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            vsync: true,
            prefer_srgb: true,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync { wgpu::PresentMode::Fifo } else { wgpu::PresentMode::AutoNoVsync }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_fifo() {
        let mut init = GpuInit::default();
        assert_eq!(init.present_mode(), wgpu::PresentMode::Fifo);
        init.vsync = false;
        assert_eq!(init.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
