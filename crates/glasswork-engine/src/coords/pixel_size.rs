use winit::dpi::PhysicalSize;

/// Size of a GPU texture or surface in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero (minimized windows).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps both sides to `[1, max]` so the size is always allocatable.
    #[inline]
    pub fn clamped(self, max: u32) -> Self {
        Self::new(self.width.clamp(1, max.max(1)), self.height.clamp(1, max.max(1)))
    }

    #[inline]
    pub fn extent(self) -> wgpu::Extent3d {
        wgpu::Extent3d { width: self.width, height: self.height, depth_or_array_layers: 1 }
    }
}

impl From<PhysicalSize<u32>> for PixelSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_never_returns_zero() {
        assert_eq!(PixelSize::new(0, 0).clamped(4096), PixelSize::new(1, 1));
        assert_eq!(PixelSize::new(9000, 20).clamped(8192), PixelSize::new(8192, 20));
    }

    #[test]
    fn empty_when_any_side_is_zero() {
        assert!(PixelSize::new(0, 10).is_empty());
        assert!(!PixelSize::new(1, 1).is_empty());
    }
}
