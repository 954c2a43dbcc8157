use super::PixelSize;

/// Drawable area of a window.
///
/// `width`/`height` are logical pixels; `scale_factor` maps them to the
/// physical surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, scale_factor: 1.0 }
    }
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        Self { width, height, scale_factor }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; `1.0` for degenerate sizes.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Physical pixel size of the surface backing this viewport.
    pub fn physical(self) -> PixelSize {
        let s = self.scale_factor.max(0.01);
        PixelSize::new(
            (self.width * s).round().max(0.0) as u32,
            (self.height * s).round().max(0.0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_applies_scale_factor() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.physical(), PixelSize::new(1600, 1200));
    }

    #[test]
    fn degenerate_aspect_is_one() {
        assert_eq!(Viewport::new(0.0, 600.0, 1.0).aspect(), 1.0);
        assert_eq!(Viewport::new(1200.0, 600.0, 1.0).aspect(), 2.0);
    }
}
