//! Damped page scrolling driven by the mouse wheel.

/// Offset change per wheel line.
const LINE_STEP: f32 = 0.05;

/// Scroll position over `pages` screens, as a fraction in `[0, 1]`.
///
/// The wheel moves `target`; `offset` eases towards it every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scroll {
    pub pages: f32,
    /// Time constant of the easing in seconds.
    pub damping: f32,
    target: f32,
    offset: f32,
}

impl Default for Scroll {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Scroll {
    pub fn new(pages: f32) -> Self {
        Self { pages: pages.max(1.0), damping: 0.25, target: 0.0, offset: 0.0 }
    }

    /// Positive lines scroll back towards the top.
    pub fn scroll_lines(&mut self, lines: f32) {
        if lines.is_finite() {
            self.target = (self.target - lines * LINE_STEP).clamp(0.0, 1.0);
        }
    }

    pub fn update(&mut self, dt: f32) {
        let k = 1.0 - (-dt.max(0.0) / self.damping.max(1e-3)).exp();
        self.offset += (self.target - self.offset) * k;
        if (self.target - self.offset).abs() < 1e-5 {
            self.offset = self.target;
        }
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Progress of the offset through `[from, from + distance]`, in `[0, 1]`.
    pub fn range(&self, from: f32, distance: f32) -> f32 {
        if distance <= 0.0 {
            return if self.offset >= from { 1.0 } else { 0.0 };
        }
        ((self.offset - from) / distance).clamp(0.0, 1.0)
    }

    /// World-space lift of the scrolled content for a viewport `height`.
    #[inline]
    pub fn shift(&self, height: f32) -> f32 {
        self.offset * (self.pages - 1.0) * height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settled(lines: f32) -> Scroll {
        let mut s = Scroll::default();
        s.scroll_lines(lines);
        for _ in 0..200 {
            s.update(1.0 / 60.0);
        }
        s
    }

    #[test]
    fn offset_eases_towards_target() {
        let mut s = Scroll::default();
        s.scroll_lines(-4.0);
        assert_relative_eq!(s.target(), 0.2, epsilon = 1e-6);

        s.update(1.0 / 60.0);
        assert!(s.offset() > 0.0 && s.offset() < 0.2);

        let s = settled(-4.0);
        assert_relative_eq!(s.offset(), 0.2, epsilon = 1e-5);
    }

    #[test]
    fn target_stays_in_unit_range() {
        let mut s = Scroll::default();
        s.scroll_lines(10.0);
        assert_eq!(s.target(), 0.0);
        s.scroll_lines(-1000.0);
        assert_eq!(s.target(), 1.0);
        s.scroll_lines(f32::NAN);
        assert_eq!(s.target(), 1.0);
    }

    #[test]
    fn range_maps_window_to_unit() {
        let s = settled(-10.0); // offset 0.5
        assert_relative_eq!(s.range(0.0, 1.0 / 3.0), 1.0);
        assert_relative_eq!(s.range(1.15 / 3.0, 1.0 / 3.0), (0.5 - 1.15 / 3.0) * 3.0, epsilon = 1e-4);
        assert_eq!(s.range(0.9, 0.1), 0.0);
    }

    #[test]
    fn two_pages_shift_one_screen_at_the_end() {
        let s = settled(-100.0);
        assert_relative_eq!(s.shift(4.0), 4.0, epsilon = 1e-4);
    }
}
