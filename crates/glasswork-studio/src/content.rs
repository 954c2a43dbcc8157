//! Background content: five pictures and one caption, laid out in world
//! units relative to the visible viewport height.

use glam::{Mat4, Vec2, Vec3};

use glasswork_engine::paint::ImageData;

use crate::scroll::Scroll;

/// Number of distinct pictures the layout refers to.
pub const PICTURE_COUNT: usize = 3;

/// Caption depth; in front of every picture.
pub const CAPTION_Z: f32 = 12.0;

/// Size tier picked from the logical window width.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub fn from_width(logical_width: f32) -> Self {
        if logical_width <= 639.0 {
            Self::Mobile
        } else if logical_width <= 1023.0 {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Caption height in world units.
    pub const fn font_size(self) -> f32 {
        match self {
            Self::Mobile => 0.2,
            Self::Tablet => 0.4,
            Self::Desktop => 0.6,
        }
    }
}

/// How a plane's zoom follows the scroll offset.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ZoomCurve {
    /// `1 + range(0, 1/3) / 3`
    FirstPage,
    /// `1 + range(1.15/3, 1/3) / 2`
    SecondPage,
}

impl ZoomCurve {
    pub fn zoom(self, scroll: &Scroll) -> f32 {
        match self {
            Self::FirstPage => 1.0 + scroll.range(0.0, 1.0 / 3.0) / 3.0,
            Self::SecondPage => 1.0 + scroll.range(1.15 / 3.0, 1.0 / 3.0) / 2.0,
        }
    }
}

/// One picture plane before scrolling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PicturePlacement {
    pub picture: usize,
    pub position: Vec3,
    pub size: Vec2,
    pub zoom: ZoomCurve,
}

impl PicturePlacement {
    /// Plane transform with the content lifted by `shift`.
    pub fn transform(&self, shift: f32) -> Mat4 {
        Mat4::from_translation(self.position + Vec3::Y * shift)
    }
}

/// Picture planes for a viewport `height` world units tall. The second
/// screen sits one viewport below the first.
pub fn picture_layout(height: f32) -> [PicturePlacement; 5] {
    let p = |picture, position: Vec3, size: Vec2, zoom| PicturePlacement { picture, position, size, zoom };
    [
        p(0, Vec3::new(-2.0, 0.0, 0.0), Vec2::new(3.0, height / 1.1), ZoomCurve::FirstPage),
        p(1, Vec3::new(2.0, 0.0, 3.0), Vec2::splat(3.0), ZoomCurve::FirstPage),
        p(2, Vec3::new(-2.05, -height, 6.0), Vec2::new(1.0, 3.0), ZoomCurve::SecondPage),
        p(0, Vec3::new(-0.6, -height, 9.0), Vec2::new(1.0, 2.0), ZoomCurve::SecondPage),
        p(1, Vec3::new(0.75, -height, 10.5), Vec2::splat(1.5), ZoomCurve::SecondPage),
    ]
}

/// Caption plane size for a bitmap of `aspect` (width / height) whose
/// glyph line is `line_px` of its `height_px`.
pub fn caption_size(font_size: f32, aspect: f32, line_px: f32, height_px: f32) -> Vec2 {
    let height = if line_px > 0.0 { font_size * height_px / line_px } else { font_size };
    Vec2::new(height * aspect.max(0.0), height)
}

// ── procedural pictures ───────────────────────────────────────────────────

/// Stand-in pictures used when no files are configured.
pub fn procedural_picture(index: usize) -> ImageData {
    match index % PICTURE_COUNT {
        0 => ImageData::from_fn(384, 512, |x, y| {
            let t = y as f32 / 511.0;
            let band = if (x / 48 + y / 64) % 2 == 0 { 1.0 } else { 0.85 };
            rgb(lerp(40.0, 120.0, t) * band, lerp(70.0, 40.0, t) * band, lerp(160.0, 220.0, t) * band)
        }),
        1 => ImageData::from_fn(512, 512, |x, y| {
            let d = Vec2::new(x as f32 - 256.0, y as f32 - 200.0).length() / 360.0;
            let t = d.clamp(0.0, 1.0);
            rgb(lerp(255.0, 120.0, t), lerp(190.0, 50.0, t), lerp(90.0, 60.0, t))
        }),
        _ => ImageData::from_fn(256, 768, |x, y| {
            let stripe = ((y as f32 / 24.0).sin() * 0.5 + 0.5) * 0.6 + 0.4;
            let edge = 1.0 - (x as f32 / 255.0 - 0.5).abs();
            rgb(30.0 * edge, 180.0 * stripe * edge, 150.0 * stripe)
        }),
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn rgb(r: f32, g: f32, b: f32) -> [u8; 4] {
    [r.clamp(0.0, 255.0) as u8, g.clamp(0.0, 255.0) as u8, b.clamp(0.0, 255.0) as u8, 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn breakpoints_follow_width_tiers() {
        assert_eq!(Breakpoint::from_width(320.0), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(639.0), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(640.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1023.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Desktop);
        assert_eq!(Breakpoint::Desktop.font_size(), 0.6);
    }

    #[test]
    fn second_screen_sits_one_viewport_down() {
        let layout = picture_layout(5.0);
        assert_eq!(layout[0].size, Vec2::new(3.0, 5.0 / 1.1));
        assert!(layout[..2].iter().all(|p| p.position.y == 0.0 && p.zoom == ZoomCurve::FirstPage));
        assert!(layout[2..].iter().all(|p| p.position.y == -5.0 && p.zoom == ZoomCurve::SecondPage));
        // Depth increases towards the camera.
        assert!(layout.windows(2).all(|w| w[0].position.z < w[1].position.z));
    }

    #[test]
    fn zoom_curves_at_rest_and_fully_scrolled() {
        let rest = Scroll::default();
        assert_eq!(ZoomCurve::FirstPage.zoom(&rest), 1.0);
        assert_eq!(ZoomCurve::SecondPage.zoom(&rest), 1.0);

        let mut end = Scroll::default();
        end.scroll_lines(-100.0);
        for _ in 0..300 {
            end.update(1.0 / 60.0);
        }
        assert_relative_eq!(ZoomCurve::FirstPage.zoom(&end), 1.0 + 1.0 / 3.0, epsilon = 1e-5);
        assert_relative_eq!(ZoomCurve::SecondPage.zoom(&end), 1.5, epsilon = 1e-5);
    }

    #[test]
    fn scrolled_transform_lifts_planes() {
        let p = picture_layout(4.0)[2];
        let m = p.transform(4.0);
        assert_relative_eq!(m.w_axis.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(m.w_axis.z, 6.0, epsilon = 1e-6);
    }

    #[test]
    fn caption_plane_keeps_bitmap_aspect() {
        let size = caption_size(0.6, 4.0, 128.0, 160.0);
        assert_relative_eq!(size.y, 0.75, epsilon = 1e-6);
        assert_relative_eq!(size.x, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn procedural_pictures_are_opaque() {
        for i in 0..PICTURE_COUNT {
            let img = procedural_picture(i);
            assert!(img.width > 0 && img.height > 0);
            assert!(img.pixels.chunks_exact(4).all(|px| px[3] == 255));
        }
    }
}
