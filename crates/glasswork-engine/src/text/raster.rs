use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::paint::ImageData;

use super::{FontId, FontSystem};

/// How a caption is rasterized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CaptionStyle {
    /// Pixels per em of the bitmap. World size is set by the plane, so this
    /// only controls sharpness.
    pub px: f32,
    /// sRGB fill color; coverage becomes alpha.
    pub color: [u8; 3],
    /// Transparent border in pixels, keeps filtering from clipping glyphs.
    pub padding: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self { px: 128.0, color: [255, 255, 255], padding: 4 }
    }
}

/// Rasterizes one line of `text` into a straight-alpha RGBA image.
///
/// Returns `None` for an unknown font or text without visible glyphs.
pub fn rasterize_caption(
    fonts: &FontSystem,
    font: FontId,
    text: &str,
    style: &CaptionStyle,
) -> Option<ImageData> {
    let face = fonts.get(font)?;
    let px = style.px.max(1.0);

    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[face], &TextStyle::new(text, px, 0));

    let extent = fonts.measure_text(text, font, px);
    if extent.x <= 0.0 {
        return None;
    }

    let pad = style.padding;
    let width = extent.x.ceil() as u32 + pad * 2;
    let height = extent.y.ceil() as u32 + pad * 2;
    let mut coverage = vec![0u8; width as usize * height as usize];

    for glyph in layout.glyphs() {
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (metrics, bitmap) = face.rasterize_config(glyph.key);
        let ox = glyph.x.round() as i64 + pad as i64;
        let oy = glyph.y.round() as i64 + pad as i64;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let x = ox + col as i64;
                let y = oy + row as i64;
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    continue;
                }
                let dst = &mut coverage[y as usize * width as usize + x as usize];
                *dst = (*dst).max(bitmap[row * metrics.width + col]);
            }
        }
    }

    let [r, g, b] = style.color;
    Some(ImageData::from_fn(width, height, |x, y| {
        [r, g, b, coverage[y as usize * width as usize + x as usize]]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_font_rasterizes_nothing() {
        let fonts = FontSystem::new();
        assert!(rasterize_caption(&fonts, FontId(0), "glass", &CaptionStyle::default()).is_none());
    }

    #[test]
    fn default_style_is_white() {
        let style = CaptionStyle::default();
        assert_eq!(style.color, [255, 255, 255]);
        assert!(style.px > 0.0);
    }
}
