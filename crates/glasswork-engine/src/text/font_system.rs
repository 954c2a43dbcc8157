use std::fmt;

use glam::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the fonts captions are rasterized with. Fonts are immutable after
/// loading.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        if bytes.is_empty() {
            return Err(FontLoadError("empty font data".into()));
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Tries each path in order and loads the first readable font.
    pub fn load_first_available<P: AsRef<std::path::Path>>(&mut self, paths: &[P]) -> Option<FontId> {
        paths.iter().find_map(|p| {
            let bytes = std::fs::read(p.as_ref()).ok()?;
            match self.load_font(&bytes) {
                Ok(id) => {
                    log::debug!("loaded font {}", p.as_ref().display());
                    Some(id)
                }
                Err(err) => {
                    log::warn!("{}: {err}", p.as_ref().display());
                    None
                }
            }
        })
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Bounding box `(width, height)` in pixels of `text` laid out on one
    /// line at `px` pixels per em.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, px: f32) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, px * 1.2);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, px * 1.2);
        }

        // Advance extent rather than bitmap edge, so trailing spaces count.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, px);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = layout.height().max(px);
        Vec2::new(w, h)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(&[]).is_err());
        assert!(fs.load_font(b"definitely not a font").is_err());
        assert!(fs.is_empty());
    }

    #[test]
    fn unknown_font_measures_one_empty_line() {
        let fs = FontSystem::new();
        let size = fs.measure_text("glass", FontId(3), 10.0);
        assert_eq!(size, Vec2::new(0.0, 12.0));
    }

    #[test]
    fn missing_files_load_nothing() {
        let mut fs = FontSystem::new();
        assert!(fs.load_first_available(&["/nonexistent/a.ttf", "/nonexistent/b.otf"]).is_none());
    }
}
