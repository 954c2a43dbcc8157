use std::path::Path;

use anyhow::{Context, Result};

/// Straight-alpha sRGB RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Wraps raw pixels; `pixels.len()` must be `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            pixels.len() == expected,
            "image {width}x{height} needs {expected} bytes, got {}",
            pixels.len()
        );
        Ok(Self { width, height, pixels })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self { width, height, pixels }
    }

    /// Decodes any format enabled on the `image` crate.
    pub fn load(path: &Path) -> Result<Self> {
        let img = ::image::open(path)
            .with_context(|| format!("failed to decode image {}", path.display()))?
            .into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self { width, height, pixels: img.into_raw() })
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 { 1.0 } else { self.width as f32 / self.height as f32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_length() {
        assert!(ImageData::new(2, 2, vec![0; 16]).is_ok());
        assert!(ImageData::new(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn from_fn_is_row_major() {
        let img = ImageData::from_fn(2, 1, |x, _| [x as u8, 0, 0, 255]);
        assert_eq!(img.pixels, vec![0, 0, 0, 255, 1, 0, 0, 255]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ImageData::load(Path::new("/nonexistent/image.png")).is_err());
    }
}
