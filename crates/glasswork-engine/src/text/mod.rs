//! Font loading and caption rasterization.
//!
//! Captions are rasterized once on the CPU into an [`ImageData`](crate::paint::ImageData)
//! and drawn as textured planes, so text lives in the 3D scene like any other
//! picture.

mod font_system;
mod raster;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub use raster::{rasterize_caption, CaptionStyle};
