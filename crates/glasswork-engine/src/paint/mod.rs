//! Colors and CPU-side images consumed by the renderers.
//!
//! Colors are linear premultiplied RGBA. Images are straight-alpha sRGB
//! RGBA8; shaders premultiply after sampling.

pub mod color;
pub mod image;

pub use color::{Color, ColorParseError};
pub use image::ImageData;
