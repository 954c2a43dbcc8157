//! Size types shared by the window loop, renderers and compositor.
//!
//! Two spaces are in play:
//! - logical pixels (DPI-aware), used for layout breakpoints
//! - physical pixels, used for every GPU allocation

mod pixel_size;
mod viewport;

pub use pixel_size::PixelSize;
pub use viewport::Viewport;
