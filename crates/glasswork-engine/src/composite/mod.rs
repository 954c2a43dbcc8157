//! Dual-scene composition.
//!
//! Each frame the background scene is rendered into an offscreen buffer
//! (capture), then the foreground scene is rendered into the primary target
//! with the glass material and the backdrop quad sampling that buffer
//! (composite).
//!
//! The compositor itself is GPU-agnostic: it drives a [`CompositeBackend`],
//! implemented for wgpu by [`WgpuBackend`].

mod backend;
mod buffer;
mod compositor;
mod wgpu_backend;

pub use backend::{CompositeBackend, OffscreenTarget, PassTarget};
pub use buffer::OffscreenBuffer;
pub use compositor::{CompositorConfig, DualSceneCompositor, FrameReport, GlassBinding};
pub use wgpu_backend::WgpuBackend;
