//! GPU rendering subsystem.
//!
//! [`SceneRenderer`] consumes a [`DrawList`](crate::scene::DrawList) and
//! records one render pass into a color + depth target. It owns every GPU
//! resource the draw commands refer to (meshes, textures, pipelines).
//!
//! Convention: world space is right-handed, +Y up, camera looks down -Z.

mod common;
mod ctx;
mod material;
mod mesh_store;
mod pipelines;
mod scene_renderer;
mod texture_store;

pub use ctx::{PassAttachments, RenderCtx, RenderTarget};
pub use material::{GlassMaterial, RefractionQuality};
pub use mesh_store::MeshId;
pub use scene_renderer::{SceneRenderer, SceneView};
pub use texture_store::TextureId;
