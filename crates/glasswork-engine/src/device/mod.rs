//! GPU device, swapchain and depth attachments.
//!
//! [`Gpu`] owns the wgpu device and the window surface. Every pass of a
//! frame records into the single encoder of a [`GpuFrame`]; the 3D passes
//! share [`DEPTH_FORMAT`].

mod depth;
mod gpu;
mod init;
mod surface;

pub use depth::{DepthTexture, DEPTH_FORMAT};
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
