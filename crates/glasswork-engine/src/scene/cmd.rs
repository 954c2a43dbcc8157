use glam::{Mat4, Vec2};

use crate::composite::GlassBinding;
use crate::paint::Color;
use crate::render::{MeshId, TextureId};

/// Renderer-agnostic draw command stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Glass(GlassCmd),
    Plane(PlaneCmd),
    Grid(GridCmd),
    Backdrop(BackdropCmd),
}

impl DrawCmd {
    /// True for commands that read the offscreen capture.
    pub fn samples_capture(&self) -> bool {
        matches!(self, DrawCmd::Glass(_) | DrawCmd::Backdrop(_))
    }
}

/// Refractive mesh sampling the captured background.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassCmd {
    pub mesh: MeshId,
    pub transform: Mat4,
    pub binding: GlassBinding,
}

/// Textured unit quad centered on the origin, scaled to `size` then placed
/// by `transform`. The texture covers the quad (cropped, aspect kept) and
/// `zoom > 1` magnifies it around the center.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneCmd {
    pub texture: TextureId,
    pub transform: Mat4,
    pub size: Vec2,
    pub zoom: f32,
    pub tint: Color,
}

/// Square line grid in the local XY plane.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCmd {
    pub transform: Mat4,
    pub size: f32,
    pub divisions: u32,
    pub color: Color,
}

/// Screen-filling quad showing the capture un-refracted. Never writes depth.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropCmd {
    pub opacity: f32,
}
