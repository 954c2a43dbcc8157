//! Shared GPU types and helpers used by every pipeline.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::{Camera, Light};
use crate::paint::Color;

use super::material::GlassMaterial;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── per-pass uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// xyz: direction towards the light, w: intensity.
    pub light: [f32; 4],
    /// x, y: target size in physical pixels, z: elapsed seconds.
    pub viewport: [f32; 4],
    /// Premultiplied color behind the capture (the primary clear color).
    pub background: [f32; 4],
}

impl FrameUniform {
    pub(super) fn new(
        camera: &Camera,
        light: &Light,
        target_size: (u32, u32),
        time: f32,
        background: Color,
    ) -> Self {
        let pos = camera.position;
        let dir = light.direction.normalize_or_zero();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: [pos.x, pos.y, pos.z, 1.0],
            light: [dir.x, dir.y, dir.z, light.intensity],
            viewport: [target_size.0.max(1) as f32, target_size.1.max(1) as f32, time, 0.0],
            background: background.to_array(),
        }
    }
}

// ── per-draw uniform ──────────────────────────────────────────────────────

/// One record per draw item, addressed with a dynamic offset. The meaning
/// of `color`/`extra` depends on the pipeline:
///
/// ```text
/// glass     color = tint, attenuation = rgb + distance, glass_* = material
/// plane     color = tint, extra = (zoom, cover.x, cover.y, _)
/// grid      color = line color
/// backdrop  color.a = opacity
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub attenuation: [f32; 4],
    /// thickness, ior, chromatic aberration, distortion
    pub glass_a: [f32; 4],
    /// distortion scale, temporal distortion, clearcoat, roughness
    pub glass_b: [f32; 4],
    /// anisotropy, hdr intensity, sample count, _
    pub glass_c: [f32; 4],
    pub extra: [f32; 4],
}

impl DrawUniform {
    pub(super) fn with_model(model: Mat4) -> Self {
        let normal = model.inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: if normal.is_finite() {
                normal.to_cols_array_2d()
            } else {
                Mat4::IDENTITY.to_cols_array_2d()
            },
            ..Self::zeroed()
        }
    }

    pub(super) fn glass(model: Mat4, m: &GlassMaterial) -> Self {
        let atten = m.attenuation_color.to_straight();
        Self {
            color: m.color.to_array(),
            attenuation: [atten[0], atten[1], atten[2], m.attenuation_distance],
            glass_a: [m.thickness, m.ior, m.chromatic_aberration, m.distortion],
            glass_b: [m.distortion_scale, m.temporal_distortion, m.clearcoat, m.roughness],
            glass_c: [m.anisotropy, m.hdr_intensity, m.quality.samples() as f32, 0.0],
            ..Self::with_model(model)
        }
    }

    pub(super) fn plane(model: Mat4, tint: Color, zoom: f32, cover: [f32; 2]) -> Self {
        Self {
            color: tint.to_array(),
            extra: [zoom.max(0.01), cover[0], cover[1], 0.0],
            ..Self::with_model(model)
        }
    }

    pub(super) fn solid(model: Mat4, color: Color) -> Self {
        Self { color: color.to_array(), ..Self::with_model(model) }
    }
}

/// Fraction of the texture visible on a quad so that the texture covers it
/// without stretching (the longer texture axis is cropped).
pub(super) fn cover_uv_scale(quad_aspect: f32, texture_aspect: f32) -> [f32; 2] {
    if !(quad_aspect > 0.0 && texture_aspect > 0.0) {
        return [1.0, 1.0];
    }
    if texture_aspect > quad_aspect {
        [quad_aspect / texture_aspect, 1.0]
    } else {
        [1.0, texture_aspect / quad_aspect]
    }
}

// ── mesh vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Line-list vertex (position only).
pub(super) fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

// ── uniform sizes ─────────────────────────────────────────────────────────

pub(super) fn uniform_binding_size<T>() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

/// Rounds `size` up to a multiple of `align` (a power of two).
#[inline]
pub(super) fn align_up(size: u64, align: u64) -> u64 {
    (size + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_fit_one_aligned_slot() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 128);
        assert_eq!(std::mem::size_of::<DrawUniform>(), 224);
        assert!(std::mem::size_of::<DrawUniform>() <= 256);
    }

    #[test]
    fn align_up_rounds_to_multiple() {
        assert_eq!(align_up(1, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
    }

    #[test]
    fn cover_crops_the_longer_axis() {
        // wide texture on a square quad: show the middle half horizontally
        assert_eq!(cover_uv_scale(1.0, 2.0), [0.5, 1.0]);
        // tall texture on a square quad
        assert_eq!(cover_uv_scale(1.0, 0.5), [1.0, 0.5]);
        assert_eq!(cover_uv_scale(0.0, 1.0), [1.0, 1.0]);
    }

    #[test]
    fn singular_model_falls_back_to_identity_normals() {
        let u = DrawUniform::with_model(Mat4::from_scale(Vec3::ZERO));
        assert_eq!(u.normal_matrix, Mat4::IDENTITY.to_cols_array_2d());
    }
}
