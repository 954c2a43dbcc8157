//! Perspective camera and directional light shared by both scenes.

use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking at a target, +Y up.
///
/// Projection maps depth to `[0, 1]` as wgpu expects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::ZERO,
            fov_y_deg: 15.0,
            near: 0.1,
            far: 1000.0,
            aspect: 1.0,
        }
    }
}

impl Camera {
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.set_aspect(aspect);
        self
    }

    #[inline]
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Visible `(width, height)` in world units on the plane facing the
    /// camera at `z`.
    pub fn visible_extent_at(&self, z: f32) -> (f32, f32) {
        let distance = (self.position.z - z).abs();
        let height = 2.0 * distance * (self.fov_y_deg.to_radians() * 0.5).tan();
        (height * self.aspect, height)
    }
}

/// Directional light; `direction` points from the scene towards the light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub direction: Vec3,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self { direction: Vec3::new(0.0, 3.0, 2.0).normalize(), intensity: 3.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera::default().with_aspect(16.0 / 9.0);
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn visible_extent_at_origin() {
        let cam = Camera::default().with_aspect(2.0);
        let (w, h) = cam.visible_extent_at(0.0);
        assert_relative_eq!(h, 40.0 * 7.5_f32.to_radians().tan(), epsilon = 1e-5);
        assert_relative_eq!(w, 2.0 * h, epsilon = 1e-5);
    }

    #[test]
    fn edge_of_visible_extent_maps_to_ndc_edge() {
        let cam = Camera::default().with_aspect(1.5);
        let (_, h) = cam.visible_extent_at(0.0);
        let clip = cam.view_projection() * Vec3::new(0.0, h * 0.5, 0.0).extend(1.0);
        assert_relative_eq!(clip.y / clip.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = Camera::default();
        cam.set_aspect(0.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect, 1.0);
    }
}
