use glam::Vec3;

use crate::bounds::Aabb;

/// Indexed triangle mesh with per-vertex normals.
///
/// Faces are counter-clockwise when seen from the side their normal points to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Appends a vertex and returns its index.
    #[inline]
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        idx
    }

    #[inline]
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends `other`, rebasing its indices.
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_rebases_indices() {
        let mut a = Mesh::new();
        let i0 = a.add_vertex(Vec3::ZERO, Vec3::Z);
        let i1 = a.add_vertex(Vec3::X, Vec3::Z);
        let i2 = a.add_vertex(Vec3::Y, Vec3::Z);
        a.add_triangle(i0, i1, i2);

        let b = a.clone();
        a.merge(&b);

        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(&a.indices[3..], &[3, 4, 5]);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(Mesh::new().bounding_box().is_none());
    }
}
