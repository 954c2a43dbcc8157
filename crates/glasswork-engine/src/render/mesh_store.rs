use wgpu::util::DeviceExt;

use glasswork_geometry::Mesh;

use super::common::MeshVertex;

/// Handle to a mesh uploaded into a [`MeshStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(u32);

impl MeshId {
    /// Handle for slot `index`; only the store that filled the slot resolves it.
    #[inline]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }
}

pub(super) struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// GPU copies of extruded meshes.
///
/// Slots are reused in place by [`MeshStore::replace`], so a handle stays
/// valid across geometry rebuilds. Empty meshes keep their slot but own no
/// buffers and draw nothing.
#[derive(Default)]
pub struct MeshStore {
    slots: Vec<Option<GpuMesh>>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&mut self, device: &wgpu::Device, mesh: &Mesh) -> MeshId {
        let id = MeshId(self.slots.len() as u32);
        self.slots.push(create_gpu_mesh(device, mesh));
        id
    }

    /// Replaces the contents behind `id`; unknown ids get a fresh slot.
    pub fn replace(&mut self, device: &wgpu::Device, id: MeshId, mesh: &Mesh) -> MeshId {
        match self.slots.get_mut(id.0 as usize) {
            Some(slot) => {
                *slot = create_gpu_mesh(device, mesh);
                id
            }
            None => self.upload(device, mesh),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(super) fn get(&self, id: MeshId) -> Option<&GpuMesh> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }
}

pub(super) fn mesh_vertices(mesh: &Mesh) -> Vec<MeshVertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| MeshVertex { position: p.to_array(), normal: n.to_array() })
        .collect()
}

fn create_gpu_mesh(device: &wgpu::Device, mesh: &Mesh) -> Option<GpuMesh> {
    if mesh.is_empty() {
        return None;
    }

    let vertices = mesh_vertices(mesh);
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("glasswork mesh vbo"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("glasswork mesh ibo"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    log::debug!(
        "uploaded mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Some(GpuMesh { vertex_buffer, index_buffer, index_count: mesh.indices.len() as u32 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn vertices_interleave_position_and_normal() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vec3::new(1.0, 2.0, 3.0), Vec3::Z);
        let v = mesh_vertices(&mesh);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(v[0].normal, [0.0, 0.0, 1.0]);
    }
}
