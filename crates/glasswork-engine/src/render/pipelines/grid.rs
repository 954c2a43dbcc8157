use glam::Vec3;

use super::super::common::line_vertex_layout;
use super::{color_target, depth_state, primitive, shader_module};

pub(in crate::render) fn create(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = shader_module(device, "glasswork grid shader", include_str!("../shaders/grid.wgsl"));
    let targets = color_target(format);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glasswork grid pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[line_vertex_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &targets,
        }),
        primitive: primitive(wgpu::PrimitiveTopology::LineList, None),
        depth_stencil: depth_state(false, wgpu::CompareFunction::LessEqual),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Line-list vertices of a `size` x `size` grid centered on the origin in
/// the XY plane, with `divisions` cells per side.
pub(in crate::render) fn grid_lines(size: f32, divisions: u32) -> Vec<Vec3> {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;

    let mut out = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + step * i as f32;
        out.extend_from_slice(&[
            Vec3::new(k, -half, 0.0),
            Vec3::new(k, half, 0.0),
            Vec3::new(-half, k, 0.0),
            Vec3::new(half, k, 0.0),
        ]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_two_lines_per_division_boundary() {
        let lines = grid_lines(10.0, 4);
        assert_eq!(lines.len(), 5 * 4);
        assert_eq!(lines[0], Vec3::new(-5.0, -5.0, 0.0));
        assert_eq!(lines[lines.len() - 1], Vec3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn zero_divisions_is_one_cell() {
        assert_eq!(grid_lines(2.0, 0).len(), 8);
    }
}
