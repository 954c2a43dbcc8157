use super::super::common::MeshVertex;
use super::{color_target, depth_state, primitive, shader_module};

/// Opaque refractive surface; writes depth so overlapping shapes resolve.
pub(super) fn create(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = shader_module(device, "glasswork glass shader", include_str!("../shaders/glass.wgsl"));
    let targets = color_target(format);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glasswork glass pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[MeshVertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &targets,
        }),
        primitive: primitive(wgpu::PrimitiveTopology::TriangleList, Some(wgpu::Face::Back)),
        depth_stencil: depth_state(true, wgpu::CompareFunction::Less),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
