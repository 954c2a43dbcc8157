use super::{color_target, depth_state, primitive, shader_module};

/// Screen-filling capture quad: always passes depth, never writes it.
pub(super) fn create(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader =
        shader_module(device, "glasswork backdrop shader", include_str!("../shaders/backdrop.wgsl"));
    let targets = color_target(format);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glasswork backdrop pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &targets,
        }),
        primitive: primitive(wgpu::PrimitiveTopology::TriangleList, None),
        depth_stencil: depth_state(false, wgpu::CompareFunction::Always),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
