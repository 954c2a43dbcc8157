//! Render pipelines, one file per draw command kind.
//!
//! Every pipeline shares the frame (group 0) and draw (group 1) bindings;
//! textured pipelines add a texture + sampler pair as group 2.

mod backdrop;
mod glass;
pub(super) mod grid;
mod plane;

use crate::device::DEPTH_FORMAT;

const COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");

/// Bind group layouts shared by all pipelines.
pub(super) struct Layouts {
    pub frame: wgpu::BindGroupLayout,
    pub draw: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
}

/// Pipelines compiled for one color target format.
pub(super) struct Pipelines {
    pub format: wgpu::TextureFormat,
    pub glass: wgpu::RenderPipeline,
    pub plane: wgpu::RenderPipeline,
    pub grid: wgpu::RenderPipeline,
    pub backdrop: wgpu::RenderPipeline,
}

impl Pipelines {
    pub(super) fn new(device: &wgpu::Device, layouts: &Layouts, format: wgpu::TextureFormat) -> Self {
        let textured = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glasswork textured pipeline layout"),
            bind_group_layouts: &[&layouts.frame, &layouts.draw, &layouts.texture],
            immediate_size: 0,
        });
        let untextured = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glasswork untextured pipeline layout"),
            bind_group_layouts: &[&layouts.frame, &layouts.draw],
            immediate_size: 0,
        });

        log::debug!("compiling pipelines for {format:?}");

        Self {
            format,
            glass: glass::create(device, &textured, format),
            plane: plane::create(device, &textured, format),
            grid: grid::create(device, &untextured, format),
            backdrop: backdrop::create(device, &textured, format),
        }
    }
}

fn shader_module(device: &wgpu::Device, label: &str, body: &str) -> wgpu::ShaderModule {
    let source = format!("{COMMON_WGSL}\n{body}");
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

fn depth_state(write: bool, compare: wgpu::CompareFunction) -> Option<wgpu::DepthStencilState> {
    Some(wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    })
}

fn primitive(topology: wgpu::PrimitiveTopology, cull_mode: Option<wgpu::Face>) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

fn color_target(format: wgpu::TextureFormat) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(super::common::premul_alpha_blend()),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}
