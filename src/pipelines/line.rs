use crate::{
    pipelines::mesh::mk_render_pipeline,
    scene::{
        instance::InstanceRaw,
        mesh::{PositionVertex, Vertex},
        texture::Texture,
    },
};

/**
 * Pipeline for the rim overlays: a plain line list with a per-node colour
 * uniform and an instance transform. Line width is fixed at one pixel by the
 * rasterizer.
 */
pub fn mk_line_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    camera_layout: &wgpu::BindGroupLayout,
    overlay_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Line Pipeline Layout"),
        bind_group_layouts: &[Some(camera_layout), Some(overlay_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Line Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("line_shader.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(Texture::DEPTH_FORMAT),
        wgpu::PrimitiveTopology::LineList,
        None,
        &[PositionVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
