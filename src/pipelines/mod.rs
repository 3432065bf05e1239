//! Render pipelines for the three primitive kinds in the scene: lit meshes,
//! line overlays and the star points. All bind group layouts live here so the
//! scene and the headless tests can build against them without a window.

pub mod line;
pub mod mesh;
pub mod points;

use crate::{camera, scene::lighting, scene::material, scene::node};

pub struct Pipelines {
    pub mesh: wgpu::RenderPipeline,
    pub line: wgpu::RenderPipeline,
    pub points: wgpu::RenderPipeline,
    pub material_layout: wgpu::BindGroupLayout,
    pub overlay_layout: wgpu::BindGroupLayout,
    pub camera_layout: wgpu::BindGroupLayout,
    pub lights_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let material_layout = material::bind_group_layout(device);
        let camera_layout = camera::bind_group_layout(device);
        let lights_layout = lighting::bind_group_layout(device);
        let overlay_layout = node::overlay_bind_group_layout(device);

        let mesh = mesh::mk_mesh_pipeline(
            device,
            format,
            &material_layout,
            &camera_layout,
            &lights_layout,
        );
        let line = line::mk_line_pipeline(device, format, &camera_layout, &overlay_layout);
        let points = points::mk_points_pipeline(device, format, &camera_layout, &overlay_layout);

        Self {
            mesh,
            line,
            points,
            material_layout,
            overlay_layout,
            camera_layout,
            lights_layout,
        }
    }
}

impl std::fmt::Debug for Pipelines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pipelines")
    }
}
