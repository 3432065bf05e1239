//! Render composition and pipeline batching.
//!
//! Scene nodes describe themselves as [`Render`] values; the frame renderer
//! sorts them into per-pipeline batches (meshes, then line overlays, then
//! points) and encodes a single render pass. [`render_frame`] only needs a
//! device, a queue and two texture views, so frames can be single-stepped
//! against an offscreen target without a window or a display.

use crate::{camera::CameraResources, pipelines::Pipelines, scene::lighting::LightRig, scene::mesh::Model};

/// Draw data for the face-grouped solid body.
pub struct MeshDraw<'a> {
    pub model: &'a Model,
    pub instances: &'a wgpu::Buffer,
    pub amount: usize,
}

/// Draw data for a line-list overlay.
pub struct LineDraw<'a> {
    pub vertices: &'a wgpu::Buffer,
    pub vertex_count: u32,
    pub instances: &'a wgpu::Buffer,
    pub params: &'a wgpu::BindGroup,
}

/// Draw data for a point cloud.
pub struct PointDraw<'a> {
    pub vertices: &'a wgpu::Buffer,
    pub vertex_count: u32,
    pub params: &'a wgpu::BindGroup,
}

/// Specifies how a scene object should be rendered.
pub enum Render<'a> {
    None,
    Mesh(MeshDraw<'a>),
    Lines(LineDraw<'a>),
    Points(PointDraw<'a>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    fn collect(
        self,
        meshes: &mut Vec<MeshDraw<'a>>,
        lines: &mut Vec<LineDraw<'a>>,
        points: &mut Vec<PointDraw<'a>>,
    ) {
        match self {
            Render::Mesh(draw) => meshes.push(draw),
            Render::Lines(draw) => lines.push(draw),
            Render::Points(draw) => points.push(draw),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.collect(meshes, lines, points)),
            Render::None => (),
        }
    }
}

/// The color/depth views a frame renders into.
pub struct FrameTargets<'a> {
    pub color: &'a wgpu::TextureView,
    pub depth: &'a wgpu::TextureView,
}

/// Encode and submit one frame.
pub fn render_frame(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    targets: FrameTargets<'_>,
    pipelines: &Pipelines,
    camera: &CameraResources,
    lights: &LightRig,
    clear_colour: wgpu::Color,
    render: Render<'_>,
) {
    let mut meshes = Vec::new();
    let mut lines = Vec::new();
    let mut points = Vec::new();
    render.collect(&mut meshes, &mut lines, &mut points);

    let mut encoder: wgpu::CommandEncoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: targets.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: targets.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        render_pass.set_pipeline(&pipelines.mesh);
        for draw in meshes {
            if draw.amount == 0 {
                log::warn!("you attempted to render a mesh with zero instances");
                continue;
            }
            render_pass.set_vertex_buffer(0, draw.model.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, draw.instances.slice(..));
            render_pass.set_bind_group(1, &camera.bind_group, &[]);
            render_pass.set_bind_group(2, &lights.bind_group, &[]);
            for group in &draw.model.groups {
                let material = &draw.model.materials[group.material];
                render_pass.set_bind_group(0, material.bind_group(), &[]);
                render_pass.set_index_buffer(group.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..group.num_elements, 0, 0..draw.amount as u32);
            }
        }

        render_pass.set_pipeline(&pipelines.line);
        for draw in lines {
            render_pass.set_vertex_buffer(0, draw.vertices.slice(..));
            render_pass.set_vertex_buffer(1, draw.instances.slice(..));
            render_pass.set_bind_group(0, &camera.bind_group, &[]);
            render_pass.set_bind_group(1, draw.params, &[]);
            render_pass.draw(0..draw.vertex_count, 0..1);
        }

        render_pass.set_pipeline(&pipelines.points);
        for draw in points {
            render_pass.set_vertex_buffer(0, draw.vertices.slice(..));
            render_pass.set_bind_group(0, &camera.bind_group, &[]);
            render_pass.set_bind_group(1, draw.params, &[]);
            render_pass.draw(0..draw.vertex_count, 0..1);
        }
    }

    queue.submit(std::iter::once(encoder.finish()));
}
