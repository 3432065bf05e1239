//! Scene assembly and ownership.
//!
//! [`Scene`] is the root container: it builds the earth disc (cylinder with
//! per-face-group materials), the two rim overlays, the star field and the
//! light rig at startup, then owns them for the life of the process. Nothing
//! is ever removed; the only post-construction mutation is a texture landing
//! on a material.

pub mod geometry;
pub mod instance;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod node;
pub mod starfield;
pub mod texture;

use cgmath::{Deg, Rotation3};
use wgpu::util::DeviceExt;

use crate::{
    config,
    pipelines::Pipelines,
    render::{LineDraw, MeshDraw, PointDraw, Render},
    scene::{
        instance::Instance,
        lighting::LightRig,
        material::Material,
        mesh::Model,
        node::{LineNode, MeshNode, PointsNode},
    },
};

/// Which texture a completed load belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    RockSide,
    EarthTop,
    CookieBottom,
}

#[derive(Debug)]
pub struct Scene {
    pub earth: MeshNode,
    pub top_rim: LineNode,
    pub bottom_rim: LineNode,
    pub stars: PointsNode,
    pub lights: LightRig,
}

impl Scene {
    /// Build the whole static scene graph.
    ///
    /// The material list exists before any texture load is issued, so the
    /// load completions always find their target.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, pipelines: &Pipelines) -> Self {
        let geometry = geometry::cylinder(
            config::EARTH_RADIUS,
            config::EARTH_THICKNESS,
            config::EARTH_SEGMENTS,
        );
        let materials = material::earth_materials()
            .into_iter()
            .map(|desc| Material::new(device, queue, &pipelines.material_layout, desc))
            .collect::<Vec<_>>();
        let model = Model::from_geometry(device, &geometry, materials, "Earth");

        // Tip the cylinder over so the earth-map cap faces the camera, as the
        // original scene placed it.
        let mut earth_instance = Instance::new();
        earth_instance.rotation =
            cgmath::Quaternion::from_axis_angle(cgmath::Vector3::unit_x(), Deg(90.0));
        let earth = MeshNode::new(device, model, earth_instance, "Earth");

        // Both rims share one ring geometry; the clone aliases the same GPU
        // buffer while the transforms stay independent.
        let ring = geometry::ring_outline(config::EARTH_RADIUS, config::EARTH_SEGMENTS);
        let ring_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rim Vertex Buffer"),
            contents: bytemuck::cast_slice(&ring),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let edge_color = config::rgb(config::EDGE_RGB);
        let half_thickness = config::EARTH_THICKNESS / 2.0;

        let mut top_instance = Instance::new();
        top_instance.rotation =
            cgmath::Quaternion::from_axis_angle(cgmath::Vector3::unit_x(), Deg(-90.0));
        top_instance.position.y = half_thickness;
        let top_rim = LineNode::new(
            device,
            &pipelines.overlay_layout,
            ring_buffer.clone(),
            ring.len() as u32,
            edge_color,
            top_instance,
            "Top Rim",
        );

        let mut bottom_instance = Instance::new();
        bottom_instance.rotation =
            cgmath::Quaternion::from_axis_angle(cgmath::Vector3::unit_x(), Deg(90.0));
        bottom_instance.position.y = -half_thickness;
        let bottom_rim = LineNode::new(
            device,
            &pipelines.overlay_layout,
            ring_buffer,
            ring.len() as u32,
            edge_color,
            bottom_instance,
            "Bottom Rim",
        );

        let star_vertices = starfield::star_positions(
            config::STAR_SEED,
            config::STAR_COUNT,
            config::STAR_SPREAD,
        );
        let star_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Star Vertex Buffer"),
            contents: bytemuck::cast_slice(&star_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let stars = PointsNode::new(
            device,
            &pipelines.overlay_layout,
            star_buffer,
            star_vertices.len() as u32,
            config::rgb(config::STAR_RGB),
            "Stars",
        );

        let lights = LightRig::new(device, &pipelines.lights_layout);

        let scene = Self {
            earth,
            top_rim,
            bottom_rim,
            stars,
            lights,
        };
        for material in &scene.earth.model.materials {
            log::debug!("earth material: {:?}", material.desc);
        }
        scene
    }

    /// Route a completed texture load onto its material.
    ///
    /// Runs on the event-loop thread only; the GPU rebind happens on the next
    /// frame via [`Scene::prepare`].
    pub fn apply_texture(&mut self, slot: TextureSlot, image: image::DynamicImage) {
        let materials = &mut self.earth.model.materials;
        match slot {
            TextureSlot::RockSide => materials[0].desc.set_map(image),
            TextureSlot::EarthTop => materials[1].desc.set_map(image),
            TextureSlot::CookieBottom => material::apply_bottom_texture(&mut materials[2].desc, image),
        }
    }

    /// Rebuild any dirty material bindings. Called once per frame before the
    /// render pass is encoded.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, pipelines: &Pipelines) {
        for material in &mut self.earth.model.materials {
            if material.prepare(device, queue, &pipelines.material_layout) {
                log::debug!("rebound material {}", material.desc.name);
            }
        }
    }

    /// Collect this frame's draws.
    pub fn render(&self) -> Render<'_> {
        Render::Composed(vec![
            Render::Mesh(MeshDraw {
                model: &self.earth.model,
                instances: self.earth.instance_buffer(),
                amount: 1,
            }),
            Render::Lines(LineDraw {
                vertices: self.top_rim.vertex_buffer(),
                vertex_count: self.top_rim.vertex_count(),
                instances: self.top_rim.instance_buffer(),
                params: self.top_rim.bind_group(),
            }),
            Render::Lines(LineDraw {
                vertices: self.bottom_rim.vertex_buffer(),
                vertex_count: self.bottom_rim.vertex_count(),
                instances: self.bottom_rim.instance_buffer(),
                params: self.bottom_rim.bind_group(),
            }),
            Render::Points(PointDraw {
                vertices: self.stars.vertex_buffer(),
                vertex_count: self.stars.vertex_count(),
                params: self.stars.bind_group(),
            }),
        ])
    }
}
