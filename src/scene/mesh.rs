//! Vertex formats and the face-grouped mesh model.
//!
//! The earth body is a single vertex buffer drawn as three index ranges
//! (side wall, top cap, bottom cap), each with the material of the same
//! index. [`Model`] owns the GPU buffers and the ordered material list.

use wgpu::util::DeviceExt;

use crate::scene::{geometry::MeshGeometry, material::Material};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Lit, textured mesh vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Bare position vertex shared by the line and point pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl Vertex for PositionVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PositionVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// One face group: an index range over the shared vertex buffer plus the
/// index of the material it draws with.
#[derive(Debug)]
pub struct FaceGroup {
    pub name: String,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub material: usize,
}

/// A mesh split into face groups with one material per group, in the same
/// fixed order. The two lists always have equal length.
#[derive(Debug)]
pub struct Model {
    pub vertex_buffer: wgpu::Buffer,
    pub groups: Vec<FaceGroup>,
    pub materials: Vec<Material>,
}

impl Model {
    /// Upload CPU geometry, pairing face group `i` with material `i`.
    pub fn from_geometry(
        device: &wgpu::Device,
        geometry: &MeshGeometry,
        materials: Vec<Material>,
        label: &str,
    ) -> Self {
        assert_eq!(
            geometry.groups.len(),
            materials.len(),
            "one material per face group"
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let groups = geometry
            .groups
            .iter()
            .enumerate()
            .map(|(material, group)| {
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} {} Index Buffer", group.name)),
                    contents: bytemuck::cast_slice(&group.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                FaceGroup {
                    name: group.name.to_string(),
                    index_buffer,
                    num_elements: group.indices.len() as u32,
                    material,
                }
            })
            .collect();

        Self {
            vertex_buffer,
            groups,
            materials,
        }
    }
}
