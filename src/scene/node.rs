//! Renderable scene nodes.
//!
//! Each node owns its transform and instance buffer; geometry buffers may be
//! shared between nodes (wgpu buffers are internally reference-counted, so a
//! clone aliases the same GPU allocation). The two rim overlays rely on this:
//! they clone one ring geometry but keep independent transforms.

use wgpu::util::DeviceExt;

use crate::scene::{instance::Instance, mesh::Model};

/// Colour uniform shared by the line and point pipelines.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayParams {
    pub color: [f32; 3],
    pub _padding: f32,
}

pub fn overlay_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("overlay_bind_group_layout"),
    })
}

fn mk_overlay_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    color: [f32; 3],
    label: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let params = OverlayParams {
        color,
        _padding: 0.0,
    };
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Params Buffer")),
        contents: bytemuck::cast_slice(&[params]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(&format!("{label} overlay_bind_group")),
    });
    (buffer, bind_group)
}

fn mk_instance_buffer(device: &wgpu::Device, instance: &Instance, label: &str) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Instance Buffer")),
        contents: bytemuck::cast_slice(&[instance.to_raw()]),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}

/// The textured, face-grouped solid body.
#[derive(Debug)]
pub struct MeshNode {
    pub model: Model,
    instance: Instance,
    instance_buffer: wgpu::Buffer,
}

impl MeshNode {
    pub fn new(device: &wgpu::Device, model: Model, instance: Instance, label: &str) -> Self {
        let instance_buffer = mk_instance_buffer(device, &instance, label);
        Self {
            model,
            instance,
            instance_buffer,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn set_instance(&mut self, queue: &wgpu::Queue, instance: Instance) {
        self.instance = instance;
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&[self.instance.to_raw()]),
        );
    }

    pub fn instance_buffer(&self) -> &wgpu::Buffer {
        &self.instance_buffer
    }
}

/// A wireframe overlay drawn as a line list.
#[derive(Debug)]
pub struct LineNode {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    instance: Instance,
    instance_buffer: wgpu::Buffer,
    #[allow(unused)]
    params_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl LineNode {
    /// `vertex_buffer` may be a clone shared with another node; the transform
    /// and colour binding are this node's own.
    pub fn new(
        device: &wgpu::Device,
        overlay_layout: &wgpu::BindGroupLayout,
        vertex_buffer: wgpu::Buffer,
        vertex_count: u32,
        color: [f32; 3],
        instance: Instance,
        label: &str,
    ) -> Self {
        let instance_buffer = mk_instance_buffer(device, &instance, label);
        let (params_buffer, bind_group) = mk_overlay_bind_group(device, overlay_layout, color, label);
        Self {
            vertex_buffer,
            vertex_count,
            instance,
            instance_buffer,
            params_buffer,
            bind_group,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn instance_buffer(&self) -> &wgpu::Buffer {
        &self.instance_buffer
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// A static point cloud.
#[derive(Debug)]
pub struct PointsNode {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    #[allow(unused)]
    params_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl PointsNode {
    pub fn new(
        device: &wgpu::Device,
        overlay_layout: &wgpu::BindGroupLayout,
        vertex_buffer: wgpu::Buffer,
        vertex_count: u32,
        color: [f32; 3],
        label: &str,
    ) -> Self {
        let (params_buffer, bind_group) = mk_overlay_bind_group(device, overlay_layout, color, label);
        Self {
            vertex_buffer,
            vertex_count,
            params_buffer,
            bind_group,
        }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
