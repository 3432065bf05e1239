//! The static light rig: one ambient term plus two directional lights (the
//! sun above and a fill light for the cookie side), packed into a single
//! uniform that never changes after creation.

use cgmath::InnerSpace;
use wgpu::util::DeviceExt;

use crate::config;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    ambient_color: [f32; 3],
    ambient_intensity: f32,
    sun_direction: [f32; 3],
    sun_intensity: f32,
    // Due to uniforms requiring 16 byte (4 float) spacing, colour rows end in
    // an explicit padding float.
    sun_color: [f32; 3],
    _padding: f32,
    fill_direction: [f32; 3],
    fill_intensity: f32,
    fill_color: [f32; 3],
    _padding2: f32,
}

impl LightsUniform {
    /// Build the rig from the configuration table. Directional lights shine
    /// from their configured position towards the origin, so the shader
    /// receives the normalized direction pointing at the light.
    pub fn from_config() -> Self {
        Self {
            ambient_color: config::rgb(config::AMBIENT_RGB),
            ambient_intensity: config::AMBIENT_INTENSITY,
            sun_direction: direction_towards(config::SUN_POSITION),
            sun_intensity: config::SUN_INTENSITY,
            sun_color: config::rgb(config::SUN_RGB),
            _padding: 0.0,
            fill_direction: direction_towards(config::FILL_POSITION),
            fill_intensity: config::FILL_INTENSITY,
            fill_color: config::rgb(config::FILL_RGB),
            _padding2: 0.0,
        }
    }
}

fn direction_towards(position: [f32; 3]) -> [f32; 3] {
    cgmath::Vector3::from(position).normalize().into()
}

pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("lights_bind_group_layout"),
    })
}

/// GPU resources for the light rig.
#[derive(Debug)]
pub struct LightRig {
    pub uniform: LightsUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl LightRig {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let uniform = LightsUniform::from_config();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("lights_bind_group"),
        });
        Self {
            uniform,
            buffer,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_directions_are_unit_vectors() {
        let uniform = LightsUniform::from_config();
        for direction in [uniform.sun_direction, uniform.fill_direction] {
            let len = cgmath::Vector3::from(direction).magnitude();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn fill_light_comes_from_below() {
        let uniform = LightsUniform::from_config();
        assert!(uniform.fill_direction[1] < 0.0);
        assert!(uniform.sun_direction[1] > 0.0);
    }
}
