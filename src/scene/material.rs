//! Materials: CPU-side shading state and its GPU binding.
//!
//! A [`MaterialDesc`] is plain data the rest of the program may mutate at any
//! time on the event-loop thread; assigning a texture onto a material that a
//! live mesh already draws with is the normal path, not an error. Mutations
//! flag the material dirty and [`Material::prepare`] rebuilds the GPU binding
//! on the next frame.

use wgpu::util::DeviceExt;

use crate::{
    config,
    scene::texture::{Texture, WrapMode},
};

/// Shading parameters as the author sees them.
#[derive(Clone, Debug)]
pub struct MaterialDesc {
    pub name: &'static str,
    /// Multiplied with the texture sample; white shows the map unchanged,
    /// and a material without a map renders exactly this colour.
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    /// 0.0 disables bump shading; the diffuse map doubles as the bump source.
    pub bump_scale: f32,
    pub repeat: [f32; 2],
    pub wrap: WrapMode,
    pub map: Option<image::DynamicImage>,
    pub needs_update: bool,
}

impl MaterialDesc {
    /// Assign a texture map and flag the material for a GPU rebind.
    pub fn set_map(&mut self, image: image::DynamicImage) {
        self.map = Some(image);
        self.needs_update = true;
    }
}

/// The ordered material list for the earth body: `[side, top, bottom]`.
///
/// Side and top get their textures assigned whenever the loads arrive; the
/// bottom starts as a flat colour and is replaced through
/// [`apply_bottom_texture`] once the cookie texture is decoded.
pub fn earth_materials() -> [MaterialDesc; 3] {
    [
        MaterialDesc {
            name: "side",
            base_color: [1.0, 1.0, 1.0],
            roughness: config::SIDE_ROUGHNESS,
            metalness: config::SIDE_METALNESS,
            bump_scale: config::SIDE_BUMP_SCALE,
            repeat: config::ROCK_REPEAT,
            wrap: WrapMode::Repeat,
            map: None,
            needs_update: false,
        },
        MaterialDesc {
            name: "top",
            base_color: [1.0, 1.0, 1.0],
            roughness: config::TOP_ROUGHNESS,
            metalness: config::TOP_METALNESS,
            bump_scale: 0.0,
            repeat: [1.0, 1.0],
            wrap: WrapMode::Clamp,
            map: None,
            needs_update: false,
        },
        MaterialDesc {
            name: "bottom",
            base_color: config::rgb(config::BOTTOM_PLACEHOLDER_RGB),
            roughness: config::BOTTOM_ROUGHNESS,
            metalness: config::BOTTOM_METALNESS,
            bump_scale: 0.0,
            repeat: [1.0, 1.0],
            wrap: WrapMode::Clamp,
            map: None,
            needs_update: false,
        },
    ]
}

/// Completion handler for the cookie texture load.
///
/// Runs on the event-loop thread against the already-live bottom material:
/// wrap becomes repeating at a 1x1 factor, the map is assigned and the
/// material is flagged so the renderer rebinds it on the next frame.
pub fn apply_bottom_texture(material: &mut MaterialDesc, image: image::DynamicImage) {
    log::info!("Cookie texture loaded successfully");
    material.wrap = WrapMode::Repeat;
    material.repeat = [1.0, 1.0];
    material.set_map(image);
}

/// Uniform data backing a material's bind group.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialParams {
    base_color: [f32; 4],
    repeat: [f32; 2],
    bump_scale: f32,
    roughness: f32,
    metalness: f32,
    _padding: [f32; 3],
}

impl From<&MaterialDesc> for MaterialParams {
    fn from(desc: &MaterialDesc) -> Self {
        let [r, g, b] = desc.base_color;
        Self {
            base_color: [r, g, b, 1.0],
            repeat: desc.repeat,
            bump_scale: desc.bump_scale,
            roughness: desc.roughness,
            metalness: desc.metalness,
            _padding: [0.0; 3],
        }
    }
}

/// Bind group layout shared by every material: diffuse texture, sampler and
/// the parameter uniform.
pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
        label: Some("material_bind_group_layout"),
    })
}

/// A material with its GPU binding kept in sync lazily.
#[derive(Debug)]
pub struct Material {
    pub desc: MaterialDesc,
    texture: Texture,
    params_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        desc: MaterialDesc,
    ) -> Self {
        let texture = Texture::solid_color(device, queue, [255, 255, 255, 255]);
        let params = MaterialParams::from(&desc);
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Material Params", desc.name)),
            contents: bytemuck::cast_slice(&[params]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = mk_bind_group(device, layout, &texture, &params_buffer, desc.name);

        let mut material = Self {
            desc,
            texture,
            params_buffer,
            bind_group,
        };
        // Pick up a map that was assigned before construction.
        if material.desc.map.is_some() {
            material.desc.needs_update = true;
            material.prepare(device, queue, layout);
        }
        material
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Rebuild the GPU binding if the description changed. Returns whether a
    /// rebuild happened.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) -> bool {
        if !self.desc.needs_update {
            return false;
        }
        self.desc.needs_update = false;

        self.texture = match &self.desc.map {
            Some(image) => {
                match Texture::from_image(device, queue, image, Some(self.desc.name), self.desc.wrap)
                {
                    Ok(texture) => texture,
                    Err(e) => {
                        log::warn!(
                            "could not upload texture for material {}: {e}",
                            self.desc.name
                        );
                        Texture::solid_color(device, queue, [255, 255, 255, 255])
                    }
                }
            }
            None => Texture::solid_color(device, queue, [255, 255, 255, 255]),
        };

        let params = MaterialParams::from(&self.desc);
        queue.write_buffer(&self.params_buffer, 0, bytemuck::cast_slice(&[params]));
        self.bind_group = mk_bind_group(
            device,
            layout,
            &self.texture,
            &self.params_buffer,
            self.desc.name,
        );
        true
    }
}

fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    params_buffer: &wgpu::Buffer,
    name: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: params_buffer.as_entire_binding(),
            },
        ],
        label: Some(&format!("{name} material_bind_group")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_list_is_side_top_bottom() {
        let materials = earth_materials();
        let names: Vec<_> = materials.iter().map(|m| m.name).collect();
        assert_eq!(names, ["side", "top", "bottom"]);
    }

    #[test]
    fn bottom_material_starts_as_placeholder_colour() {
        let [_, _, bottom] = earth_materials();
        assert!(bottom.map.is_none());
        assert_eq!(bottom.base_color, config::rgb(0xf4a460));
        assert!(!bottom.needs_update);
    }

    #[test]
    fn side_material_tiles_the_rock_texture() {
        let [side, top, _] = earth_materials();
        assert_eq!(side.repeat, config::ROCK_REPEAT);
        assert_eq!(side.wrap, WrapMode::Repeat);
        assert!(side.bump_scale > 0.0);
        assert_eq!(top.repeat, [1.0, 1.0]);
        assert_eq!(top.wrap, WrapMode::Clamp);
    }

    #[test]
    fn cookie_handler_rebinds_the_live_bottom_material() {
        let [_, _, mut bottom] = earth_materials();
        let image = image::DynamicImage::new_rgba8(2, 2);
        apply_bottom_texture(&mut bottom, image);

        assert!(bottom.map.is_some());
        assert_eq!(bottom.repeat, [1.0, 1.0]);
        assert_eq!(bottom.wrap, WrapMode::Repeat);
        assert!(bottom.needs_update);
        // The placeholder colour stays and tints the cookie, as the original
        // scene did.
        assert_eq!(bottom.base_color, config::rgb(0xf4a460));
    }
}
