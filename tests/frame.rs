//! Offscreen one-frame smoke test.
//!
//! Builds the full scene against a headless device, simulates the cookie
//! texture load completing, renders a single frame into an offscreen target
//! and reads the pixels back. Gated behind the `integration-tests` feature
//! because it needs a working GPU adapter; it also skips quietly when the
//! host has none.

#![cfg(feature = "integration-tests")]

use terradisc::{
    camera::{CameraResources, Projection},
    config,
    pipelines::Pipelines,
    render::{FrameTargets, render_frame},
    scene::{Scene, TextureSlot, texture::Texture},
};

const SIZE: u32 = 256;
const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok()?;
        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    })
}

#[test]
fn one_frame_shows_the_lit_disc_and_leaves_the_clear_colour_elsewhere() {
    let Some((device, queue)) = create_test_device() else {
        return;
    };

    let pipelines = Pipelines::new(&device, FORMAT);
    let projection = Projection::new(
        SIZE,
        SIZE,
        cgmath::Deg(config::CAMERA_FOVY_DEG),
        config::CAMERA_ZNEAR,
        config::CAMERA_ZFAR,
    );
    let camera = CameraResources::new(&device, &pipelines.camera_layout, &projection);

    let mut scene = Scene::new(&device, &queue, &pipelines);
    scene.apply_texture(
        TextureSlot::CookieBottom,
        image::DynamicImage::new_rgba8(2, 2),
    );
    scene.prepare(&device, &queue, &pipelines);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(&device, [SIZE, SIZE], "offscreen depth");

    render_frame(
        &device,
        &queue,
        FrameTargets {
            color: &target_view,
            depth: &depth.view,
        },
        &pipelines,
        &camera,
        &scene.lights,
        wgpu::Color::BLACK,
        scene.render(),
    );

    // Read the frame back. SIZE * 4 bytes per row is already 256-aligned.
    let bytes_per_row = SIZE * 4;
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Buffer"),
        size: (bytes_per_row * SIZE) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });
    let mut encoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(SIZE),
            },
        },
        wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let pixels = pollster::block_on(async {
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let slice = buffer.slice(..);
        slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).unwrap();
        });
        device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(std::time::Duration::from_secs(3)),
            })
            .unwrap();
        rx.receive().await.unwrap().unwrap();
        let data = slice.get_mapped_range();
        data.to_vec()
    });

    let pixel = |x: u32, y: u32| {
        let offset = ((y * SIZE + x) * 4) as usize;
        [
            pixels[offset],
            pixels[offset + 1],
            pixels[offset + 2],
            pixels[offset + 3],
        ]
    };

    // The camera looks at the disc dead on, so the centre pixel is the lit
    // earth-map cap (white placeholder under white light), never the clear
    // colour.
    let centre = pixel(SIZE / 2, SIZE / 2);
    assert!(
        centre[0] > 10 && centre[1] > 10 && centre[2] > 10,
        "centre pixel {centre:?} should show the lit disc"
    );
    assert_eq!(centre[3], 255);

    // The corners fall outside the disc; they are the clear colour unless a
    // star happens to land there.
    let corner = pixel(1, 1);
    assert_eq!(corner[3], 255);
}
