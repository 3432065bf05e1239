//! Flow control and application event loop.
//!
//! This module wires the winit event loop to the scene: it owns the GPU
//! context, forwards input to the camera controller, reacts to resizes,
//! applies texture-load completions and drives the perpetually rescheduled
//! per-frame render.
//!
//! # Lifecycle
//!
//! Each frame:
//! 1. Collect window/device events; pointer input feeds the orbit controller
//! 2. `RedrawRequested`: advance the controller exactly once
//! 3. Upload the camera uniform
//! 4. Rebuild any material binding a texture completion dirtied
//! 5. Encode and present one render of the scene, then request the next frame
//!
//! Texture completions arrive as [`AppEvent`] user events from the tokio
//! runtime and are applied here, on the event-loop thread, so the material
//! list has a single writer.

use std::sync::Arc;

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config,
    context::Context,
    render::{self, FrameTargets},
    resources,
    scene::{Scene, TextureSlot},
};

/// Events delivered back to the event-loop thread from background work.
pub enum AppEvent {
    TextureLoaded {
        slot: TextureSlot,
        image: image::DynamicImage,
    },
}

impl std::fmt::Debug for AppEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TextureLoaded { slot, .. } => {
                f.debug_struct("TextureLoaded").field("slot", slot).finish()
            }
        }
    }
}

/// Application state bundle: GPU context, scene, and surface status.
#[derive(Debug)]
struct AppState {
    ctx: Context,
    scene: Scene,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>) -> Self {
        let ctx = Context::new(window).await;
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {}",
                e
            ),
        };
        let scene = Scene::new(&ctx.device, &ctx.queue, &ctx.pipelines);
        Self {
            ctx,
            scene,
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.is_surface_configured = true;
            self.ctx.resize(width, height);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::CurrentSurfaceTexture> {
        // Keep the loop perpetually rescheduled.
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            other => return Err(other),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        render::render_frame(
            &self.ctx.device,
            &self.ctx.queue,
            FrameTargets {
                color: &view,
                depth: &self.ctx.depth_texture.view,
            },
            &self.ctx.pipelines,
            &self.ctx.camera,
            &self.scene.lights,
            self.ctx.clear_colour,
            self.scene.render(),
        );

        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    proxy: winit::event_loop::EventLoopProxy<AppEvent>,
    state: Option<AppState>,
    last_time: Instant,
}

impl App {
    fn new(event_loop: &EventLoop<AppEvent>) -> Self {
        let proxy = event_loop.create_proxy();
        let async_runtime = tokio::runtime::Runtime::new().expect("Failed to start async runtime");
        Self {
            async_runtime,
            proxy,
            state: None,
            last_time: Instant::now(),
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attributes = Window::default_attributes().with_title(config::WINDOW_TITLE);
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("Failed to create a window"),
        );

        let mut app_state = self.async_runtime.block_on(AppState::new(window));

        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);

        log::info!("{}", config::WINDOW_TITLE);
        for line in config::INFO_BANNER {
            log::info!("{line}");
        }

        // The material list exists by now; completions always find their
        // target.
        resources::spawn_texture_loads(&self.async_runtime, self.proxy.clone());

        app_state.ctx.window.request_redraw();
        self.state = Some(app_state);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::TextureLoaded { slot, image } => {
                if let Some(state) = &mut self.state {
                    state.scene.apply_texture(slot, image);
                }
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            state.ctx.camera.controller.handle_mouse(dx, dy);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.camera.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                log::trace!("frame time: {dt:?}");

                // Advance the controller exactly once per frame so the
                // damping integrates correctly, then upload the camera.
                state
                    .ctx
                    .camera
                    .controller
                    .update(&mut state.ctx.camera.camera);
                state
                    .ctx
                    .camera
                    .uniform
                    .update_view_proj(&state.ctx.camera.camera, &state.ctx.projection);
                state.ctx.queue.write_buffer(
                    &state.ctx.camera.buffer,
                    0,
                    bytemuck::cast_slice(&[state.ctx.camera.uniform]),
                );

                state
                    .scene
                    .prepare(&state.ctx.device, &state.ctx.queue, &state.ctx.pipelines);

                match state.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {:?}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let event_loop: EventLoop<AppEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop);
    event_loop.run_app(&mut app)?;

    Ok(())
}
