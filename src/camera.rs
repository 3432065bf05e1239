//! Orbit camera, projection and the view/projection uniform.
//!
//! The camera orbits a fixed look-at target: its pose is a yaw/pitch pair
//! plus a distance, converted to a view matrix each frame. [`OrbitController`]
//! turns pointer drags and wheel input into damped orbital motion and must be
//! advanced exactly once per rendered frame.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use wgpu::util::DeviceExt;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::config;

/// wgpu clip space is x,y in [-1, 1] and z in [0, 1]; cgmath produces
/// OpenGL-style z in [-1, 1], so every projection is corrected by this.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Orbital camera pose around a fixed target.
#[derive(Clone, Debug)]
pub struct Camera {
    pub target: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
    pub distance: f32,
}

impl Camera {
    /// Build an orbit pose that places the eye at `position` looking at `target`.
    pub fn from_position(position: Point3<f32>, target: Point3<f32>) -> Self {
        let offset = position - target;
        let distance = offset.magnitude();
        let pitch = Rad((offset.y / distance).asin());
        let yaw = Rad(offset.x.atan2(offset.z));
        Self {
            target,
            yaw,
            pitch,
            distance,
        }
    }

    /// Current eye position derived from the orbit pose.
    pub fn position(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        self.target
            + Vector3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }
}

/// Perspective projection, resized whenever the surface changes dimensions.
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Pointer-drag orbit with inertia.
///
/// Input accumulates into velocities; `update` blends them into the camera
/// pose scaled by the damping factor and decays them by its complement, so
/// motion eases out after the pointer is released. Zoom distance is clamped
/// to the configured range on every update, whatever the input magnitude.
#[derive(Debug)]
pub struct OrbitController {
    rotate_speed: f32,
    zoom_speed: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    dragging: bool,
}

impl OrbitController {
    pub fn new(damping: f32, min_distance: f32, max_distance: f32) -> Self {
        Self {
            rotate_speed: config::ROTATE_SPEED,
            zoom_speed: config::ZOOM_SPEED,
            damping,
            min_distance,
            max_distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            dragging: false,
        }
    }

    /// Raw pointer motion. Only applied while the primary button is held.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        if !self.dragging {
            return;
        }
        self.rotate(dx as f32, dy as f32);
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.zoom(-scroll);
            }
            _ => {}
        }
    }

    /// Accumulate orbital rotation input.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * self.rotate_speed;
        self.pitch_velocity += dy * self.rotate_speed;
    }

    /// Accumulate zoom input; positive moves the camera away from the target.
    pub fn zoom(&mut self, amount: f32) {
        self.zoom_velocity += amount * self.zoom_speed;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Advance the pose by one frame.
    pub fn update(&mut self, camera: &mut Camera) {
        camera.yaw += Rad(self.yaw_velocity * self.damping);
        camera.pitch += Rad(self.pitch_velocity * self.damping);
        camera.distance += self.zoom_velocity * self.damping;

        // Keep the pose away from the poles so look_at never degenerates.
        let pitch_limit = Rad(std::f32::consts::FRAC_PI_2 - 0.01);
        camera.pitch = Rad(camera.pitch.0.clamp(-pitch_limit.0, pitch_limit.0));
        camera.distance = camera.distance.clamp(self.min_distance, self.max_distance);

        let keep = 1.0 - self.damping;
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
        self.zoom_velocity *= keep;
    }
}

/// The raw camera data handed to shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        let position = camera.position();
        self.view_position = [position.x, position.y, position.z, 1.0];
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
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
        label: Some("camera_bind_group_layout"),
    })
}

/// Everything camera-related the render loop touches each frame.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: OrbitController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, projection: &Projection) -> Self {
        let camera = Camera::from_position(
            config::CAMERA_POSITION.into(),
            Point3::new(0.0, 0.0, 0.0),
        );
        let controller = OrbitController::new(
            config::DAMPING_FACTOR,
            config::MIN_DISTANCE,
            config::MAX_DISTANCE,
        );

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            controller,
            uniform,
            buffer,
            bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, EuclideanSpace};

    fn default_camera() -> Camera {
        Camera::from_position(config::CAMERA_POSITION.into(), Point3::origin())
    }

    #[test]
    fn orbit_pose_roundtrips_initial_position() {
        let camera = default_camera();
        let position = camera.position();
        assert!((position.x - 0.0).abs() < 1e-5);
        assert!((position.y - 2.0).abs() < 1e-5);
        assert!((position.z - 5.0).abs() < 1e-5);
    }

    #[test]
    fn update_without_input_keeps_the_pose() {
        let mut camera = default_camera();
        let mut controller =
            OrbitController::new(config::DAMPING_FACTOR, config::MIN_DISTANCE, config::MAX_DISTANCE);
        let before = camera.position();
        controller.update(&mut camera);
        let after = camera.position();
        assert!((before.x - after.x).abs() < 1e-6);
        assert!((before.y - after.y).abs() < 1e-6);
        assert!((before.z - after.z).abs() < 1e-6);
    }

    #[test]
    fn zoom_distance_stays_clamped_for_any_input() {
        let mut camera = default_camera();
        let mut controller =
            OrbitController::new(config::DAMPING_FACTOR, config::MIN_DISTANCE, config::MAX_DISTANCE);
        controller.zoom(1.0e6);
        for _ in 0..120 {
            controller.update(&mut camera);
            assert!(camera.distance >= config::MIN_DISTANCE);
            assert!(camera.distance <= config::MAX_DISTANCE);
        }
        controller.zoom(-1.0e9);
        for _ in 0..120 {
            controller.update(&mut camera);
            assert!(camera.distance >= config::MIN_DISTANCE);
            assert!(camera.distance <= config::MAX_DISTANCE);
        }
    }

    #[test]
    fn drag_velocity_decays_after_release() {
        let mut camera = default_camera();
        let mut controller =
            OrbitController::new(config::DAMPING_FACTOR, config::MIN_DISTANCE, config::MAX_DISTANCE);
        controller.dragging = true;
        controller.handle_mouse(100.0, 0.0);
        controller.dragging = false;

        let initial = controller.yaw_velocity.abs();
        assert!(initial > 0.0);
        let mut last_yaw = camera.yaw;
        let mut last_step = f32::MAX;
        for _ in 0..60 {
            controller.update(&mut camera);
            let step = (camera.yaw - last_yaw).0.abs();
            assert!(step <= last_step + 1e-7, "orbit motion should ease out");
            last_step = step;
            last_yaw = camera.yaw;
        }
        assert!(controller.yaw_velocity.abs() < initial * 0.1);
    }

    #[test]
    fn motion_is_ignored_unless_dragging() {
        let mut controller =
            OrbitController::new(config::DAMPING_FACTOR, config::MIN_DISTANCE, config::MAX_DISTANCE);
        controller.handle_mouse(50.0, 50.0);
        assert_eq!(controller.yaw_velocity, 0.0);
        assert_eq!(controller.pitch_velocity, 0.0);
    }

    #[test]
    fn projection_resize_is_idempotent() {
        let mut projection =
            Projection::new(800, 600, Deg(config::CAMERA_FOVY_DEG), config::CAMERA_ZNEAR, config::CAMERA_ZFAR);
        projection.resize(1920, 1080);
        let once = projection.aspect();
        projection.resize(1920, 1080);
        assert_eq!(once, projection.aspect());
    }
}
