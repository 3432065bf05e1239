//! Scene configuration.
//!
//! Every tunable of the demo lives here as a named constant so the scene
//! assembly code reads as wiring rather than magic numbers.

/// Window title, also the first line of the startup banner.
pub const WINDOW_TITLE: &str = "Real Earth 3D Visualization";

/// Lines logged at startup in place of an on-screen info overlay.
pub const INFO_BANNER: [&str; 2] = [
    "Click and drag to move the planet model",
    "Top layer: Earth Map | Bottom layer: Cookie!",
];

// Earth disc dimensions.
pub const EARTH_RADIUS: f32 = 2.0;
pub const EARTH_THICKNESS: f32 = 0.5;
pub const EARTH_SEGMENTS: u32 = 64;

// Side (rock) material.
pub const SIDE_ROUGHNESS: f32 = 0.8;
pub const SIDE_METALNESS: f32 = 0.2;
pub const SIDE_BUMP_SCALE: f32 = 0.05;
pub const ROCK_REPEAT: [f32; 2] = [4.0, 2.0];

// Top (earth map) material.
pub const TOP_ROUGHNESS: f32 = 0.5;
pub const TOP_METALNESS: f32 = 0.1;

// Bottom (cookie) material. The colour shows until the texture arrives.
pub const BOTTOM_ROUGHNESS: f32 = 0.7;
pub const BOTTOM_METALNESS: f32 = 0.0;
pub const BOTTOM_PLACEHOLDER_RGB: u32 = 0xf4a460;

/// Rim outline colour for both edge overlays.
pub const EDGE_RGB: u32 = 0x00ffff;

// Star field.
pub const STAR_COUNT: usize = 5000;
/// Stars are spread uniformly over [-spread/2, spread/2) per axis.
pub const STAR_SPREAD: f32 = 100.0;
pub const STAR_RGB: u32 = 0xffffff;
/// Nominal star size in world units. Point primitives rasterize at one pixel
/// regardless; the value is kept as part of the scene's configuration table.
pub const STAR_SIZE: f32 = 0.1;
pub const STAR_SEED: u64 = 42;

// Lighting rig.
pub const AMBIENT_RGB: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 0.7;
pub const SUN_RGB: u32 = 0xffffff;
pub const SUN_INTENSITY: f32 = 0.8;
pub const SUN_POSITION: [f32; 3] = [5.0, 3.0, 5.0];
pub const FILL_RGB: u32 = 0xffffff;
pub const FILL_INTENSITY: f32 = 0.9;
pub const FILL_POSITION: [f32; 3] = [-3.0, -5.0, 2.0];

// Camera.
pub const CAMERA_POSITION: [f32; 3] = [0.0, 2.0, 5.0];
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Orbit controller.
pub const DAMPING_FACTOR: f32 = 0.05;
pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 15.0;
pub const ROTATE_SPEED: f32 = 0.005;
pub const ZOOM_SPEED: f32 = 0.5;

// Texture assets, resolved relative to the `assets/` directory.
pub const EARTH_TEXTURE: &str = "textures/earth_texture.jpg";
pub const ROCK_TEXTURE: &str = "textures/rock_texture.jpg";
pub const COOKIE_TEXTURE: &str = "textures/cookie_texture.jpg";

/// Expand a `0xrrggbb` literal into linear-ish float RGB the shaders expect.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_expands_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0]);
        let sandy = rgb(BOTTOM_PLACEHOLDER_RGB);
        assert!((sandy[0] - 244.0 / 255.0).abs() < 1e-6);
        assert!((sandy[1] - 164.0 / 255.0).abs() < 1e-6);
        assert!((sandy[2] - 96.0 / 255.0).abs() < 1e-6);
    }
}
