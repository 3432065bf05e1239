//! Scene-level behaviour that needs no GPU: the builder contracts, the
//! texture-completion handler and the camera's response to an empty frame.

use cgmath::Point3;
use image::GenericImageView;
use terradisc::{
    camera::{Camera, OrbitController},
    config,
    scene::{geometry, material, starfield},
};

#[test]
fn earth_builder_pairs_three_face_groups_with_three_materials() {
    let geometry = geometry::cylinder(
        config::EARTH_RADIUS,
        config::EARTH_THICKNESS,
        config::EARTH_SEGMENTS,
    );
    let materials = material::earth_materials();

    assert_eq!(geometry.groups.len(), 3);
    assert_eq!(materials.len(), 3);
    for (group, material) in geometry.groups.iter().zip(materials.iter()) {
        assert_eq!(group.name, material.name);
    }
}

#[test]
fn star_field_honours_count_and_spread() {
    let stars = starfield::star_positions(config::STAR_SEED, config::STAR_COUNT, config::STAR_SPREAD);
    assert_eq!(stars.len(), 5000);
    for star in &stars {
        for &component in &star.position {
            assert!((-50.0..50.0).contains(&component));
        }
    }
}

/// The distilled end-to-end scenario: build the scene description, let the
/// texture loads complete (cookie through its dedicated handler), advance the
/// controller one frame with no input. The bottom face must sample the
/// cookie, the top face the earth map, and the camera must still sit at its
/// configured starting position.
#[test]
fn static_frame_after_texture_loads() {
    let [mut side, mut top, mut bottom] = material::earth_materials();

    // Before any load completes, the bottom face is the flat placeholder.
    assert!(bottom.map.is_none());
    assert_eq!(bottom.base_color, config::rgb(0xf4a460));

    // Distinct dimensions stand in for the three decoded assets.
    let rock = image::DynamicImage::new_rgba8(8, 8);
    let earth = image::DynamicImage::new_rgba8(16, 8);
    let cookie = image::DynamicImage::new_rgba8(4, 4);

    side.set_map(rock);
    top.set_map(earth);
    material::apply_bottom_texture(&mut bottom, cookie);

    let top_map = top.map.as_ref().expect("top face samples the earth map");
    assert_eq!((top_map.width(), top_map.height()), (16, 8));
    let bottom_map = bottom.map.as_ref().expect("bottom face samples the cookie");
    assert_eq!((bottom_map.width(), bottom_map.height()), (4, 4));
    assert_eq!(bottom.repeat, [1.0, 1.0]);
    assert!(side.needs_update && top.needs_update && bottom.needs_update);

    // One frame without input leaves the camera on its configured pose.
    let mut camera = Camera::from_position(config::CAMERA_POSITION.into(), Point3::new(0.0, 0.0, 0.0));
    let mut controller = OrbitController::new(
        config::DAMPING_FACTOR,
        config::MIN_DISTANCE,
        config::MAX_DISTANCE,
    );
    controller.update(&mut camera);
    let position = camera.position();
    assert!((position.x - config::CAMERA_POSITION[0]).abs() < 1e-5);
    assert!((position.y - config::CAMERA_POSITION[1]).abs() < 1e-5);
    assert!((position.z - config::CAMERA_POSITION[2]).abs() < 1e-5);
}

#[test]
fn zoom_is_clamped_however_hard_the_wheel_spins() {
    let mut camera = Camera::from_position(config::CAMERA_POSITION.into(), Point3::new(0.0, 0.0, 0.0));
    let mut controller = OrbitController::new(
        config::DAMPING_FACTOR,
        config::MIN_DISTANCE,
        config::MAX_DISTANCE,
    );
    for amount in [1.0e3, 1.0e9, -1.0e3, -1.0e9] {
        controller.zoom(amount);
        for _ in 0..240 {
            controller.update(&mut camera);
            assert!(
                (config::MIN_DISTANCE..=config::MAX_DISTANCE).contains(&camera.distance),
                "distance {} escaped the zoom bounds for input {amount}",
                camera.distance
            );
        }
    }
}
