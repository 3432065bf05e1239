//! Procedural geometry for the disc scene.
//!
//! Everything here is CPU-side: plain vertex/index vectors that the scene
//! uploads once at startup. The cylinder is produced as three face groups in
//! the fixed order `[side, top, bottom]` so the material list lines up by
//! index.

use std::f32::consts::TAU;

use crate::scene::mesh::{MeshVertex, PositionVertex};

/// An index range of a mesh, drawn with its own material.
#[derive(Clone, Debug)]
pub struct GeometryGroup {
    pub name: &'static str,
    pub indices: Vec<u32>,
}

/// CPU mesh data: one vertex list plus per-face-group index lists.
#[derive(Clone, Debug)]
pub struct MeshGeometry {
    pub vertices: Vec<MeshVertex>,
    pub groups: Vec<GeometryGroup>,
}

/// Build a capped cylinder around the Y axis.
///
/// The side wall wraps its UVs once around (tiling is the material's repeat
/// factor, not the geometry's), the caps are planar-mapped. Face groups come
/// back as `[side, top, bottom]`, always exactly three.
pub fn cylinder(radius: f32, thickness: f32, segments: u32) -> MeshGeometry {
    let n = segments as usize;
    let half = thickness / 2.0;
    let mut vertices = Vec::with_capacity(2 * (n + 1) + 2 * (n + 1));

    // Side wall: a seam column is duplicated so UVs can run 0..1.
    for i in 0..=n {
        let theta = i as f32 / n as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = [cos, 0.0, sin];
        let u = i as f32 / n as f32;
        vertices.push(MeshVertex {
            position: [radius * cos, half, radius * sin],
            tex_coords: [u, 0.0],
            normal,
        });
        vertices.push(MeshVertex {
            position: [radius * cos, -half, radius * sin],
            tex_coords: [u, 1.0],
            normal,
        });
    }

    let mut side = Vec::with_capacity(n * 6);
    for i in 0..n as u32 {
        let top = 2 * i;
        let bottom = 2 * i + 1;
        let next_top = 2 * i + 2;
        let next_bottom = 2 * i + 3;
        side.extend_from_slice(&[top, next_top, bottom, bottom, next_top, next_bottom]);
    }

    // Caps: a centre vertex plus one ring each, planar UVs.
    let top_center = vertices.len() as u32;
    vertices.push(MeshVertex {
        position: [0.0, half, 0.0],
        tex_coords: [0.5, 0.5],
        normal: [0.0, 1.0, 0.0],
    });
    let top_ring = vertices.len() as u32;
    for i in 0..n {
        let theta = i as f32 / n as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        vertices.push(MeshVertex {
            position: [radius * cos, half, radius * sin],
            tex_coords: [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
            normal: [0.0, 1.0, 0.0],
        });
    }

    let mut top = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let next = (i + 1) % n as u32;
        top.extend_from_slice(&[top_center, top_ring + next, top_ring + i]);
    }

    let bottom_center = vertices.len() as u32;
    vertices.push(MeshVertex {
        position: [0.0, -half, 0.0],
        tex_coords: [0.5, 0.5],
        normal: [0.0, -1.0, 0.0],
    });
    let bottom_ring = vertices.len() as u32;
    for i in 0..n {
        let theta = i as f32 / n as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        vertices.push(MeshVertex {
            position: [radius * cos, -half, radius * sin],
            tex_coords: [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
            normal: [0.0, -1.0, 0.0],
        });
    }

    let mut bottom = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let next = (i + 1) % n as u32;
        bottom.extend_from_slice(&[bottom_center, bottom_ring + i, bottom_ring + next]);
    }

    MeshGeometry {
        vertices,
        groups: vec![
            GeometryGroup {
                name: "side",
                indices: side,
            },
            GeometryGroup {
                name: "top",
                indices: top,
            },
            GeometryGroup {
                name: "bottom",
                indices: bottom,
            },
        ],
    }
}

/// Circle outline in the XY plane as a line list (two vertices per segment).
///
/// The rim overlays clone this geometry and place themselves with literal
/// transforms: an X rotation of ∓90° and a Y offset of ±thickness/2.
pub fn ring_outline(radius: f32, segments: u32) -> Vec<PositionVertex> {
    let n = segments as usize;
    let mut vertices = Vec::with_capacity(n * 2);
    for i in 0..n {
        for step in [i, (i + 1) % n] {
            let theta = step as f32 / n as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(PositionVertex {
                position: [radius * cos, radius * sin, 0.0],
            });
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn earth_geometry() -> MeshGeometry {
        cylinder(
            config::EARTH_RADIUS,
            config::EARTH_THICKNESS,
            config::EARTH_SEGMENTS,
        )
    }

    #[test]
    fn cylinder_has_three_groups_in_fixed_order() {
        let geometry = earth_geometry();
        let names: Vec<_> = geometry.groups.iter().map(|g| g.name).collect();
        assert_eq!(names, ["side", "top", "bottom"]);
    }

    #[test]
    fn group_index_counts_match_segment_count() {
        let n = config::EARTH_SEGMENTS as usize;
        let geometry = earth_geometry();
        assert_eq!(geometry.groups[0].indices.len(), n * 6);
        assert_eq!(geometry.groups[1].indices.len(), n * 3);
        assert_eq!(geometry.groups[2].indices.len(), n * 3);
    }

    #[test]
    fn all_indices_are_in_bounds_and_groups_are_disjoint() {
        let geometry = earth_geometry();
        let vertex_count = geometry.vertices.len() as u32;
        let mut seen: Vec<std::collections::HashSet<u32>> = Vec::new();
        for group in &geometry.groups {
            let indices: std::collections::HashSet<u32> = group.indices.iter().copied().collect();
            assert!(indices.iter().all(|&i| i < vertex_count));
            for earlier in &seen {
                assert!(earlier.is_disjoint(&indices), "face groups share vertices");
            }
            seen.push(indices);
        }
    }

    #[test]
    fn vertices_stay_on_the_configured_radius_and_thickness() {
        let geometry = earth_geometry();
        for vertex in &geometry.vertices {
            let [x, y, z] = vertex.position;
            let planar = (x * x + z * z).sqrt();
            assert!(planar <= config::EARTH_RADIUS + 1e-4);
            assert!(y.abs() <= config::EARTH_THICKNESS / 2.0 + 1e-6);
        }
    }

    #[test]
    fn side_normals_are_horizontal_unit_vectors() {
        let geometry = earth_geometry();
        let side_indices = &geometry.groups[0].indices;
        for &i in side_indices {
            let normal = geometry.vertices[i as usize].normal;
            assert!(normal[1].abs() < 1e-6);
            let len = (normal[0] * normal[0] + normal[2] * normal[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn ring_outline_is_a_closed_line_list() {
        let segments = config::EARTH_SEGMENTS;
        let ring = ring_outline(config::EARTH_RADIUS, segments);
        assert_eq!(ring.len(), segments as usize * 2);
        // Each segment's end is the next segment's start; the last wraps back
        // to the first vertex.
        for i in 0..segments as usize {
            let end = ring[i * 2 + 1];
            let next_start = ring[(i * 2 + 2) % ring.len()];
            assert_eq!(end, next_start);
        }
        for vertex in &ring {
            let [x, y, z] = vertex.position;
            assert!(((x * x + y * y).sqrt() - config::EARTH_RADIUS).abs() < 1e-4);
            assert_eq!(z, 0.0);
        }
    }
}
