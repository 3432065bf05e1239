//! terradisc
//!
//! A single-scene 3D visualization demo: a flat Earth rendered as a textured
//! cylinder (rocky sides, earth map on top, a cookie underneath), floating in
//! a star field, with an orbital camera. Built directly on wgpu and winit
//! with a small retained scene layer.
//!
//! High-level modules
//! - `camera`: orbit camera, projection and view/projection uniforms
//! - `config`: every scene tunable as a named constant
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `flow`: the application event loop and per-frame cadence
//! - `pipelines`: render pipelines for meshes, line overlays and points
//! - `render`: render composition and the single-steppable frame renderer
//! - `resources`: asynchronous texture loading
//! - `scene`: scene graph, geometry, materials, lighting and the star field
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
