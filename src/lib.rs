//! # Umbra
//!
//! **An interactive Phong mesh viewer with planar shadows.**
//!
//! A single object stands on a ground plane under one point light. The object
//! is lit per fragment and casts a flat shadow, projected onto the plane from
//! the light position. The keyboard edits the material and orbits the camera.
//! A left click moves the light.
//!
//! ## Quick Start
//!
//! ```no_run
//! use umbra::{ViewerConfig, run};
//!
//! fn main() -> umbra::Result<()> {
//!     run(ViewerConfig::new().assets_dir("assets"))
//! }
//! ```
//!
//! ## Scene math
//!
//! The pieces that do not touch the GPU are usable on their own:
//!
//! ```
//! use umbra::{CameraCommand, OrbitCamera, Transform, Vec3, planar_shadow_matrix};
//!
//! let model = Transform::new()
//!     .with_translation(Vec3::new(0.0, 0.5, 0.0))
//!     .with_uniform_scale(0.8)
//!     .model_matrix();
//!
//! let shadow = planar_shadow_matrix(Vec3::new(1.0, 2.0, 1.0)) * model;
//! let ground = shadow.project_point3(Vec3::ZERO);
//! assert!(ground.y.abs() < 1e-6);
//!
//! let mut camera = OrbitCamera::new();
//! camera.keyboard_delta(CameraCommand::ZoomIn);
//! camera.update_camera();
//! assert!((camera.eye().length() - 3.9).abs() < 1e-5);
//! ```

mod app;
mod command;
mod composer;
mod error;
mod geometry;
mod gpu;
mod input;
mod light;
mod logging;
mod material;
mod mesh;
mod orbit_camera;
mod phong_pass;
mod scene;
mod shadow;
mod transform;

pub use app::{ViewerConfig, run};
pub use command::{Command, HELP, MeshVariant, Sign};
pub use composer::{DrawCall, DrawTarget, Renderer, Shading, compose_frame};
pub use error::{Result, ViewerError};
pub use geometry::{GeometryError, MeshData};
pub use gpu::GpuContext;
pub use input::{Input, InputAction, key_command};
pub use light::{LIGHT_PLANE_EXTENT, Light, pointer_to_light_plane};
pub use logging::init_logging;
pub use material::{ColorAxis, Material, MaterialChannel};
pub use mesh::{GpuMesh, Vertex};
pub use orbit_camera::{CameraCommand, OrbitCamera};
pub use phong_pass::{DrawUniforms, FrameRecorder, PhongPass, SceneMeshes};
pub use scene::{Drawable, Scene};
pub use shadow::{planar_shadow_matrix, shadow_model_matrix};
pub use transform::Transform;

// Re-export math types
pub use glam::{Mat4, Vec2, Vec3, Vec4};
