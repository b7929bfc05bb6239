//! Hard planar shadows cast by a point light onto the ground plane `y = 0`.
//!
//! [`planar_shadow_matrix`] builds a projective matrix `S` that sends every
//! world-space point `P` to the spot where the ray from the light through `P`
//! meets the ground. Composed with a model matrix `M`, `S · M` is drawn with the
//! same view and projection as the lit object, so the shadow needs no extra
//! render pass or depth buffer.
//!
//! For a light at `L = (lx, ly, lz)` and `P = (x, y, z, 1)` the matrix yields
//!
//! ```text
//! x' = ly·x − lx·y
//! y' = 0
//! z' = ly·z − lz·y
//! w' = ly − y
//! ```
//!
//! and the perspective divide by `w'` finishes the ray–plane intersection.
//! A light lying on the plane (`ly = 0`) produces a singular matrix; the shadow
//! is then degenerate but nothing fails.

use glam::{Mat4, Vec3, Vec4};

/// Returns the matrix flattening world-space geometry onto `y = 0` as seen
/// from a point light at `light`.
pub fn planar_shadow_matrix(light: Vec3) -> Mat4 {
    let Vec3 { x: lx, y: ly, z: lz } = light;
    Mat4::from_cols(
        Vec4::new(ly, 0.0, 0.0, 0.0),
        Vec4::new(-lx, 0.0, -lz, -1.0),
        Vec4::new(0.0, 0.0, ly, 0.0),
        Vec4::new(0.0, 0.0, 0.0, ly),
    )
}

/// Model matrix for drawing the shadow of an object whose model matrix is
/// `model`.
pub fn shadow_model_matrix(light: Vec3, model: Mat4) -> Mat4 {
    planar_shadow_matrix(light) * model
}
