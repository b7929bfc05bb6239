//! Placement of a single object in world space.
//!
//! A [`Transform`] stores translation, Euler rotation and scale as three
//! independent pieces of state. Each setter replaces its piece wholesale and
//! the model matrix is derived on demand:
//!
//! ```text
//! model = T(translation) · Rx(rotation.x) · Ry(rotation.y) · Rz(rotation.z) · S(scale)
//! ```
//!
//! # Example
//!
//! ```
//! use umbra::{Transform, Vec3};
//!
//! let mut transform = Transform::new();
//! transform.set_translation(Vec3::new(0.0, 0.5, 0.0));
//! transform.set_scale(Vec3::splat(0.8));
//!
//! let model = transform.model_matrix();
//! assert_eq!(model.w_axis.y, 0.5);
//! ```

use glam::{Mat4, Vec3};

/// Translation, rotation and scale for one drawable.
///
/// Rotation is a vector of Euler angles in **degrees**, applied X first,
/// then Y, then Z (in the matrix product they appear as `Rx · Ry · Rz`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates an identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_translation`](Self::set_translation).
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.set_translation(translation);
        self
    }

    /// Builder form of [`set_rotation`](Self::set_rotation).
    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.set_rotation(degrees);
        self
    }

    /// Builder form of [`set_scale`](Self::set_scale).
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// Sets uniform scale on all axes.
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Replaces the Euler angles, in degrees.
    pub fn set_rotation(&mut self, degrees: Vec3) {
        self.rotation = degrees;
    }

    /// Replaces the scale factors.
    ///
    /// Negative components are clamped to zero. A zero component flattens the
    /// object on that axis and makes the model matrix singular; that is allowed.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale.max(Vec3::ZERO);
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Composes the model matrix from the current state.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_scale(self.scale)
    }
}
