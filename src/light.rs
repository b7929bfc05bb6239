//! The single positional light of the scene.

use glam::{Vec2, Vec3, Vec4};

use crate::transform::Transform;

/// Half-extent of the square region of the `y = const` plane that pointer
/// presses can place the light in.
pub const LIGHT_PLANE_EXTENT: f32 = 4.0;

/// A point light with Phong emission terms.
///
/// The position lives in a [`Transform`], so moving the light goes through the
/// same `set_translation` contract as any drawable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    transform: Transform,
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            transform: Transform::new().with_translation(Vec3::new(1.0, 2.0, 1.0)),
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
        }
    }
}

impl Light {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_translation(&mut self, position: Vec3) {
        self.transform.set_translation(position);
    }

    /// World-space position of the light.
    pub fn position(&self) -> Vec3 {
        self.transform.translation()
    }

    pub fn ambient(&self) -> Vec4 {
        self.ambient
    }

    pub fn diffuse(&self) -> Vec4 {
        self.diffuse
    }

    pub fn specular(&self) -> Vec4 {
        self.specular
    }

    pub fn set_ambient(&mut self, ambient: Vec4) {
        self.ambient = ambient;
    }

    pub fn set_diffuse(&mut self, diffuse: Vec4) {
        self.diffuse = diffuse;
    }

    pub fn set_specular(&mut self, specular: Vec4) {
        self.specular = specular;
    }

    /// Moves the light to the plane point under a pointer press.
    ///
    /// Only x and z change; the light keeps its height.
    pub fn place_from_pointer(&mut self, cursor: Vec2, viewport: Vec2) {
        let plane = pointer_to_light_plane(cursor, viewport);
        let mut position = self.position();
        position.x = plane.x;
        position.z = plane.y;
        self.set_translation(position);
    }
}

/// Maps window coordinates to `(x, z)` on the light plane.
///
/// The window centre maps to the origin and the window edges map to
/// `±LIGHT_PLANE_EXTENT`. Screen "up" points towards negative z.
pub fn pointer_to_light_plane(cursor: Vec2, viewport: Vec2) -> Vec2 {
    let half = viewport * 0.5;
    let x = (cursor.x - half.x) / half.x * LIGHT_PLANE_EXTENT;
    let up = (viewport.y - cursor.y - half.y) / half.y * LIGHT_PLANE_EXTENT;
    Vec2::new(x, -up)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(600.0, 600.0);

    #[test]
    fn centre_click_maps_to_origin() {
        let p = pointer_to_light_plane(Vec2::new(300.0, 300.0), VIEWPORT);
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn top_right_corner_maps_to_extent() {
        let p = pointer_to_light_plane(Vec2::new(600.0, 0.0), VIEWPORT);
        assert_eq!(p.x, LIGHT_PLANE_EXTENT);
        assert_eq!(p.y, -LIGHT_PLANE_EXTENT);
    }

    #[test]
    fn bottom_left_corner_maps_to_opposite_extent() {
        let p = pointer_to_light_plane(Vec2::new(0.0, 600.0), VIEWPORT);
        assert_eq!(p.x, -LIGHT_PLANE_EXTENT);
        assert_eq!(p.y, LIGHT_PLANE_EXTENT);
    }

    #[test]
    fn placing_keeps_height() {
        let mut light = Light::new();
        light.place_from_pointer(Vec2::new(450.0, 150.0), VIEWPORT);

        let position = light.position();
        assert_eq!(position.y, 2.0);
        assert!((position.x - 2.0).abs() < 1e-6);
        assert!((position.z + 2.0).abs() < 1e-6);
    }

    #[test]
    fn default_light_sits_above_the_ground() {
        let light = Light::default();
        assert_eq!(light.position(), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(light.ambient(), Vec4::new(0.2, 0.2, 0.2, 1.0));
        assert_eq!(light.diffuse(), Vec4::ONE);
    }
}
