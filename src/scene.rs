//! The mutable state of one viewer session.
//!
//! A [`Scene`] owns everything that user commands edit: the displayed object,
//! the ground plane, the light, the orbit camera and the projection mode. It is
//! owned by the application and mutated only from the event loop.

use std::path::Path;

use glam::{Vec2, Vec3, Vec4};

use crate::command::{Command, Sign};
use crate::geometry::{GeometryError, MeshData};
use crate::light::Light;
use crate::material::Material;
use crate::orbit_camera::OrbitCamera;
use crate::transform::Transform;

/// A mesh with its placement and surface response.
#[derive(Clone, Debug)]
pub struct Drawable {
    pub mesh: MeshData,
    pub transform: Transform,
    pub material: Material,
}

impl Drawable {
    fn object(mesh: MeshData) -> Self {
        Self {
            mesh,
            transform: Transform::new()
                .with_translation(Vec3::new(0.0, 0.5, 0.0))
                .with_uniform_scale(0.8),
            material: Material::new(
                Vec4::new(0.2, 0.0, 0.0, 1.0),
                Vec4::new(0.8, 0.1, 0.1, 1.0),
                Vec4::ONE,
                50.0,
            ),
        }
    }

    fn ground_plane() -> Self {
        Self {
            mesh: MeshData::square(Vec3::splat(0.6)),
            // Slightly below y = 0 so the projected shadow wins the depth test.
            transform: Transform::new()
                .with_translation(Vec3::new(0.0, -0.01, 0.0))
                .with_rotation(Vec3::new(-90.0, 0.0, 0.0))
                .with_uniform_scale(4.0),
            material: Material::new(
                Vec4::new(0.2, 0.2, 0.2, 1.0),
                Vec4::new(0.6, 0.6, 0.6, 1.0),
                Vec4::new(0.0, 0.0, 0.0, 1.0),
                1.0,
            ),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub object: Drawable,
    pub plane: Drawable,
    pub light: Light,
    pub camera: OrbitCamera,
    pub orthographic: bool,
}

impl Scene {
    pub fn new(object_mesh: MeshData) -> Self {
        Self {
            object: Drawable::object(object_mesh),
            plane: Drawable::ground_plane(),
            light: Light::default(),
            camera: OrbitCamera::default(),
            orthographic: false,
        }
    }

    /// Restores object, plane and light to their startup state.
    ///
    /// The camera and projection mode are left alone.
    pub fn reset_defaults(&mut self) {
        let mesh = std::mem::take(&mut self.object.mesh);
        self.object = Drawable::object(mesh);
        self.plane = Drawable::ground_plane();
        self.light = Light::default();
    }

    /// Replaces the object's geometry from `path` and resets the scene defaults.
    ///
    /// On failure the current mesh and all scene state stay untouched.
    pub fn reload_object(&mut self, path: impl AsRef<Path>) -> Result<(), GeometryError> {
        self.object.mesh.reload(path)?;
        self.reset_defaults();
        Ok(())
    }

    /// Applies a command that edits scene state.
    ///
    /// Returns `false` for commands the scene does not own (exit, help and mesh
    /// loading), which the caller must handle.
    pub fn apply(&mut self, command: Command) -> bool {
        let material = &mut self.object.material;
        match command {
            Command::AdjustMaterial {
                channel,
                axis,
                sign: Sign::Increase,
            } => material.increase(channel, axis),
            Command::AdjustMaterial {
                channel,
                axis,
                sign: Sign::Decrease,
            } => material.decrease(channel, axis),
            Command::AdjustShininess(Sign::Increase) => material.increase_shininess(),
            Command::AdjustShininess(Sign::Decrease) => material.decrease_shininess(),
            Command::ResetMaterial => material.reset(),
            Command::Camera(camera_command) => self.camera.keyboard_delta(camera_command),
            Command::ToggleProjection => self.orthographic = !self.orthographic,
            Command::Exit | Command::Help | Command::LoadMesh(_) => return false,
        }
        true
    }

    /// Moves the light under the cursor, keeping its height.
    pub fn place_light(&mut self, cursor: Vec2, viewport: Vec2) {
        self.light.place_from_pointer(cursor, viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MeshVariant;
    use crate::material::{ColorAxis, MaterialChannel};
    use crate::orbit_camera::CameraCommand;

    fn scene() -> Scene {
        Scene::new(MeshData::cube())
    }

    #[test]
    fn material_commands_edit_object_only() {
        let mut scene = scene();
        let plane_before = scene.plane.material;

        assert!(scene.apply(Command::AdjustMaterial {
            channel: MaterialChannel::Diffuse,
            axis: ColorAxis::Green,
            sign: Sign::Increase,
        }));
        assert!((scene.object.material.diffuse().y - 0.2).abs() < 1e-5);
        assert_eq!(scene.plane.material, plane_before);

        assert!(scene.apply(Command::AdjustShininess(Sign::Increase)));
        assert!((scene.object.material.shininess() - 75.0).abs() < 1e-4);

        assert!(scene.apply(Command::ResetMaterial));
        assert_eq!(scene.object.material, Material::default());
    }

    #[test]
    fn app_level_commands_are_not_consumed() {
        let mut scene = scene();
        assert!(!scene.apply(Command::Exit));
        assert!(!scene.apply(Command::Help));
        assert!(!scene.apply(Command::LoadMesh(MeshVariant::Sphere)));
    }

    #[test]
    fn projection_toggles() {
        let mut scene = scene();
        scene.apply(Command::ToggleProjection);
        assert!(scene.orthographic);
        scene.apply(Command::ToggleProjection);
        assert!(!scene.orthographic);
    }

    #[test]
    fn reset_defaults_keeps_camera_and_mesh() {
        let mut scene = scene();
        scene.apply(Command::Camera(CameraCommand::RotateCcw));
        scene.apply(Command::ResetMaterial);
        scene.light.set_translation(Vec3::new(3.0, 2.0, -3.0));
        let azimuth = scene.camera.azimuth;

        scene.reset_defaults();

        assert_eq!(scene.camera.azimuth, azimuth);
        assert_eq!(scene.object.mesh, MeshData::cube());
        assert_eq!(scene.light.position(), Light::default().position());
        assert!((scene.object.material.shininess() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn failed_reload_keeps_state() {
        let mut scene = scene();
        scene.apply(Command::ResetMaterial);
        let missing = std::env::temp_dir().join("umbra_scene_missing_mesh.off");
        let _ = std::fs::remove_file(&missing);

        assert!(scene.reload_object(&missing).is_err());
        assert_eq!(scene.object.mesh, MeshData::cube());
        assert_eq!(scene.object.material, Material::default());
    }

    #[test]
    fn successful_reload_resets_defaults() {
        let path = std::env::temp_dir().join("umbra_scene_reload.off");
        std::fs::write(&path, "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();

        let mut scene = scene();
        scene.apply(Command::ResetMaterial);
        scene.reload_object(&path).unwrap();

        assert_eq!(scene.object.mesh.len(), 3);
        assert!((scene.object.material.shininess() - 50.0).abs() < 1e-6);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn light_follows_pointer() {
        let mut scene = scene();
        scene.place_light(Vec2::new(300.0, 300.0), Vec2::new(600.0, 600.0));
        let position = scene.light.position();
        assert!(position.x.abs() < 1e-5 && position.z.abs() < 1e-5);
        assert!((position.y - 2.0).abs() < 1e-6);
    }
}
