//! Per-frame draw ordering.
//!
//! [`compose_frame`] turns a [`Scene`] into an ordered list of [`DrawCall`]s and
//! hands each one to a [`Renderer`]. The order is fixed: the camera is updated
//! once, then the ground plane, the object and finally the object's planar
//! shadow are submitted with identical view and projection matrices.

use glam::{Mat4, Vec3};

use crate::light::Light;
use crate::material::Material;
use crate::scene::{Drawable, Scene};
use crate::shadow::shadow_model_matrix;

/// Which mesh of the scene a draw refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawTarget {
    Plane,
    Object,
}

/// How the fragments of a draw are coloured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shading {
    /// Phong lighting with the given surface and light parameters.
    Lit { material: Material, light: Light },
    /// A constant shadow colour, no lighting.
    FlatShadow,
}

/// Everything a renderer needs for one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub target: DrawTarget,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub shading: Shading,
}

impl DrawCall {
    pub fn is_flat_shadow(&self) -> bool {
        matches!(self.shading, Shading::FlatShadow)
    }
}

/// Receives draws in submission order.
pub trait Renderer {
    fn submit(&mut self, call: &DrawCall);
}

/// Composes one frame of `scene` into `renderer`.
pub fn compose_frame<R: Renderer + ?Sized>(scene: &mut Scene, renderer: &mut R) {
    scene.camera.update_camera();

    let view = scene.camera.view_matrix();
    let projection = scene.camera.projection_matrix(scene.orthographic);
    let eye = scene.camera.eye();
    let light = scene.light;

    let lit = |target: DrawTarget, drawable: &Drawable| DrawCall {
        target,
        model: drawable.transform.model_matrix(),
        view,
        projection,
        eye,
        shading: Shading::Lit {
            material: drawable.material,
            light,
        },
    };

    renderer.submit(&lit(DrawTarget::Plane, &scene.plane));

    let object = lit(DrawTarget::Object, &scene.object);
    renderer.submit(&object);

    renderer.submit(&DrawCall {
        model: shadow_model_matrix(light.position(), object.model),
        shading: Shading::FlatShadow,
        ..object
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshData;
    use crate::orbit_camera::CameraCommand;
    use crate::shadow::planar_shadow_matrix;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<DrawCall>,
    }

    impl Renderer for Recorder {
        fn submit(&mut self, call: &DrawCall) {
            self.calls.push(*call);
        }
    }

    fn compose(scene: &mut Scene) -> Vec<DrawCall> {
        let mut recorder = Recorder::default();
        compose_frame(scene, &mut recorder);
        recorder.calls
    }

    #[test]
    fn draws_plane_object_then_shadow() {
        let mut scene = Scene::new(MeshData::cube());
        let calls = compose(&mut scene);

        let targets: Vec<_> = calls.iter().map(|c| (c.target, c.is_flat_shadow())).collect();
        assert_eq!(
            targets,
            vec![
                (DrawTarget::Plane, false),
                (DrawTarget::Object, false),
                (DrawTarget::Object, true),
            ]
        );
    }

    #[test]
    fn camera_matrices_match_across_draws() {
        let mut scene = Scene::new(MeshData::cube());
        scene.camera.keyboard_delta(CameraCommand::RotateCw);
        let calls = compose(&mut scene);

        for call in &calls[1..] {
            assert_eq!(call.view, calls[0].view);
            assert_eq!(call.projection, calls[0].projection);
            assert_eq!(call.eye, calls[0].eye);
        }
        assert_eq!(calls[0].view, scene.camera.view_matrix());
    }

    #[test]
    fn shadow_uses_projected_object_matrix() {
        let mut scene = Scene::new(MeshData::cube());
        let calls = compose(&mut scene);

        let object_model = scene.object.transform.model_matrix();
        let expected = planar_shadow_matrix(scene.light.position()) * object_model;
        assert_eq!(calls[1].model, object_model);
        assert!(calls[2].model.abs_diff_eq(expected, 1e-6));
        assert_eq!(calls[2].shading, Shading::FlatShadow);
    }

    #[test]
    fn lit_draws_carry_their_own_material() {
        let mut scene = Scene::new(MeshData::cube());
        let calls = compose(&mut scene);

        assert_eq!(
            calls[0].shading,
            Shading::Lit {
                material: scene.plane.material,
                light: scene.light,
            }
        );
        assert_eq!(
            calls[1].shading,
            Shading::Lit {
                material: scene.object.material,
                light: scene.light,
            }
        );
    }

    #[test]
    fn projection_follows_scene_mode() {
        let mut scene = Scene::new(MeshData::cube());
        scene.orthographic = true;
        let calls = compose(&mut scene);
        assert_eq!(calls[0].projection, scene.camera.projection_matrix(true));
    }
}
