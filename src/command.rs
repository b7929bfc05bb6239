//! Discrete user commands, independent of any input library.
//!
//! Every physical input event is translated into at most one [`Command`] (see
//! [`input`](crate::input) for the keyboard mapping). Holding Shift selects the
//! [`Sign::Decrease`] direction of the same command.

use crate::material::{ColorAxis, MaterialChannel};
use crate::orbit_camera::CameraCommand;

/// Direction of a stepwise adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Increase,
    Decrease,
}

/// Meshes that can be loaded from the assets directory at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshVariant {
    Sphere,
    Pikachu,
    Squirtle,
    SphereCoarse,
}

impl MeshVariant {
    /// File name of the variant inside the assets directory.
    pub fn file_name(self) -> &'static str {
        match self {
            MeshVariant::Sphere => "sphere.off",
            MeshVariant::Pikachu => "Pikachu.off",
            MeshVariant::Squirtle => "Squirtle.off",
            MeshVariant::SphereCoarse => "sphere_coarse.off",
        }
    }
}

/// Everything the user can ask the viewer to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Exit,
    Help,
    LoadMesh(MeshVariant),
    AdjustMaterial {
        channel: MaterialChannel,
        axis: ColorAxis,
        sign: Sign,
    },
    AdjustShininess(Sign),
    ResetMaterial,
    Camera(CameraCommand),
    /// Switch between perspective and orthographic projection.
    ToggleProjection,
}

/// Usage text printed on startup and by [`Command::Help`].
pub const HELP: &str = "\
================================================
Left click to move the light.
================================================

Keyboard Usage
[Window]
ESC:      Exit
h:        Print help message

[Model]
-:        Reset material parameters
(shift) + 1/2/3:  Change ambient parameters
(shift) + 4/5/6:  Change diffuse parameters
(shift) + 7/8/9:  Change specular parameters
(shift) + 0:      Change shininess parameters

q:        Load sphere model
a:        Load Pikachu model
w:        Load Squirtle model
s:        Load sphere_coarse model

[Camera]
SPACE:            Reset camera parameters
u/(shift+u):      Increase/Decrease the rotate angle
i/(shift+i):      Increase/Decrease the up angle
o/(shift+o):      Increase/Decrease the camera radius
p:                Toggle orthographic projection
";
