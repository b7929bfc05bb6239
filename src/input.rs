use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::command::{Command, MeshVariant, Sign};
use crate::material::{ColorAxis, MaterialChannel};
use crate::orbit_camera::CameraCommand;

/// Something the viewer should react to, decoded from a window event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputAction {
    Command(Command),
    /// Primary button pressed at this cursor position (physical pixels).
    PointerPress(Vec2),
}

/// Tracks the modifier and cursor state needed to decode window events.
#[derive(Default)]
pub struct Input {
    shift: bool,
    mouse_position: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event, returning the action it triggers, if any.
    ///
    /// Key repeats are ignored so one physical press yields one command.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                let PhysicalKey::Code(key) = event.physical_key else {
                    return None;
                };
                key_command(key, self.shift).map(InputAction::Command)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Vec2::new(position.x as f32, position.y as f32);
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => Some(InputAction::PointerPress(self.mouse_position)),
            _ => None,
        }
    }
}

/// Maps a key press to its command. `shift` picks the decreasing variant.
pub fn key_command(key: KeyCode, shift: bool) -> Option<Command> {
    let sign = if shift { Sign::Decrease } else { Sign::Increase };
    let material = |channel, axis| {
        Some(Command::AdjustMaterial {
            channel,
            axis,
            sign,
        })
    };
    let camera = |increase, decrease| {
        Some(Command::Camera(if shift { decrease } else { increase }))
    };

    match key {
        KeyCode::Escape => Some(Command::Exit),
        KeyCode::KeyH => Some(Command::Help),

        KeyCode::KeyQ => Some(Command::LoadMesh(MeshVariant::Sphere)),
        KeyCode::KeyA => Some(Command::LoadMesh(MeshVariant::Pikachu)),
        KeyCode::KeyW => Some(Command::LoadMesh(MeshVariant::Squirtle)),
        KeyCode::KeyS => Some(Command::LoadMesh(MeshVariant::SphereCoarse)),

        KeyCode::Digit1 => material(MaterialChannel::Ambient, ColorAxis::Red),
        KeyCode::Digit2 => material(MaterialChannel::Ambient, ColorAxis::Green),
        KeyCode::Digit3 => material(MaterialChannel::Ambient, ColorAxis::Blue),
        KeyCode::Digit4 => material(MaterialChannel::Diffuse, ColorAxis::Red),
        KeyCode::Digit5 => material(MaterialChannel::Diffuse, ColorAxis::Green),
        KeyCode::Digit6 => material(MaterialChannel::Diffuse, ColorAxis::Blue),
        KeyCode::Digit7 => material(MaterialChannel::Specular, ColorAxis::Red),
        KeyCode::Digit8 => material(MaterialChannel::Specular, ColorAxis::Green),
        KeyCode::Digit9 => material(MaterialChannel::Specular, ColorAxis::Blue),
        KeyCode::Digit0 => Some(Command::AdjustShininess(sign)),
        KeyCode::Minus if !shift => Some(Command::ResetMaterial),

        KeyCode::Space => Some(Command::Camera(CameraCommand::Reset)),
        KeyCode::KeyU => camera(CameraCommand::RotateCcw, CameraCommand::RotateCw),
        KeyCode::KeyI => camera(CameraCommand::Raise, CameraCommand::Lower),
        KeyCode::KeyO => camera(CameraCommand::ZoomOut, CameraCommand::ZoomIn),
        KeyCode::KeyP => Some(Command::ToggleProjection),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_selects_decrease() {
        assert_eq!(
            key_command(KeyCode::Digit5, false),
            Some(Command::AdjustMaterial {
                channel: MaterialChannel::Diffuse,
                axis: ColorAxis::Green,
                sign: Sign::Increase,
            })
        );
        assert_eq!(
            key_command(KeyCode::Digit5, true),
            Some(Command::AdjustMaterial {
                channel: MaterialChannel::Diffuse,
                axis: ColorAxis::Green,
                sign: Sign::Decrease,
            })
        );
        assert_eq!(
            key_command(KeyCode::Digit0, true),
            Some(Command::AdjustShininess(Sign::Decrease))
        );
    }

    #[test]
    fn camera_keys_pair_opposite_directions() {
        let pairs = [
            (KeyCode::KeyU, CameraCommand::RotateCcw, CameraCommand::RotateCw),
            (KeyCode::KeyI, CameraCommand::Raise, CameraCommand::Lower),
            (KeyCode::KeyO, CameraCommand::ZoomOut, CameraCommand::ZoomIn),
        ];
        for (key, plain, shifted) in pairs {
            assert_eq!(key_command(key, false), Some(Command::Camera(plain)));
            assert_eq!(key_command(key, true), Some(Command::Camera(shifted)));
        }
        assert_eq!(
            key_command(KeyCode::Space, true),
            Some(Command::Camera(CameraCommand::Reset))
        );
    }

    #[test]
    fn material_reset_ignores_shifted_minus() {
        assert_eq!(key_command(KeyCode::Minus, false), Some(Command::ResetMaterial));
        assert_eq!(key_command(KeyCode::Minus, true), None);
    }

    #[test]
    fn load_keys_select_variants() {
        assert_eq!(
            key_command(KeyCode::KeyA, false),
            Some(Command::LoadMesh(MeshVariant::Pikachu))
        );
        assert_eq!(
            key_command(KeyCode::KeyS, false),
            Some(Command::LoadMesh(MeshVariant::SphereCoarse))
        );
        assert_eq!(key_command(KeyCode::KeyZ, false), None);
    }
}
