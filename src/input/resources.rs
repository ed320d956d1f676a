use bevy::prelude::*;

use crate::input::events::Action;

/// Continuous axes for this frame
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    /// x = strafe right, y = forward; length at most 1
    pub movement: Vec2,
    /// Look delta in radians for this frame (x = yaw right, y = pitch down)
    pub look: Vec2,
    pub running: bool,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlScheme {
    #[default]
    KeyboardMouse,
    Gamepad,
}

impl ControlScheme {
    /// Button glyph for an action under this scheme
    pub fn glyph(&self, action: Action, bindings: &InputBindings) -> String {
        match self {
            ControlScheme::KeyboardMouse => match action {
                Action::Throw => "LMB".to_string(),
                _ => key_label(bindings.key_for(action)),
            },
            ControlScheme::Gamepad => match action {
                Action::Interact => "(X)".to_string(),
                Action::Jump => "(A)".to_string(),
                Action::Run => "(L3)".to_string(),
                Action::Throw => "(RT)".to_string(),
                Action::Pause => "(Start)".to_string(),
            },
        }
    }
}

fn key_label(key: KeyCode) -> String {
    let label = format!("{:?}", key);
    label.strip_prefix("Key").unwrap_or(&label).to_string()
}

/// Device bindings and sensitivities
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputBindings {
    pub interact: KeyCode,
    pub jump: KeyCode,
    pub run: KeyCode,
    pub pause: KeyCode,
    pub throw_mouse: MouseButton,
    pub interact_pad: GamepadButton,
    pub jump_pad: GamepadButton,
    pub run_pad: GamepadButton,
    pub throw_pad: GamepadButton,
    pub pause_pad: GamepadButton,
    /// Radians per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Radians per second at full stick deflection
    pub stick_look_speed: f32,
    pub stick_deadzone: f32,
}

impl InputBindings {
    pub fn key_for(&self, action: Action) -> KeyCode {
        match action {
            Action::Interact => self.interact,
            Action::Jump => self.jump,
            Action::Run => self.run,
            Action::Pause => self.pause,
            // Throw lives on the mouse; keyboard fallback
            Action::Throw => KeyCode::KeyF,
        }
    }

    pub fn pad_for(&self, action: Action) -> GamepadButton {
        match action {
            Action::Interact => self.interact_pad,
            Action::Jump => self.jump_pad,
            Action::Run => self.run_pad,
            Action::Throw => self.throw_pad,
            Action::Pause => self.pause_pad,
        }
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            interact: KeyCode::KeyE,
            jump: KeyCode::Space,
            run: KeyCode::ShiftLeft,
            pause: KeyCode::Escape,
            throw_mouse: MouseButton::Left,
            interact_pad: GamepadButton::West,
            jump_pad: GamepadButton::South,
            run_pad: GamepadButton::LeftThumb,
            throw_pad: GamepadButton::RightTrigger2,
            pause_pad: GamepadButton::Start,
            mouse_sensitivity: 0.002,
            stick_look_speed: 3.0,
            stick_deadzone: 0.15,
        }
    }
}
