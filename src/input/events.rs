use bevy::prelude::*;

use crate::input::resources::ControlScheme;

/// Discrete player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Interact,
    Jump,
    Run,
    Throw,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    Pressed,
    Released,
}

/// Message fired when an action's button goes down or up
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: Action,
    pub phase: ActionPhase,
}

impl ActionEvent {
    pub fn pressed(action: Action) -> Self {
        Self {
            action,
            phase: ActionPhase::Pressed,
        }
    }

    pub fn released(action: Action) -> Self {
        Self {
            action,
            phase: ActionPhase::Released,
        }
    }

    pub fn is_press_of(&self, action: Action) -> bool {
        self.action == action && self.phase == ActionPhase::Pressed
    }
}

/// Message fired once when the player switches between keyboard/mouse and gamepad
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSchemeChanged {
    pub scheme: ControlScheme,
}
