use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::carry::components::LookSpeed;

/// Largest look angle above or below the horizon.
pub const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Downward acceleration applied to the body while airborne.
pub const FALL_ACCELERATION: f32 = 9.81;

/// Height of the floor the body stands on.
pub const GROUND_LEVEL: f32 = 0.0;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(LookAngles, LookSpeed, Velocity, PlayerMotion)]
pub struct Player {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            run_speed: 7.0,
            jump_speed: 5.0,
        }
    }
}

impl Player {
    pub fn speed(&self, running: bool) -> f32 {
        if running {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}

/// The first-person camera, a child of the player body.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerCamera;

/// Point in front of the camera that held items are pulled toward.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HoldAnchor;

/// Yaw is applied to the body, pitch to the camera.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Applies a look delta (x turns right, y looks down) and returns the
    /// angle actually swept, after pitch clamping.
    pub fn turn(&mut self, delta: Vec2) -> f32 {
        let yaw = self.yaw - delta.x;
        let pitch = (self.pitch - delta.y).clamp(-MAX_PITCH, MAX_PITCH);
        let swept = Vec2::new(yaw - self.yaw, pitch - self.pitch).length();
        self.yaw = yaw;
        self.pitch = pitch;
        swept
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    pub vertical_speed: f32,
    pub grounded: bool,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self {
            vertical_speed: 0.0,
            grounded: true,
        }
    }
}
