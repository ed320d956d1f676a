use bevy::prelude::*;

/// A solid contact between two colliders, measured with the velocities the
/// bodies had going into it.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ImpactEvent {
    /// The body that was moving (it carries `PreStepVelocity`)
    pub entity: Entity,
    /// The other collider, when known
    pub other: Option<Entity>,
    /// Velocity of `entity` relative to `other` just before contact
    pub relative_velocity: Vec3,
    /// Centre of `entity` at contact time
    pub contact_point: Vec3,
}

impl ImpactEvent {
    pub fn with_ground(entity: Entity, relative_velocity: Vec3, contact_point: Vec3) -> Self {
        Self {
            entity,
            other: None,
            relative_velocity,
            contact_point,
        }
    }

    /// Magnitude of the relative contact velocity
    pub fn impact_speed(&self) -> f32 {
        self.relative_velocity.length()
    }
}

/// Message fired when a collider crosses a trigger volume boundary
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Entered { trigger: Entity, entity: Entity },
    Exited { trigger: Entity, entity: Entity },
}
