use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Linear velocity a body had before the last solver step. Contacts are
/// measured against it because rapier reports them after resolving the bounce.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct PreStepVelocity(pub Vec3);

/// Switches gravity on or off for a single body.
pub fn set_gravity(gravity: &mut GravityScale, enabled: bool) {
    gravity.0 = if enabled { 1.0 } else { 0.0 };
}

/// Takes a body out of the simulation so its transform can be driven by hand.
pub fn suspend_body(body: &mut RigidBody, velocity: &mut Velocity, gravity: &mut GravityScale) {
    *body = RigidBody::KinematicPositionBased;
    *velocity = Velocity::zero();
    set_gravity(gravity, false);
}

/// Hands a body back to the solver. `keep_gravity_off` is set when a holder
/// still wants gravity disabled.
pub fn resume_body(body: &mut RigidBody, gravity: &mut GravityScale, keep_gravity_off: bool) {
    *body = RigidBody::Dynamic;
    set_gravity(gravity, !keep_gravity_off);
}

/// Sensor region bookkeeping. Rapier reports sensor starts and stops; this
/// remembers who is inside so drops can be checked against it later.
#[derive(Component, Clone, Debug, PartialEq, Default)]
pub struct TriggerVolume {
    occupants: Vec<Entity>,
}

impl TriggerVolume {
    pub fn contains(&self, entity: Entity) -> bool {
        self.occupants.contains(&entity)
    }

    pub fn occupants(&self) -> &[Entity] {
        &self.occupants
    }

    /// Records `entity` as inside. Returns true if it was not inside before.
    pub fn enter(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.occupants.push(entity);
        true
    }

    /// Records `entity` as outside. Returns true if it was inside before.
    pub fn exit(&mut self, entity: Entity) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|e| *e != entity);
        self.occupants.len() != before
    }
}
