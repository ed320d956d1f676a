use bevy::prelude::*;

/// System sets for explicit ordering of the per-frame gameplay systems.
/// Request producers run before `Carry`, which is the only place pickups and
/// drops are applied.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Device polling into actions and axes
    Input,
    /// Player look and locomotion
    Movement,
    /// Targeting, interact presses and throw charging
    Interaction,
    /// Orb timers (lifespan, carry time)
    Vitality,
    /// Pickup and drop request processing
    Carry,
    /// Impact damage and shatter handling
    Damage,
    /// Recharge zone capture and staged restoration
    Recharge,
    /// Lights, HUD, audio
    Effects,
}

/// System sets around the rapier step. `Sample`, `AutoRelease` and `Spring`
/// run in `FixedUpdate`; `Contacts` runs in `FixedPostUpdate` after writeback.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepSet {
    /// Velocities recorded before the solver runs
    Sample,
    /// Distance and spin checks that force a held body loose
    AutoRelease,
    /// Spring force for held bodies
    Spring,
    /// Rapier collisions turned into impact and trigger messages
    Contacts,
}
