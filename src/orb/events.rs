use bevy::prelude::*;

/// An impact took durability from an orb.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct OrbDamaged {
    pub orb: Entity,
    pub points: u32,
    pub remaining: u32,
    pub impact_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShatterCause {
    /// Durability reached zero
    Impact,
    /// Lifespan ran out
    BurntOut,
}

/// Fired once when an orb breaks; the orb is despawned the same frame.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct OrbShattered {
    pub orb: Entity,
    pub position: Vec3,
    pub cause: ShatterCause,
}
