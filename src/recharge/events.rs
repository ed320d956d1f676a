use bevy::prelude::*;

/// An orb settled in a zone and started charging.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbCaptured {
    pub zone: Entity,
    pub orb: Entity,
}

/// One durability point restored.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RechargePulse {
    pub zone: Entity,
    pub orb: Entity,
    pub durability: u32,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RechargeComplete {
    pub zone: Entity,
    pub orb: Entity,
}
