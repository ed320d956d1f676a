use bevy::prelude::*;

use crate::carry::components::{CarryTuning, SpinDrop};
use crate::orb::components::OrbConfig;
use crate::player::components::Player;
use crate::recharge::components::RechargeTuning;
use crate::throw::components::ThrowTuning;

/// Eye height of the player camera above the body origin.
pub const EYE_HEIGHT: f32 = 1.6;

/// Everything the scene is built from. Insert one before adding the game
/// plugin to override the defaults.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub orb: OrbConfig,
    pub carry: CarryTuning,
    pub spin_drop: SpinDrop,
    pub throw: ThrowTuning,
    pub recharge: RechargeTuning,
    pub player: Player,
    /// How far the player can reach to pick something up
    pub reach: f32,
    /// Hold point in front of the camera, in camera space
    pub hold_point: Vec3,
    pub orb_radius: f32,
    pub orb_mass: f32,
    pub orb_spawn: Vec3,
    pub zone_position: Vec3,
    pub zone_radius: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orb: OrbConfig::default(),
            carry: CarryTuning::default(),
            spin_drop: SpinDrop::default(),
            throw: ThrowTuning::default(),
            recharge: RechargeTuning::default(),
            player: Player::default(),
            reach: 3.0,
            hold_point: Vec3::new(0.0, -0.2, -1.2),
            orb_radius: 0.15,
            orb_mass: 0.5,
            orb_spawn: Vec3::new(0.0, 1.0, -3.0),
            zone_position: Vec3::new(5.0, 0.6, -5.0),
            zone_radius: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_keeps_orb_out_of_the_zone() {
        let config = SceneConfig::default();
        let gap = config.orb_spawn.distance(config.zone_position);
        assert!(gap > config.zone_radius + config.orb_radius);
    }

    #[test]
    fn test_default_hold_point_is_within_follow_distance() {
        let config = SceneConfig::default();
        assert!(config.hold_point.length() < config.carry.max_follow_distance);
        assert!(config.hold_point.length() < config.reach);
    }
}
