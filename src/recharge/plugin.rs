use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::recharge::events::{OrbCaptured, RechargeComplete, RechargePulse};
use crate::recharge::systems::*;

/// Release runs before capture so an orb leaving one zone can be caught by
/// another in the same frame.
pub fn plugin(app: &mut App) {
    app.add_message::<OrbCaptured>()
        .add_message::<RechargePulse>()
        .add_message::<RechargeComplete>()
        .add_systems(
            Update,
            (release_orbs, capture_orbs, advance_catching, advance_charging)
                .chain()
                .in_set(GameSet::Recharge),
        );
}
