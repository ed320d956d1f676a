use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet as RapierSet;
use bevy_rapier3d::prelude::*;

use crate::game::sets::StepSet;
use crate::physics::events::{ImpactEvent, TriggerEvent};
use crate::physics::systems::*;
use crate::states::GameState;

/// Rapier steps on the fixed schedule so carry forces written in
/// `FixedUpdate` are picked up by the very next solver step.
/// Contacts are translated once rapier has written its results back.
pub fn plugin(app: &mut App) {
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        .add_message::<ImpactEvent>()
        .add_message::<TriggerEvent>()
        .configure_sets(
            FixedUpdate,
            (StepSet::Sample, StepSet::AutoRelease, StepSet::Spring)
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .configure_sets(FixedPostUpdate, StepSet::Contacts.after(RapierSet::Writeback))
        .add_systems(FixedUpdate, sample_velocities.in_set(StepSet::Sample))
        .add_systems(FixedPostUpdate, translate_collisions.in_set(StepSet::Contacts))
        .add_systems(OnEnter(GameState::Paused), pause_simulation)
        .add_systems(OnExit(GameState::Paused), resume_simulation);
}
