use bevy::prelude::*;

use crate::carry::events::{DropRequest, Dropped, PickUpRequest, PickedUp};
use crate::carry::systems::*;
use crate::game::sets::{GameSet, StepSet};

/// Spring-carry plugin.
/// Requests are applied once per frame in `GameSet::Carry`; the spring and
/// the distance/spin checks run on the fixed physics step.
pub fn plugin(app: &mut App) {
    app.add_message::<PickUpRequest>()
        .add_message::<DropRequest>()
        .add_message::<PickedUp>()
        .add_message::<Dropped>()
        .add_systems(
            Update,
            (process_pickup_requests, process_drop_requests)
                .chain()
                .in_set(GameSet::Carry),
        )
        .add_systems(FixedUpdate, auto_release_carried.in_set(StepSet::AutoRelease))
        .add_systems(FixedUpdate, apply_carry_spring.in_set(StepSet::Spring));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carry::components::{Carryable, Holder};
    use bevy_rapier3d::prelude::{ExternalForce, ExternalImpulse, GravityScale, RigidBody, Velocity};

    #[test]
    fn test_plugin_registers_messages() {
        let mut app = App::new();
        app.add_plugins(plugin);

        let entity = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(PickUpRequest { item: entity, holder: entity });
        app.update();

        assert!(app.world().get_resource::<Messages<PickedUp>>().is_some());
        assert!(app.world().get_resource::<Messages<Dropped>>().is_some());
    }

    #[test]
    fn test_plugin_processes_pickup_on_update() {
        let mut app = App::new();
        app.add_plugins(plugin);

        let anchor = app.world_mut().spawn(GlobalTransform::default()).id();
        let holder = app.world_mut().spawn(Holder::with_anchor(anchor)).id();
        let item = app
            .world_mut()
            .spawn((
                Transform::default(),
                Carryable::default(),
                RigidBody::Dynamic,
                GravityScale::default(),
                Velocity::default(),
                ExternalForce::default(),
                ExternalImpulse::default(),
            ))
            .id();

        app.world_mut().write_message(PickUpRequest { item, holder });
        app.update();

        assert!(app.world().get::<Carryable>(item).unwrap().is_held_by(holder));
    }
}
