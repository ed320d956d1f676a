use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::orb::events::{OrbDamaged, OrbShattered};
use crate::orb::systems::*;

pub fn plugin(app: &mut App) {
    app.add_message::<OrbDamaged>()
        .add_message::<OrbShattered>()
        .add_systems(Update, tick_orbs.in_set(GameSet::Vitality))
        .add_systems(
            Update,
            (track_orb_detach, apply_impact_damage, despawn_shattered_orbs)
                .chain()
                .in_set(GameSet::Damage),
        )
        .add_systems(Update, update_orb_glow.in_set(GameSet::Effects));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carry::events::{DropRequest, Dropped};
    use crate::carry::components::Carryable;
    use crate::orb::components::{Orb, OrbConfig};
    use crate::physics::events::ImpactEvent;
    use bevy_rapier3d::prelude::{GravityScale, Velocity};

    fn app_with_plugin() -> App {
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin::default());
        app.add_message::<DropRequest>();
        app.add_message::<Dropped>();
        app.add_message::<ImpactEvent>();
        app.add_plugins(plugin);
        app
    }

    #[test]
    fn test_plugin_registers_messages() {
        let mut app = app_with_plugin();
        app.update();
        assert!(app.world().get_resource::<Messages<OrbDamaged>>().is_some());
        assert!(app.world().get_resource::<Messages<OrbShattered>>().is_some());
    }

    #[test]
    fn test_hard_impact_despawns_orb_on_update() {
        let mut app = app_with_plugin();
        let orb = app
            .world_mut()
            .spawn((
                Transform::default(),
                Orb::new(OrbConfig::default()),
                Carryable::default(),
                GravityScale::default(),
                Velocity::default(),
            ))
            .id();

        app.world_mut()
            .write_message(ImpactEvent::with_ground(orb, Vec3::new(0.0, -30.0, 0.0), Vec3::ZERO));
        app.update();

        assert!(app.world().get_entity(orb).is_err());
    }
}
