use bevy::prelude::*;

use crate::game::resources::SceneConfig;
use crate::game::sets::GameSet;
use crate::game::systems::{setup_scene, toggle_pause};
use crate::states::GameState;
use crate::{carry, input, interaction, orb, physics, player, recharge, throw, ui};

/// Orders the gameplay sets and wires every gameplay plugin. Input keeps
/// polling while paused; everything after it freezes.
pub fn plugin(app: &mut App) {
    app.init_resource::<SceneConfig>()
        .configure_sets(
            Update,
            (
                GameSet::Input,
                GameSet::Movement,
                GameSet::Interaction,
                GameSet::Vitality,
                GameSet::Carry,
                GameSet::Damage,
                GameSet::Recharge,
                GameSet::Effects,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (
                GameSet::Movement,
                GameSet::Interaction,
                GameSet::Vitality,
                GameSet::Carry,
                GameSet::Damage,
                GameSet::Recharge,
                GameSet::Effects,
            )
                .run_if(in_state(GameState::Playing)),
        )
        .add_plugins((
            physics::plugin,
            input::plugin,
            player::plugin,
            carry::plugin,
            throw::plugin,
            interaction::plugin,
            orb::plugin,
            recharge::plugin,
            ui::plugin,
        ))
        .add_systems(Startup, setup_scene)
        .add_systems(Update, toggle_pause.after(GameSet::Input));
}
