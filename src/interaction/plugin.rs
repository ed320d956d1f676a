use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::interaction::systems::*;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (update_interaction_target, handle_interact_input, toggle_outlines)
            .chain()
            .in_set(GameSet::Interaction),
    );
}
