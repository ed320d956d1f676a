use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::input::events::{ActionEvent, ControlSchemeChanged};
use crate::input::resources::{ControlScheme, InputBindings, PlayerInput};
use crate::input::systems::gather_player_input;

/// Input plugin. Polling runs every frame, paused or not, so the pause
/// action can resume the game.
pub fn plugin(app: &mut App) {
    app.init_resource::<InputBindings>()
        .init_resource::<PlayerInput>()
        .init_resource::<ControlScheme>()
        .add_message::<ActionEvent>()
        .add_message::<ControlSchemeChanged>()
        .add_systems(Update, gather_player_input.in_set(GameSet::Input));
}
