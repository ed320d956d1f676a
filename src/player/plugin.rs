use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::player::systems::{player_look, player_movement};

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (player_look, player_movement).chain().in_set(GameSet::Movement));
}
