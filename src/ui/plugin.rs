use bevy::prelude::*;

use crate::game::sets::GameSet;
use crate::ui::systems::*;

/// The prompt listens outside the gameplay sets so a scheme switch while
/// paused still shows up.
pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud)
        .add_systems(Update, update_progress_indicator.in_set(GameSet::Effects))
        .add_systems(Update, update_prompt_on_scheme_change.after(GameSet::Input));
}
