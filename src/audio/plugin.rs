use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::audio::systems::*;
use crate::game::sets::GameSet;

/// Kira channel for orb sound effects.
#[derive(Resource)]
pub struct OrbSfxChannel;

/// Needs `bevy_kira_audio::AudioPlugin` in the app.
pub fn plugin(app: &mut App) {
    app.add_audio_channel::<OrbSfxChannel>().add_systems(
        Update,
        (play_shatter_sound, play_recharge_sounds).after(GameSet::Effects),
    );
}
