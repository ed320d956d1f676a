use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::audio::plugin::OrbSfxChannel;
use crate::orb::events::OrbShattered;
use crate::recharge::events::{RechargeComplete, RechargePulse};

pub const SHATTER_SOUND: &str = "sounds/orb_shatter.ogg";
pub const PULSE_SOUND: &str = "sounds/recharge_pulse.ogg";
pub const RECHARGED_SOUND: &str = "sounds/recharge_complete.ogg";

/// Shatter sound; quietly skipped without an asset server or channel.
pub fn play_shatter_sound(
    mut shattered: MessageReader<OrbShattered>,
    asset_server: Option<Res<AssetServer>>,
    channel: Option<Res<AudioChannel<OrbSfxChannel>>>,
) {
    let (Some(asset_server), Some(channel)) = (asset_server, channel) else {
        shattered.clear();
        return;
    };

    for _ in shattered.read() {
        channel.play(asset_server.load(SHATTER_SOUND));
    }
}

/// One blip per restored point, and a chime when the orb is full.
pub fn play_recharge_sounds(
    mut pulses: MessageReader<RechargePulse>,
    mut completed: MessageReader<RechargeComplete>,
    asset_server: Option<Res<AssetServer>>,
    channel: Option<Res<AudioChannel<OrbSfxChannel>>>,
) {
    let (Some(asset_server), Some(channel)) = (asset_server, channel) else {
        pulses.clear();
        completed.clear();
        return;
    };

    for _ in pulses.read() {
        channel.play(asset_server.load(PULSE_SOUND));
    }
    for _ in completed.read() {
        channel.play(asset_server.load(RECHARGED_SOUND));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orb::events::ShatterCause;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_sounds_are_skipped_without_audio_backend() {
        let mut app = App::new();
        app.add_message::<OrbShattered>();
        app.add_message::<RechargePulse>();
        app.add_message::<RechargeComplete>();
        let orb = app.world_mut().spawn_empty().id();
        let zone = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(OrbShattered {
            orb,
            position: Vec3::ZERO,
            cause: ShatterCause::Impact,
        });
        app.world_mut().write_message(RechargePulse {
            zone,
            orb,
            durability: 2,
        });

        assert!(app.world_mut().run_system_once(play_shatter_sound).is_ok());
        assert!(app.world_mut().run_system_once(play_recharge_sounds).is_ok());
    }

    #[test]
    fn test_sound_paths_point_into_sounds_folder() {
        for path in [SHATTER_SOUND, PULSE_SOUND, RECHARGED_SOUND] {
            assert!(path.starts_with("sounds/"));
        }
    }
}
