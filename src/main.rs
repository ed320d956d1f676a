use clap::Parser;
use orb_carry::prelude::*;
use orb_carry::{audio_plugin, game_plugin};

/// Carry a fragile glowing orb around and keep it alive.
#[derive(Parser, Debug)]
#[command(name = "orb-carry")]
struct Args {
    /// Hits an orb survives
    #[arg(long)]
    max_durability: Option<u32>,
    /// Seconds an orb can be held before it slips free
    #[arg(long)]
    max_carry_time: Option<f32>,
    /// Seconds before an orb burns out
    #[arg(long)]
    lifespan: Option<f32>,
    /// Seconds a recharge zone needs to fully restore an orb
    #[arg(long)]
    recharge_seconds: Option<f32>,
    /// Keep held orbs when turning quickly
    #[arg(long)]
    no_spin_drop: bool,
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig::default();
        if let Some(durability) = self.max_durability {
            config.orb.max_durability = durability.max(1);
        }
        if let Some(seconds) = self.max_carry_time {
            config.orb.max_carry_time = seconds;
        }
        if let Some(seconds) = self.lifespan {
            config.orb.lifespan = seconds;
        }
        if let Some(seconds) = self.recharge_seconds {
            config.recharge.recharge_duration = seconds;
        }
        if self.no_spin_drop {
            config.spin_drop.enabled = false;
        }
        config
    }
}

fn main() {
    let args = Args::parse();

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(bevy_kira_audio::AudioPlugin)
        .init_state::<GameState>()
        .insert_resource(args.scene_config())
        .add_plugins((game_plugin, audio_plugin))
        .run();
}
