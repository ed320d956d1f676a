pub mod audio;
pub mod carry;
pub mod game;
pub mod input;
pub mod interaction;
pub mod orb;
pub mod physics;
pub mod player;
pub mod prelude;
pub mod recharge;
pub mod states;
pub mod throw;
pub mod ui;

pub use audio::plugin as audio_plugin;
pub use game::plugin as game_plugin;
