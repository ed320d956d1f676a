pub mod components;
pub mod plugin;
pub mod systems;

pub use components::{HoldAnchor, LookAngles, Player, PlayerCamera, PlayerMotion};
pub use plugin::plugin;
