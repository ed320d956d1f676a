pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;

pub use components::*;
pub use events::{ImpactEvent, TriggerEvent};
pub use plugin::plugin;
