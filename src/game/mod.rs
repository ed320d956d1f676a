pub mod components;
pub mod plugin;
pub mod resources;
pub mod sets;
pub mod systems;

pub use components::*;
pub use plugin::plugin;
pub use resources::SceneConfig;
pub use sets::{GameSet, StepSet};
