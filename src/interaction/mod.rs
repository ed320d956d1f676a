pub mod components;
pub mod plugin;
pub mod systems;

pub use components::{Interactable, InteractionTarget, Outlined};
pub use plugin::plugin;
