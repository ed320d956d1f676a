pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

pub use events::{Action, ActionEvent, ActionPhase, ControlSchemeChanged};
pub use plugin::plugin;
pub use resources::{ControlScheme, InputBindings, PlayerInput};
