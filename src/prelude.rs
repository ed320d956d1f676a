pub use bevy::prelude::*;
pub use crate::states::*;

// Re-export components
pub use crate::carry::components::*;
pub use crate::interaction::components::*;
pub use crate::orb::components::*;
pub use crate::physics::components::*;
pub use crate::player::components::*;
pub use crate::recharge::components::*;
pub use crate::throw::components::*;
pub use crate::ui::components::*;

// Re-export messages
pub use crate::carry::events::*;
pub use crate::input::events::*;
pub use crate::orb::events::*;
pub use crate::physics::events::*;
pub use crate::recharge::events::*;

pub use crate::game::resources::SceneConfig;
pub use crate::game::sets::{GameSet, StepSet};
pub use crate::input::resources::*;
