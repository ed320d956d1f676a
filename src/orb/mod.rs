pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;
pub mod visuals;

pub use components::{GlowConfig, Orb, OrbConfig, OrbGlow, RechargeFlicker};
pub use events::{OrbDamaged, OrbShattered, ShatterCause};
pub use plugin::plugin;
