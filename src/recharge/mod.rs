pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;

pub use components::{RechargeSequence, RechargeTuning, RechargeZone, StepProgress, ZoneState};
pub use events::{OrbCaptured, RechargeComplete, RechargePulse};
pub use plugin::plugin;
