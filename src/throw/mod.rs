pub mod components;
pub mod plugin;
pub mod systems;

pub use components::{ChargePhase, ThrowCharge, ThrowOutcome, ThrowTuning};
pub use plugin::plugin;
