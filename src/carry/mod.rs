pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;

pub use components::{spring_force, Carrier, CarryError, CarryTuning, Carryable, Holder, LookSpeed, SpinDrop};
pub use events::{DropReason, DropRequest, Dropped, PickUpRequest, PickedUp};
pub use plugin::plugin;
pub use systems::release;
