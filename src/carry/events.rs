use bevy::prelude::*;

/// Why a carried body was let go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// Explicit drop (interact press or a short tap of throw)
    Released,
    /// Charged throw
    Thrown,
    /// Pulled further than the follow distance
    TooFar,
    /// Holder turned faster than the spin threshold
    Spin,
    /// Orb carried for its maximum time
    CarryTimeout,
    /// Anchor entity disappeared
    AnchorLost,
    /// Orb shattered while held
    Shattered,
}

/// Request for `holder` to pick up `item`
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickUpRequest {
    pub item: Entity,
    pub holder: Entity,
}

/// Request to let go of `item`. `throw_force` adds an impulse along the
/// anchor's forward direction after the drop.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct DropRequest {
    pub item: Entity,
    pub reason: DropReason,
    pub throw_force: Option<f32>,
}

impl DropRequest {
    pub fn new(item: Entity, reason: DropReason) -> Self {
        Self {
            item,
            reason,
            throw_force: None,
        }
    }

    pub fn throw(item: Entity, force: f32) -> Self {
        Self {
            item,
            reason: DropReason::Thrown,
            throw_force: Some(force),
        }
    }
}

/// Message fired once per successful pickup
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedUp {
    pub item: Entity,
    pub holder: Entity,
}

/// Message fired once per successful drop, whatever caused it
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropped {
    pub item: Entity,
    pub holder: Entity,
    pub reason: DropReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_request_constructors() {
        let mut world = World::new();
        let item = world.spawn_empty().id();

        let drop = DropRequest::new(item, DropReason::Released);
        assert!(drop.throw_force.is_none());

        let throw = DropRequest::throw(item, 7.5);
        assert_eq!(throw.reason, DropReason::Thrown);
        assert_eq!(throw.throw_force, Some(7.5));
    }

    #[test]
    fn test_carry_messages_can_be_registered() {
        let mut app = App::new();
        app.add_message::<PickUpRequest>();
        app.add_message::<DropRequest>();
        app.add_message::<PickedUp>();
        app.add_message::<Dropped>();
        app.update();
    }
}
