use bevy::prelude::*;

use crate::carry::components::Carryable;
use crate::carry::events::{DropReason, DropRequest, Dropped};
use crate::input::events::{Action, ActionEvent, ActionPhase};
use crate::throw::components::{ThrowCharge, ThrowOutcome};

/// Turns throw button presses and releases into charge changes and drop
/// requests. Any drop cancels the holder's charge first, so a release can
/// only ever throw the item the charge was started on.
pub fn handle_throw_input(
    mut actions: MessageReader<ActionEvent>,
    mut dropped: MessageReader<Dropped>,
    mut holders: Query<(Entity, &mut ThrowCharge)>,
    items: Query<(Entity, &Carryable)>,
    mut drops: MessageWriter<DropRequest>,
) {
    for drop in dropped.read() {
        if let Ok((_, mut charge)) = holders.get_mut(drop.holder) {
            if charge.is_charging() {
                debug!("Throw charge of {:?} cancelled by {:?} drop", drop.holder, drop.reason);
                charge.cancel();
            }
        }
    }

    for event in actions.read() {
        if event.action != Action::Throw {
            continue;
        }

        for (holder, mut charge) in holders.iter_mut() {
            let held = items
                .iter()
                .find(|(_, carryable)| carryable.is_held_by(holder))
                .map(|(item, _)| item);

            match event.phase {
                ActionPhase::Pressed => {
                    if held.is_some() {
                        charge.begin();
                    }
                }
                ActionPhase::Released => match (charge.release(), held) {
                    (ThrowOutcome::Drop, Some(item)) => {
                        drops.write(DropRequest::new(item, DropReason::Released));
                    }
                    (ThrowOutcome::Throw { force }, Some(item)) => {
                        drops.write(DropRequest::throw(item, force));
                    }
                    _ => {}
                },
            }
        }
    }
}

/// Builds up throw force while the button is held.
pub fn advance_throw_charge(time: Res<Time>, mut holders: Query<&mut ThrowCharge>) {
    for mut charge in holders.iter_mut() {
        charge.tick(time.delta());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throw::components::ThrowTuning;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn throw_app() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_message::<ActionEvent>();
        app.add_message::<DropRequest>();
        app.add_message::<Dropped>();

        let holder = app
            .world_mut()
            .spawn(ThrowCharge::new(ThrowTuning {
                min_force: 2.0,
                max_force: 10.0,
                charge_rate: 4.0,
                hold_to_throw: 0.3,
            }))
            .id();

        let mut carryable = Carryable::default();
        carryable.attach(holder, Some(holder)).unwrap();
        let item = app.world_mut().spawn(carryable).id();

        (app, holder, item)
    }

    fn press(app: &mut App, phase: ActionPhase) {
        app.world_mut().write_message(ActionEvent {
            action: Action::Throw,
            phase,
        });
        let _ = app.world_mut().run_system_once(handle_throw_input);
        app.world_mut().resource_mut::<Messages<ActionEvent>>().clear();
        app.world_mut().resource_mut::<Messages<Dropped>>().clear();
    }

    fn hold(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        let _ = app.world_mut().run_system_once(advance_throw_charge);
    }

    fn drop_requests(app: &mut App) -> Vec<DropRequest> {
        app.world_mut()
            .run_system_once(|mut reader: MessageReader<DropRequest>| reader.read().copied().collect::<Vec<_>>())
            .unwrap()
    }

    #[test]
    fn test_tap_requests_plain_drop() {
        let (mut app, _, item) = throw_app();

        press(&mut app, ActionPhase::Pressed);
        hold(&mut app, 0.1);
        press(&mut app, ActionPhase::Released);

        assert_eq!(drop_requests(&mut app), vec![DropRequest::new(item, DropReason::Released)]);
    }

    #[test]
    fn test_long_hold_requests_throw_within_bounds() {
        let (mut app, holder, item) = throw_app();

        press(&mut app, ActionPhase::Pressed);
        hold(&mut app, 0.5);
        hold(&mut app, 5.0);
        press(&mut app, ActionPhase::Released);

        let requests = drop_requests(&mut app);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].item, item);
        assert_eq!(requests[0].reason, DropReason::Thrown);
        assert_eq!(requests[0].throw_force, Some(10.0));
        assert!(!app.world().get::<ThrowCharge>(holder).unwrap().is_charging());
    }

    #[test]
    fn test_press_without_item_does_not_charge() {
        let (mut app, holder, item) = throw_app();
        app.world_mut().get_mut::<Carryable>(item).unwrap().detach();

        press(&mut app, ActionPhase::Pressed);

        assert!(!app.world().get::<ThrowCharge>(holder).unwrap().is_charging());
    }

    #[test]
    fn test_release_after_auto_drop_is_noop() {
        let (mut app, holder, item) = throw_app();

        press(&mut app, ActionPhase::Pressed);
        hold(&mut app, 1.0);
        app.world_mut().get_mut::<Carryable>(item).unwrap().detach();
        press(&mut app, ActionPhase::Released);

        assert!(drop_requests(&mut app).is_empty());
        let charge = app.world().get::<ThrowCharge>(holder).unwrap();
        assert!(!charge.is_charging());
        assert_eq!(charge.current_force(), 0.0);
    }

    #[test]
    fn test_auto_drop_then_new_pickup_does_not_throw_the_new_item() {
        let (mut app, holder, first) = throw_app();

        press(&mut app, ActionPhase::Pressed);
        hold(&mut app, 1.0);

        // The first item spins out of the hand and a second one is picked up
        app.world_mut().get_mut::<Carryable>(first).unwrap().detach();
        app.world_mut().write_message(Dropped {
            item: first,
            holder,
            reason: DropReason::Spin,
        });
        let mut carryable = Carryable::default();
        carryable.attach(holder, Some(holder)).unwrap();
        app.world_mut().spawn(carryable);

        hold(&mut app, 1.0);
        press(&mut app, ActionPhase::Released);

        assert!(drop_requests(&mut app).is_empty());
        let charge = app.world().get::<ThrowCharge>(holder).unwrap();
        assert!(!charge.is_charging());
        assert_eq!(charge.current_force(), 0.0);
    }

    #[test]
    fn test_drop_of_another_holder_keeps_charge() {
        let (mut app, holder, item) = throw_app();
        let other = app.world_mut().spawn(ThrowCharge::default()).id();

        press(&mut app, ActionPhase::Pressed);
        app.world_mut().write_message(Dropped {
            item,
            holder: other,
            reason: DropReason::TooFar,
        });
        hold(&mut app, 0.5);
        press(&mut app, ActionPhase::Released);

        let requests = drop_requests(&mut app);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].reason, DropReason::Thrown);
        assert!(!app.world().get::<ThrowCharge>(holder).unwrap().is_charging());
    }
}
