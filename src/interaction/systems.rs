use bevy::prelude::*;

use crate::carry::components::{Carryable, Holder};
use crate::carry::events::{DropReason, DropRequest, PickUpRequest};
use crate::input::events::{Action, ActionEvent};
use crate::interaction::components::*;
use crate::player::components::PlayerCamera;

/// Casts the view ray and stores the closest interactable within reach.
pub fn update_interaction_target(
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
    mut holders: Query<&mut InteractionTarget>,
    interactables: Query<(Entity, &GlobalTransform, &Interactable)>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    let origin = camera.translation();
    let direction = *camera.forward();

    for mut target in holders.iter_mut() {
        let closest = interactables
            .iter()
            .filter_map(|(entity, transform, interactable)| {
                ray_sphere_distance(origin, direction, transform.translation(), interactable.radius)
                    .filter(|distance| *distance <= target.reach)
                    .map(|distance| (entity, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);

        if target.target != closest {
            target.target = closest;
        }
    }
}

/// Keeps `Outlined` on exactly the aimed-at interactables that are not in a hand.
pub fn toggle_outlines(
    mut commands: Commands,
    holders: Query<&InteractionTarget>,
    interactables: Query<(Entity, Option<&Carryable>, Has<Outlined>), With<Interactable>>,
) {
    for (entity, carryable, outlined) in interactables.iter() {
        let carried = carryable.is_some_and(|c| c.is_carried());
        let aimed = holders.iter().any(|h| h.target == Some(entity));
        let wanted = aimed && !carried;

        if wanted && !outlined {
            commands.entity(entity).insert(Outlined);
        } else if !wanted && outlined {
            commands.entity(entity).remove::<Outlined>();
        }
    }
}

/// Interact press: drop what is held, otherwise pick up what is aimed at.
pub fn handle_interact_input(
    mut actions: MessageReader<ActionEvent>,
    holders: Query<(Entity, &InteractionTarget), With<Holder>>,
    items: Query<(Entity, &Carryable)>,
    mut pickups: MessageWriter<PickUpRequest>,
    mut drops: MessageWriter<DropRequest>,
) {
    let pressed = actions.read().filter(|event| event.is_press_of(Action::Interact)).count();
    if pressed == 0 {
        return;
    }

    for (holder, target) in holders.iter() {
        let held = items
            .iter()
            .find(|(_, carryable)| carryable.is_held_by(holder))
            .map(|(item, _)| item);

        if let Some(item) = held {
            drops.write(DropRequest::new(item, DropReason::Released));
        } else if let Some(item) = target.target.filter(|t| items.contains(*t)) {
            pickups.write(PickUpRequest { item, holder });
        }
    }
}
