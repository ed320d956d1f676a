use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalForce, ExternalImpulse, GravityScale, Velocity};

use crate::carry::components::*;
use crate::carry::events::*;
use crate::physics::components::set_gravity;

/// Lets go of a carryable. Every drop path (explicit, thrown, automatic,
/// shatter) goes through here so cleanup happens in one place.
/// The body takes over the holder's velocity and falls again.
pub fn release(
    carryable: &mut Carryable,
    gravity: &mut GravityScale,
    velocity: &mut Velocity,
    inherited_velocity: Vec3,
) -> Option<Carrier> {
    let carrier = carryable.detach()?;
    velocity.linvel = inherited_velocity;
    set_gravity(gravity, true);
    Some(carrier)
}

/// World-space point the carryable is pulled toward.
pub fn carry_target(carryable: &Carryable, anchor: &GlobalTransform) -> Vec3 {
    anchor.transform_point(carryable.held_offset)
}

/// Decides whether a held body has to be let go this step.
/// Distance is checked before spin, and a vanished anchor always releases.
pub fn auto_release_reason(
    carryable: &Carryable,
    position: Vec3,
    anchor: Option<&GlobalTransform>,
    look_speed: f32,
) -> Option<DropReason> {
    let Some(anchor) = anchor else {
        return Some(DropReason::AnchorLost);
    };

    let to_target = carry_target(carryable, anchor) - position;
    if to_target.length() > carryable.tuning.max_follow_distance {
        return Some(DropReason::TooFar);
    }

    if carryable.spin_drop.enabled && look_speed >= carryable.spin_drop.angular_threshold {
        return Some(DropReason::Spin);
    }

    None
}

/// Applies pickup requests. A holder without an anchor is a missing
/// capability and is logged; anything already carried is left alone.
pub fn process_pickup_requests(
    mut requests: MessageReader<PickUpRequest>,
    holders: Query<&Holder>,
    mut items: Query<(&mut Carryable, &mut GravityScale)>,
    mut picked_up: MessageWriter<PickedUp>,
) {
    for request in requests.read() {
        let Ok(holder) = holders.get(request.holder) else {
            debug!("Pickup ignored: {:?} is not a holder", request.holder);
            continue;
        };

        if items.iter().any(|(carryable, _)| carryable.is_held_by(request.holder)) {
            debug!("Pickup ignored: {:?} already holds something", request.holder);
            continue;
        }

        let Ok((mut carryable, mut gravity)) = items.get_mut(request.item) else {
            continue;
        };

        match carryable.attach(request.holder, holder.anchor) {
            Ok(_) => {
                if carryable.tuning.disable_gravity {
                    set_gravity(&mut gravity, false);
                }
                picked_up.write(PickedUp {
                    item: request.item,
                    holder: request.holder,
                });
            }
            Err(err @ CarryError::MissingAnchor(_)) => {
                warn!("Pickup of {:?} aborted: {}", request.item, err);
            }
            Err(err) => {
                debug!("Pickup of {:?} ignored: {}", request.item, err);
            }
        }
    }
}

/// Applies drop and throw requests. Requests for bodies that are no longer
/// carried (already auto-dropped) do nothing.
pub fn process_drop_requests(
    mut requests: MessageReader<DropRequest>,
    mut items: Query<(&mut Carryable, &mut GravityScale, &mut Velocity, &mut ExternalImpulse)>,
    holder_velocities: Query<&Velocity, Without<Carryable>>,
    anchors: Query<&GlobalTransform>,
    mut dropped: MessageWriter<Dropped>,
) {
    for request in requests.read() {
        let Ok((mut carryable, mut gravity, mut velocity, mut impulse)) = items.get_mut(request.item) else {
            continue;
        };
        let Some(carrier) = carryable.carrier() else {
            continue;
        };

        let forward = anchors.get(carrier.anchor).map(|t| *t.forward()).ok();
        let inherited = holder_velocities
            .get(carrier.holder)
            .map(|v| v.linvel)
            .unwrap_or(Vec3::ZERO);

        if release(&mut carryable, &mut gravity, &mut velocity, inherited).is_none() {
            continue;
        }

        if let (Some(force), Some(forward)) = (request.throw_force, forward) {
            impulse.impulse += forward * force;
        }

        dropped.write(Dropped {
            item: request.item,
            holder: carrier.holder,
            reason: request.reason,
        });
    }
}

/// Fixed-step distance and spin checks. Runs before the spring so no force
/// is ever applied to a body that is being let go.
pub fn auto_release_carried(
    mut items: Query<(Entity, &Transform, &mut Carryable, &mut GravityScale, &mut Velocity)>,
    anchors: Query<&GlobalTransform>,
    holders: Query<(Option<&LookSpeed>, Option<&Velocity>), Without<Carryable>>,
    mut dropped: MessageWriter<Dropped>,
) {
    for (item, transform, mut carryable, mut gravity, mut velocity) in items.iter_mut() {
        let Some(carrier) = carryable.carrier() else {
            continue;
        };

        let (look_speed, holder_velocity) = holders
            .get(carrier.holder)
            .map(|(look, vel)| (look.map(|l| l.0).unwrap_or(0.0), vel.map(|v| v.linvel)))
            .unwrap_or((0.0, None));

        let anchor = anchors.get(carrier.anchor).ok();
        let Some(reason) = auto_release_reason(&carryable, transform.translation, anchor, look_speed) else {
            continue;
        };

        let inherited = holder_velocity.unwrap_or(velocity.linvel);
        if release(&mut carryable, &mut gravity, &mut velocity, inherited).is_some() {
            debug!("{:?} auto-dropped: {:?}", item, reason);
            dropped.write(Dropped {
                item,
                holder: carrier.holder,
                reason,
            });
        }
    }
}

/// Writes the carry spring into each held body's external force. Rapier keeps
/// external forces between steps, so bodies that are no longer held get
/// theirs cleared.
pub fn apply_carry_spring(
    mut items: Query<(&Transform, &Carryable, &Velocity, &mut ExternalForce)>,
    anchors: Query<&GlobalTransform>,
    look_speeds: Query<&LookSpeed>,
) {
    for (transform, carryable, velocity, mut force) in items.iter_mut() {
        let anchor = carryable
            .carrier()
            .and_then(|carrier| anchors.get(carrier.anchor).ok().map(|anchor| (carrier, anchor)));
        let Some((carrier, anchor)) = anchor else {
            if force.force != Vec3::ZERO {
                force.force = Vec3::ZERO;
            }
            continue;
        };

        let angular_speed = look_speeds.get(carrier.holder).map(|l| l.0).unwrap_or(0.0);
        let to_target = carry_target(carryable, anchor) - transform.translation;

        force.force = spring_force(to_target, velocity.linvel, angular_speed, &carryable.tuning);
    }
}
