use bevy::prelude::*;
use bevy_rapier3d::prelude::{GravityScale, RigidBody, Velocity};
use rand::Rng;

use crate::carry::components::Carryable;
use crate::carry::events::{DropReason, Dropped, PickedUp};
use crate::orb::components::{Orb, RechargeFlicker};
use crate::orb::events::OrbShattered;
use crate::physics::components::{resume_body, suspend_body, TriggerVolume};
use crate::physics::events::TriggerEvent;
use crate::recharge::components::*;
use crate::recharge::events::*;

/// Lets go of the orb a zone holds. Staged work is discarded; a live orb is
/// unparented at its current world pose and simulated again.
pub fn release_orbs(
    mut commands: Commands,
    mut triggers: MessageReader<TriggerEvent>,
    mut picked_up: MessageReader<PickedUp>,
    mut shattered: MessageReader<OrbShattered>,
    mut zones: Query<(Entity, &mut RechargeZone, &GlobalTransform)>,
    mut orbs: Query<
        (&Carryable, &mut RigidBody, &mut GravityScale, &mut Transform),
        (With<Orb>, Without<RechargeZone>),
    >,
) {
    let mut leaving: Vec<(Option<Entity>, Entity)> = Vec::new();
    for event in triggers.read() {
        if let TriggerEvent::Exited { trigger, entity } = *event {
            leaving.push((Some(trigger), entity));
        }
    }
    leaving.extend(picked_up.read().map(|p| (None, p.item)));

    for event in shattered.read() {
        for (_, mut zone, _) in zones.iter_mut() {
            if zone.holds(event.orb) {
                zone.clear();
            }
        }
    }

    for (trigger, orb_entity) in leaving {
        for (zone_entity, mut zone, zone_transform) in zones.iter_mut() {
            if !zone.holds(orb_entity) || trigger.is_some_and(|t| t != zone_entity) {
                continue;
            }

            zone.clear();

            let Ok((carryable, mut body, mut gravity, mut transform)) = orbs.get_mut(orb_entity) else {
                continue;
            };

            *transform = zone_transform.mul_transform(*transform).compute_transform();
            resume_body(
                &mut body,
                &mut gravity,
                carryable.is_carried() && carryable.tuning.disable_gravity,
            );

            commands
                .entity(orb_entity)
                .remove::<ChildOf>()
                .remove::<RechargeFlicker>();

            debug!("Zone {:?} released orb {:?}", zone_entity, orb_entity);
        }
    }
}

/// Catches free orbs that enter a zone or are let go inside one.
pub fn capture_orbs(
    mut commands: Commands,
    mut triggers: MessageReader<TriggerEvent>,
    mut dropped: MessageReader<Dropped>,
    mut zones: Query<(Entity, &mut RechargeZone, &TriggerVolume, &GlobalTransform)>,
    mut orbs: Query<
        (
            &Orb,
            &Carryable,
            &mut RigidBody,
            &mut Velocity,
            &mut GravityScale,
            &mut Transform,
            &GlobalTransform,
        ),
        Without<RechargeZone>,
    >,
) {
    let mut candidates: Vec<(Option<Entity>, Entity)> = Vec::new();
    for event in triggers.read() {
        if let TriggerEvent::Entered { trigger, entity } = *event {
            candidates.push((Some(trigger), entity));
        }
    }
    for drop in dropped.read() {
        if drop.reason != DropReason::Shattered {
            candidates.push((None, drop.item));
        }
    }

    for (trigger, orb_entity) in candidates {
        if zones.iter().any(|(_, zone, _, _)| zone.holds(orb_entity)) {
            continue;
        }

        let Ok((orb, carryable, mut body, mut velocity, mut gravity, mut transform, orb_transform)) =
            orbs.get_mut(orb_entity)
        else {
            continue;
        };
        if orb.is_shattered() || carryable.is_carried() {
            continue;
        }

        let zone = zones.iter_mut().find(|(entity, zone, volume, _)| {
            zone.is_free()
                && match trigger {
                    Some(trigger) => *entity == trigger,
                    None => volume.contains(orb_entity),
                }
        });
        let Some((zone_entity, mut zone, _, zone_transform)) = zone else {
            continue;
        };

        zone.begin_catch(orb_entity);
        suspend_body(&mut body, &mut velocity, &mut gravity);
        *transform = orb_transform.reparented_to(zone_transform);

        commands
            .entity(orb_entity)
            .insert((ChildOf(zone_entity), RechargeFlicker::default()));

        debug!("Zone {:?} catching orb {:?}", zone_entity, orb_entity);
    }
}

/// Pulls caught orbs to the zone centre and starts charging once they settle.
pub fn advance_catching(
    time: Res<Time>,
    mut zones: Query<(Entity, &mut RechargeZone)>,
    mut orbs: Query<(&mut Orb, &mut Transform)>,
    mut captured: MessageWriter<OrbCaptured>,
) {
    let dt = time.delta_secs();

    for (zone_entity, mut zone) in zones.iter_mut() {
        if zone.state != ZoneState::Catching {
            continue;
        }
        let Some(orb_entity) = zone.orb else {
            continue;
        };
        let Ok((mut orb, mut transform)) = orbs.get_mut(orb_entity) else {
            zone.clear();
            continue;
        };

        let t = (zone.tuning.closing_rate * dt).clamp(0.0, 1.0);
        transform.translation = transform.translation.lerp(Vec3::ZERO, t);

        if transform.translation.length() > zone.tuning.snap_threshold {
            continue;
        }

        transform.translation = Vec3::ZERO;
        transform.rotation = Quat::IDENTITY;
        orb.reset_carry_timer();

        let sequence = RechargeSequence::new(
            orb.missing_durability(),
            zone.tuning.recharge_duration,
            orb.lifespan_elapsed(),
            zone.tuning.flicker_share,
        );
        info!(
            "Orb {:?} captured, restoring {} point(s)",
            orb_entity,
            sequence.total_steps()
        );
        zone.start_charging(sequence);

        captured.write(OrbCaptured {
            zone: zone_entity,
            orb: orb_entity,
        });
    }
}

/// Runs the staged recharge: jittered flicker, one pulse per restored point,
/// then a completion that leaves the orb docked.
pub fn advance_charging(
    time: Res<Time>,
    mut zones: Query<(Entity, &mut RechargeZone)>,
    mut orbs: Query<(&mut Orb, Option<&mut RechargeFlicker>)>,
    mut pulses: MessageWriter<RechargePulse>,
    mut completed: MessageWriter<RechargeComplete>,
) {
    let mut rng = rand::thread_rng();

    for (zone_entity, mut zone) in zones.iter_mut() {
        let Some(orb_entity) = zone.orb else {
            continue;
        };
        let tuning = zone.tuning;
        let ZoneState::Charging(sequence) = &mut zone.state else {
            continue;
        };
        let progress = sequence.advance(time.delta());

        let Ok((mut orb, flicker)) = orbs.get_mut(orb_entity) else {
            zone.clear();
            continue;
        };

        let multiplier = match progress {
            StepProgress::Waiting { flickering: true } if tuning.jitter_max > tuning.jitter_min => {
                rng.gen_range(tuning.jitter_min..=tuning.jitter_max)
            }
            _ => 1.0,
        };
        if let Some(mut flicker) = flicker {
            flicker.0 = multiplier;
        }

        match progress {
            StepProgress::Waiting { .. } => {}
            StepProgress::Pulse {
                lifespan_elapsed, ..
            } => {
                orb.restore_point();
                orb.set_lifespan_elapsed(lifespan_elapsed);
                pulses.write(RechargePulse {
                    zone: zone_entity,
                    orb: orb_entity,
                    durability: orb.durability(),
                });
            }
            StepProgress::Complete => {
                orb.set_lifespan_elapsed(0.0);
                zone.finish();
                info!("Orb {:?} fully recharged", orb_entity);
                completed.write(RechargeComplete {
                    zone: zone_entity,
                    orb: orb_entity,
                });
            }
        }
    }
}
