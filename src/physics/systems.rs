use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use crate::physics::components::{PreStepVelocity, TriggerVolume};
use crate::physics::events::{ImpactEvent, TriggerEvent};

/// Remembers each tracked body's velocity before rapier steps it.
pub fn sample_velocities(mut bodies: Query<(&Velocity, &mut PreStepVelocity)>) {
    for (velocity, mut sampled) in bodies.iter_mut() {
        sampled.0 = velocity.linvel;
    }
}

/// Turns rapier collision messages into the impacts and trigger crossings
/// gameplay listens to. Sensor pairs only update trigger volumes.
pub fn translate_collisions(
    mut collisions: MessageReader<CollisionEvent>,
    bodies: Query<(&GlobalTransform, Option<&PreStepVelocity>)>,
    mut volumes: Query<&mut TriggerVolume>,
    mut impacts: MessageWriter<ImpactEvent>,
    mut triggers: MessageWriter<TriggerEvent>,
) {
    for collision in collisions.read() {
        match *collision {
            CollisionEvent::Started(a, b, flags) if flags.contains(CollisionEventFlags::SENSOR) => {
                let Some((trigger, entity)) = sensor_pair(&volumes, a, b) else {
                    continue;
                };
                if let Ok(mut volume) = volumes.get_mut(trigger) {
                    if volume.enter(entity) {
                        triggers.write(TriggerEvent::Entered { trigger, entity });
                    }
                }
            }
            CollisionEvent::Stopped(a, b, flags) if flags.contains(CollisionEventFlags::SENSOR) => {
                let Some((trigger, entity)) = sensor_pair(&volumes, a, b) else {
                    continue;
                };
                let Ok(mut volume) = volumes.get_mut(trigger) else {
                    continue;
                };
                // Despawned colliders leave silently
                if volume.exit(entity) && !flags.contains(CollisionEventFlags::REMOVED) {
                    triggers.write(TriggerEvent::Exited { trigger, entity });
                }
            }
            CollisionEvent::Started(a, b, _) => {
                if let Some(impact) = measure_impact(&bodies, a, b) {
                    impacts.write(impact);
                }
            }
            CollisionEvent::Stopped(..) => {}
        }
    }
}

/// Orders a sensor pair as (trigger, visitor).
fn sensor_pair(volumes: &Query<&mut TriggerVolume>, a: Entity, b: Entity) -> Option<(Entity, Entity)> {
    if volumes.contains(a) {
        Some((a, b))
    } else if volumes.contains(b) {
        Some((b, a))
    } else {
        None
    }
}

/// The side that carries `PreStepVelocity` becomes the impact's `entity`.
/// Pairs where neither side is tracked are not reported.
fn measure_impact(
    bodies: &Query<(&GlobalTransform, Option<&PreStepVelocity>)>,
    a: Entity,
    b: Entity,
) -> Option<ImpactEvent> {
    let sampled = |entity: Entity| bodies.get(entity).ok().and_then(|(_, velocity)| velocity.copied());

    let (entity, own, other) = match (sampled(a), sampled(b)) {
        (Some(velocity), _) => (a, velocity.0, b),
        (None, Some(velocity)) => (b, velocity.0, a),
        (None, None) => return None,
    };
    let theirs = sampled(other).map(|v| v.0).unwrap_or(Vec3::ZERO);
    let (transform, _) = bodies.get(entity).ok()?;

    Some(ImpactEvent {
        entity,
        other: Some(other),
        relative_velocity: own - theirs,
        contact_point: transform.translation(),
    })
}

pub fn pause_simulation(mut configs: Query<&mut RapierConfiguration>) {
    for mut config in configs.iter_mut() {
        config.physics_pipeline_active = false;
    }
}

pub fn resume_simulation(mut configs: Query<&mut RapierConfiguration>) {
    for mut config in configs.iter_mut() {
        config.physics_pipeline_active = true;
    }
}
