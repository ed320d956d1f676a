use bevy::prelude::*;
use bevy_rapier3d::prelude::{GravityScale, Velocity};

use crate::carry::components::Carryable;
use crate::carry::events::{DropReason, DropRequest, Dropped};
use crate::carry::systems::release;
use crate::orb::components::*;
use crate::orb::events::*;
use crate::orb::visuals::glow_for;
use crate::physics::events::ImpactEvent;

/// Advances orb timers. A carry timeout becomes a drop request for the
/// carry processor; a spent lifespan shatters the orb.
pub fn tick_orbs(
    time: Res<Time>,
    mut orbs: Query<(Entity, &mut Orb, &Carryable, &GlobalTransform)>,
    mut drop_requests: MessageWriter<DropRequest>,
    mut shattered: MessageWriter<OrbShattered>,
) {
    for (entity, mut orb, carryable, transform) in orbs.iter_mut() {
        let tick = orb.advance(time.delta(), carryable.is_carried());

        if tick.carry_expired && carryable.is_carried() {
            debug!("Orb {:?} held too long", entity);
            drop_requests.write(DropRequest::new(entity, DropReason::CarryTimeout));
        }

        if tick.burnt_out && orb.shatter() {
            info!("Orb {:?} burnt out", entity);
            shattered.write(OrbShattered {
                orb: entity,
                position: transform.translation(),
                cause: ShatterCause::BurntOut,
            });
        }
    }
}

/// Starts the post-drop grace window whenever an orb leaves a hand.
pub fn track_orb_detach(time: Res<Time>, mut dropped: MessageReader<Dropped>, mut orbs: Query<&mut Orb>) {
    let now = time.elapsed_secs();
    for drop in dropped.read() {
        if let Ok(mut orb) = orbs.get_mut(drop.item) {
            orb.note_detached(now);
        }
    }
}

/// Turns contacts into durability loss.
pub fn apply_impact_damage(
    time: Res<Time>,
    mut impacts: MessageReader<ImpactEvent>,
    mut orbs: Query<(&mut Orb, &GlobalTransform)>,
    mut damaged: MessageWriter<OrbDamaged>,
    mut shattered: MessageWriter<OrbShattered>,
) {
    let now = time.elapsed_secs();

    for impact in impacts.read() {
        for entity in std::iter::once(impact.entity).chain(impact.other) {
            let Ok((mut orb, transform)) = orbs.get_mut(entity) else {
                continue;
            };

            let speed = impact.impact_speed();
            match orb.apply_impact(speed, now) {
                ImpactOutcome::Ignored => {}
                ImpactOutcome::Damaged { points, .. } => {
                    debug!("Orb {:?} lost {} point(s) at {:.1} m/s", entity, points, speed);
                    damaged.write(OrbDamaged {
                        orb: entity,
                        points,
                        remaining: orb.durability(),
                        impact_speed: speed,
                    });
                }
                ImpactOutcome::Shattered { points } => {
                    info!("Orb {:?} shattered at {:.1} m/s", entity, speed);
                    damaged.write(OrbDamaged {
                        orb: entity,
                        points,
                        remaining: 0,
                        impact_speed: speed,
                    });
                    shattered.write(OrbShattered {
                        orb: entity,
                        position: transform.translation(),
                        cause: ShatterCause::Impact,
                    });
                }
            }
        }
    }
}

/// Final cleanup for a shattered orb: out of the hand, light off, despawned.
pub fn despawn_shattered_orbs(
    mut commands: Commands,
    mut shattered: MessageReader<OrbShattered>,
    mut orbs: Query<(&mut Carryable, &mut GravityScale, &mut Velocity, Option<&mut PointLight>), With<Orb>>,
    holder_velocities: Query<&Velocity, Without<Carryable>>,
    mut dropped: MessageWriter<Dropped>,
) {
    for event in shattered.read() {
        let Ok((mut carryable, mut gravity, mut velocity, light)) = orbs.get_mut(event.orb) else {
            continue;
        };

        let inherited = carryable
            .holder()
            .and_then(|holder| holder_velocities.get(holder).ok())
            .map(|v| v.linvel)
            .unwrap_or(velocity.linvel);

        if let Some(carrier) = release(&mut carryable, &mut gravity, &mut velocity, inherited) {
            dropped.write(Dropped {
                item: event.orb,
                holder: carrier.holder,
                reason: DropReason::Shattered,
            });
        }

        if let Some(mut light) = light {
            light.intensity = 0.0;
        }

        commands.entity(event.orb).try_despawn();
    }
}

/// Recomputes every orb's glow and pushes it into its light.
pub fn update_orb_glow(
    time: Res<Time>,
    mut orbs: Query<(&Orb, &mut OrbGlow, Option<&RechargeFlicker>, Option<&mut PointLight>)>,
) {
    let now = time.elapsed_secs();

    for (orb, mut glow, recharge_flicker, light) in orbs.iter_mut() {
        if orb.is_shattered() {
            continue;
        }

        let mut sample = glow_for(&orb.config.glow, orb.vitality(), now);
        if let Some(flicker) = recharge_flicker {
            sample.intensity *= flicker.0;
        }
        *glow = sample;

        if let Some(mut light) = light {
            light.color = sample.color;
            light.intensity = sample.intensity;
            light.range = sample.range;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carry::components::Holder;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn orb_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_message::<DropRequest>();
        app.add_message::<Dropped>();
        app.add_message::<ImpactEvent>();
        app.add_message::<OrbDamaged>();
        app.add_message::<OrbShattered>();
        app
    }

    fn config() -> OrbConfig {
        OrbConfig {
            max_durability: 3,
            max_carry_time: 1.0,
            lifespan: 50.0,
            ..default()
        }
    }

    fn spawn_orb(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Orb::new(config()),
                OrbGlow::default(),
                Carryable::default(),
                GravityScale::default(),
                Velocity::default(),
                GlobalTransform::from_translation(Vec3::new(1.0, 2.0, 3.0)),
                PointLight::default(),
            ))
            .id()
    }

    fn hold(app: &mut App, orb: Entity) -> Entity {
        let anchor = app.world_mut().spawn(GlobalTransform::IDENTITY).id();
        let holder = app
            .world_mut()
            .spawn((Holder::with_anchor(anchor), Velocity::linear(Vec3::X)))
            .id();
        app.world_mut()
            .get_mut::<Carryable>(orb)
            .unwrap()
            .attach(holder, Some(anchor))
            .unwrap();
        holder
    }

    fn advance(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
    }

    fn hit(app: &mut App, orb: Entity, speed: f32) {
        app.world_mut().write_message(ImpactEvent::with_ground(
            orb,
            Vec3::new(0.0, -speed, 0.0),
            Vec3::ZERO,
        ));
        let _ = app.world_mut().run_system_once(apply_impact_damage);
        let _ = app.world_mut().run_system_once(despawn_shattered_orbs);
        app.world_mut().resource_mut::<Messages<ImpactEvent>>().clear();
        app.world_mut().resource_mut::<Messages<OrbShattered>>().clear();
    }

    fn drop_requests(app: &mut App) -> Vec<DropRequest> {
        app.world_mut()
            .run_system_once(|mut reader: MessageReader<DropRequest>| reader.read().copied().collect::<Vec<_>>())
            .unwrap()
    }

    fn shattered(app: &mut App) -> Vec<OrbShattered> {
        app.world_mut()
            .run_system_once(|mut reader: MessageReader<OrbShattered>| reader.read().copied().collect::<Vec<_>>())
            .unwrap()
    }

    fn dropped(app: &mut App) -> Vec<Dropped> {
        app.world_mut()
            .run_system_once(|mut reader: MessageReader<Dropped>| reader.read().copied().collect::<Vec<_>>())
            .unwrap()
    }

    #[test]
    fn test_carry_timeout_requests_one_drop() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);
        hold(&mut app, orb);

        for _ in 0..12 {
            advance(&mut app, 0.1);
            let _ = app.world_mut().run_system_once(tick_orbs);
        }

        assert_eq!(
            drop_requests(&mut app),
            vec![DropRequest::new(orb, DropReason::CarryTimeout)]
        );
        assert!(app.world().get::<Orb>(orb).unwrap().carry_elapsed() < 0.25);
    }

    #[test]
    fn test_free_orb_never_times_out() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);

        advance(&mut app, 5.0);
        let _ = app.world_mut().run_system_once(tick_orbs);

        assert!(drop_requests(&mut app).is_empty());
        assert_eq!(app.world().get::<Orb>(orb).unwrap().carry_elapsed(), 0.0);
    }

    #[test]
    fn test_burn_out_shatters_through_the_same_path() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);

        advance(&mut app, 60.0);
        let _ = app.world_mut().run_system_once(tick_orbs);

        let events = shattered(&mut app);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cause, ShatterCause::BurntOut);
        assert_eq!(events[0].position, Vec3::new(1.0, 2.0, 3.0));

        let _ = app.world_mut().run_system_once(despawn_shattered_orbs);
        assert!(app.world().get_entity(orb).is_err());
    }

    #[test]
    fn test_three_spaced_hits_shatter_and_despawn() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);

        for remaining in [2, 1] {
            advance(&mut app, 1.0);
            hit(&mut app, orb, 8.0);
            assert_eq!(app.world().get::<Orb>(orb).unwrap().durability(), remaining);
        }

        advance(&mut app, 1.0);
        hit(&mut app, orb, 8.0);

        assert!(app.world().get_entity(orb).is_err());
    }

    #[test]
    fn test_hits_within_cooldown_cost_one_point() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);

        advance(&mut app, 1.0);
        hit(&mut app, orb, 8.0);
        advance(&mut app, 0.1);
        hit(&mut app, orb, 8.0);

        assert_eq!(app.world().get::<Orb>(orb).unwrap().durability(), 2);
    }

    #[test]
    fn test_drop_opens_grace_window() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);
        let holder = app.world_mut().spawn_empty().id();

        advance(&mut app, 1.0);
        app.world_mut().write_message(Dropped {
            item: orb,
            holder,
            reason: DropReason::Thrown,
        });
        let _ = app.world_mut().run_system_once(track_orb_detach);
        advance(&mut app, 0.1);
        hit(&mut app, orb, 8.0);

        assert_eq!(app.world().get::<Orb>(orb).unwrap().durability(), 3);
    }

    #[test]
    fn test_shatter_while_held_drops_first() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);
        let holder = hold(&mut app, orb);

        advance(&mut app, 1.0);
        hit(&mut app, orb, 30.0);

        assert_eq!(
            dropped(&mut app),
            vec![Dropped {
                item: orb,
                holder,
                reason: DropReason::Shattered
            }]
        );
        assert!(app.world().get_entity(orb).is_err());
    }

    #[test]
    fn test_glow_reaches_point_light() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);

        let _ = app.world_mut().run_system_once(update_orb_glow);

        let glow = *app.world().get::<OrbGlow>(orb).unwrap();
        let light = app.world().get::<PointLight>(orb).unwrap();
        assert_eq!(glow.intensity, GlowConfig::default().start_intensity);
        assert_eq!(light.intensity, glow.intensity);
        assert_eq!(light.range, glow.range);
    }

    #[test]
    fn test_recharge_flicker_scales_light() {
        let mut app = orb_app();
        let orb = spawn_orb(&mut app);
        app.world_mut().entity_mut(orb).insert(RechargeFlicker(0.5));

        let _ = app.world_mut().run_system_once(update_orb_glow);

        let light = app.world().get::<PointLight>(orb).unwrap();
        assert_eq!(light.intensity, GlowConfig::default().start_intensity * 0.5);
    }
}
