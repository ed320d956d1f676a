use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::carry::components::{Carryable, Holder};
use crate::game::components::*;
use crate::game::resources::{SceneConfig, EYE_HEIGHT};
use crate::input::events::{Action, ActionEvent};
use crate::interaction::components::{Interactable, InteractionTarget};
use crate::orb::components::{Orb, OrbGlow};
use crate::physics::components::{PreStepVelocity, TriggerVolume};
use crate::player::components::{HoldAnchor, PlayerCamera};
use crate::recharge::components::RechargeZone;
use crate::states::GameState;
use crate::throw::components::ThrowCharge;

/// Captured orbs turn kinematic inside a static sensor, so that pair has to
/// stay active for the trigger to keep reporting.
fn orb_collision_types() -> ActiveCollisionTypes {
    ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC
}

/// Spawns a fresh orb with its physics body and light.
pub fn spawn_orb(commands: &mut Commands, config: &SceneConfig) -> Entity {
    commands
        .spawn((
            Name::new("Orb"),
            Orb::new(config.orb),
            OrbGlow::default(),
            Carryable::new(config.carry, config.spin_drop),
            Interactable {
                radius: config.orb_radius * 1.5,
            },
            (
                RigidBody::Dynamic,
                Collider::ball(config.orb_radius),
                ColliderMassProperties::Mass(config.orb_mass),
                Restitution::coefficient(0.35),
                Damping {
                    linear_damping: 0.05,
                    angular_damping: 0.5,
                },
                Ccd::enabled(),
                GravityScale::default(),
                Velocity::default(),
                ExternalForce::default(),
                ExternalImpulse::default(),
                PreStepVelocity::default(),
                ActiveEvents::COLLISION_EVENTS,
                orb_collision_types(),
            ),
            PointLight {
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(config.orb_spawn),
        ))
        .id()
}

pub fn spawn_recharge_zone(commands: &mut Commands, config: &SceneConfig) -> Entity {
    commands
        .spawn((
            Name::new("Recharge zone"),
            RechargeZone::new(config.recharge),
            TriggerVolume::default(),
            Collider::ball(config.zone_radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            orb_collision_types(),
            Transform::from_translation(config.zone_position),
            Visibility::default(),
        ))
        .id()
}

/// Player body with the camera as a child and the hold anchor under the camera.
pub fn spawn_player(commands: &mut Commands, config: &SceneConfig) -> Entity {
    let camera = commands
        .spawn((
            Camera3d::default(),
            PlayerCamera,
            Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
        ))
        .id();
    let anchor = commands
        .spawn((
            HoldAnchor,
            Transform::from_translation(config.hold_point),
            ChildOf(camera),
        ))
        .id();
    let player = commands
        .spawn((
            Name::new("Player"),
            config.player,
            Holder::with_anchor(anchor),
            ThrowCharge::new(config.throw),
            InteractionTarget {
                reach: config.reach,
                target: None,
            },
            Transform::from_xyz(0.0, 0.0, 2.0),
            Visibility::default(),
        ))
        .id();
    commands.entity(camera).insert(ChildOf(player));
    player
}

/// Builds the play area. Meshes are only attached when render assets exist,
/// so the scene also builds headless.
pub fn setup_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    commands.spawn((
        DirectionalLight {
            illuminance: 2_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.4, 0.0)),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 60.0,
        ..default()
    });

    let ground = commands
        .spawn((GroundPlane, RigidBody::Fixed, Transform::default(), Visibility::default()))
        .with_child((Collider::cuboid(20.0, 0.05, 20.0), Transform::from_xyz(0.0, -0.05, 0.0)))
        .id();
    let orb = spawn_orb(&mut commands, &config);
    let zone = spawn_recharge_zone(&mut commands, &config);
    spawn_player(&mut commands, &config);

    let pedestal = commands
        .spawn((
            ZonePedestal,
            RigidBody::Fixed,
            Collider::cylinder(0.25, config.zone_radius),
            Transform::from_xyz(config.zone_position.x, 0.25, config.zone_position.z),
        ))
        .id();

    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        info!("No render assets, scene built without meshes");
        return;
    };

    commands.entity(ground).insert((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(40.0, 40.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.27, 0.3))),
    ));
    commands.entity(orb).insert((
        Mesh3d(meshes.add(Sphere::new(config.orb_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.9, 0.7),
            emissive: LinearRgba::rgb(4.0, 3.2, 2.0),
            ..default()
        })),
    ));
    commands.entity(zone).insert((
        Mesh3d(meshes.add(Sphere::new(config.zone_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.3, 0.6, 1.0, 0.15),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
    ));
    commands.entity(pedestal).insert((
        Mesh3d(meshes.add(Cylinder::new(config.zone_radius, 0.5))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.35, 0.4))),
    ));
}

/// Pause key flips between playing and paused.
pub fn toggle_pause(
    mut actions: MessageReader<ActionEvent>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let presses = actions.read().filter(|event| event.is_press_of(Action::Pause)).count();
    if presses % 2 == 0 {
        return;
    }

    let next = match state.get() {
        GameState::Playing => GameState::Paused,
        GameState::Paused => GameState::Playing,
    };
    info!("Game state -> {:?}", next);
    next_state.set(next);
}
