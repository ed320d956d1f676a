use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::carry::components::LookSpeed;
use crate::input::events::{Action, ActionEvent};
use crate::input::resources::PlayerInput;
use crate::player::components::*;

/// Turns the body and camera from the look input and publishes how fast the
/// view is sweeping, which the carry spring and spin-drop read.
pub fn player_look(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut players: Query<(&mut Transform, &mut LookAngles, &mut LookSpeed), With<Player>>,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut angles, mut look_speed) in players.iter_mut() {
        let swept = angles.turn(input.look);
        look_speed.0 = if dt > 0.0 { swept / dt } else { 0.0 };

        transform.rotation = Quat::from_rotation_y(angles.yaw);
        for mut camera in cameras.iter_mut() {
            camera.rotation = Quat::from_rotation_x(angles.pitch);
        }
    }
}

/// Walk/run relative to facing, jump when grounded, fall with gravity and
/// stop at the ground. The resulting velocity is published for held items
/// to inherit on release.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut actions: MessageReader<ActionEvent>,
    mut players: Query<(&mut Transform, &Player, &mut Velocity, &mut PlayerMotion)>,
) {
    let dt = time.delta_secs();
    let jump = actions.read().any(|event| event.is_press_of(Action::Jump));

    for (mut transform, player, mut velocity, mut motion) in players.iter_mut() {
        let local = Vec3::new(input.movement.x, 0.0, -input.movement.y);
        let mut horizontal = transform.rotation * local;
        horizontal.y = 0.0;
        let horizontal = horizontal.normalize_or_zero() * local.length().min(1.0) * player.speed(input.running);

        if jump && motion.grounded {
            motion.vertical_speed = player.jump_speed;
            motion.grounded = false;
        } else if !motion.grounded {
            motion.vertical_speed -= FALL_ACCELERATION * dt;
        }

        transform.translation += (horizontal + Vec3::Y * motion.vertical_speed) * dt;

        if transform.translation.y <= GROUND_LEVEL {
            transform.translation.y = GROUND_LEVEL;
            motion.vertical_speed = 0.0;
            motion.grounded = true;
        }

        velocity.linvel = Vec3::new(horizontal.x, motion.vertical_speed, horizontal.z);
    }
}
