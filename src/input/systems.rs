use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::input::events::{Action, ActionEvent, ControlSchemeChanged};
use crate::input::resources::{ControlScheme, InputBindings, PlayerInput};

const ACTIONS: [Action; 5] = [
    Action::Interact,
    Action::Jump,
    Action::Run,
    Action::Throw,
    Action::Pause,
];

/// Which scheme is active after this frame's device activity.
/// Keyboard/mouse wins ties.
pub fn scheme_after_activity(current: ControlScheme, keyboard_mouse_active: bool, gamepad_active: bool) -> ControlScheme {
    if keyboard_mouse_active {
        ControlScheme::KeyboardMouse
    } else if gamepad_active {
        ControlScheme::Gamepad
    } else {
        current
    }
}

fn apply_deadzone(stick: Vec2, deadzone: f32) -> Vec2 {
    if stick.length() < deadzone {
        Vec2::ZERO
    } else {
        stick
    }
}

fn keyboard_movement(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    axis.normalize_or_zero()
}

fn action_pressed(
    action: Action,
    keys: Option<&ButtonInput<KeyCode>>,
    mouse: Option<&ButtonInput<MouseButton>>,
    bindings: &InputBindings,
) -> (bool, bool) {
    let mut just_pressed = false;
    let mut just_released = false;

    if let Some(keys) = keys {
        let key = bindings.key_for(action);
        just_pressed |= keys.just_pressed(key);
        just_released |= keys.just_released(key);
    }
    if let (Action::Throw, Some(mouse)) = (action, mouse) {
        just_pressed |= mouse.just_pressed(bindings.throw_mouse);
        just_released |= mouse.just_released(bindings.throw_mouse);
    }

    (just_pressed, just_released)
}

/// Polls keyboard, mouse and gamepads into `PlayerInput` and action messages.
/// The control scheme is re-evaluated from device activity and announced
/// only when it changes.
#[allow(clippy::too_many_arguments)]
pub fn gather_player_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
    gamepads: Query<&Gamepad>,
    bindings: Res<InputBindings>,
    time: Res<Time>,
    mut input: ResMut<PlayerInput>,
    mut scheme: ResMut<ControlScheme>,
    mut actions: MessageWriter<ActionEvent>,
    mut scheme_changed: MessageWriter<ControlSchemeChanged>,
) {
    let keys = keys.as_deref();
    let mouse = mouse.as_deref();
    let mouse_delta = mouse_motion.map(|m| m.delta).unwrap_or(Vec2::ZERO);

    let mut movement = keys.map(keyboard_movement).unwrap_or(Vec2::ZERO);
    let mut look = mouse_delta * bindings.mouse_sensitivity;
    let mut running = keys.is_some_and(|k| k.pressed(bindings.run));

    let keyboard_mouse_active = keys.is_some_and(|k| k.get_just_pressed().next().is_some())
        || mouse.is_some_and(|m| m.get_just_pressed().next().is_some())
        || mouse_delta != Vec2::ZERO;
    let mut gamepad_active = false;

    for action in ACTIONS {
        let (mut just_pressed, mut just_released) = action_pressed(action, keys, mouse, &bindings);

        for gamepad in gamepads.iter() {
            let button = bindings.pad_for(action);
            just_pressed |= gamepad.just_pressed(button);
            just_released |= gamepad.just_released(button);
        }

        if just_pressed {
            actions.write(ActionEvent::pressed(action));
        }
        if just_released {
            actions.write(ActionEvent::released(action));
        }
    }

    for gamepad in gamepads.iter() {
        let left = apply_deadzone(gamepad.left_stick(), bindings.stick_deadzone);
        let right = apply_deadzone(gamepad.right_stick(), bindings.stick_deadzone);

        movement += left;
        look += Vec2::new(right.x, -right.y) * bindings.stick_look_speed * time.delta_secs();
        running |= gamepad.pressed(bindings.run_pad);

        gamepad_active |= left != Vec2::ZERO
            || right != Vec2::ZERO
            || gamepad.get_just_pressed().next().is_some();
    }

    *input = PlayerInput {
        movement: movement.clamp_length_max(1.0),
        look,
        running,
    };

    let next = scheme_after_activity(*scheme, keyboard_mouse_active, gamepad_active);
    if next != *scheme {
        *scheme = next;
        debug!("Control scheme switched to {:?}", next);
        scheme_changed.write(ControlSchemeChanged { scheme: next });
    }
}
