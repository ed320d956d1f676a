use bevy::prelude::*;

use crate::carry::components::{Carryable, Holder};
use crate::input::events::{Action, ControlSchemeChanged};
use crate::input::resources::{ControlScheme, InputBindings};
use crate::orb::components::Orb;
use crate::throw::components::ThrowCharge;
use crate::ui::components::*;

/// What the progress bar shows: the throw charge while charging something
/// held, else the carry timer of a held orb, else nothing.
pub fn progress_display(charge: Option<&ThrowCharge>, holding: bool, held_orb: Option<&Orb>) -> Option<f32> {
    if !holding {
        return None;
    }
    match (charge, held_orb) {
        (Some(charge), _) if charge.is_charging() => Some(charge.charge_fraction()),
        (_, Some(orb)) => Some(orb.carry_fraction()),
        _ => None,
    }
}

pub fn prompt_text(scheme: ControlScheme, bindings: &InputBindings) -> String {
    format!(
        "[{}] Pick up / drop    [{}] Hold to throw",
        scheme.glyph(Action::Interact, bindings),
        scheme.glyph(Action::Throw, bindings)
    )
}

pub fn spawn_hud(mut commands: Commands, scheme: Res<ControlScheme>, bindings: Res<InputBindings>) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            // Progress bar (bottom centre), hidden until needed
            parent
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        bottom: Val::Px(80.0),
                        left: Val::Percent(40.0),
                        width: Val::Percent(20.0),
                        height: Val::Px(10.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.8)),
                    Visibility::Hidden,
                    ProgressIndicator,
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(1.0, 0.75, 0.3)),
                        ProgressFill,
                    ));
                });

            parent.spawn((
                Text::new(prompt_text(*scheme, &bindings)),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(30.0),
                    left: Val::Px(20.0),
                    ..default()
                },
                PromptText,
            ));
        });
}

pub fn update_progress_indicator(
    holders: Query<(Entity, Option<&ThrowCharge>), With<Holder>>,
    items: Query<(&Carryable, Option<&Orb>)>,
    mut indicator_query: Query<&mut Visibility, With<ProgressIndicator>>,
    mut fill_query: Query<&mut Node, With<ProgressFill>>,
) {
    let Ok((holder, charge)) = holders.single() else {
        return;
    };
    let held = items.iter().find(|(carryable, _)| carryable.is_held_by(holder));
    let progress = progress_display(charge, held.is_some(), held.and_then(|(_, orb)| orb));

    for mut visibility in indicator_query.iter_mut() {
        let wanted = if progress.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }

    if let Some(fraction) = progress {
        for mut node in fill_query.iter_mut() {
            node.width = Val::Percent(fraction * 100.0);
        }
    }
}

/// Rewrites the prompt only when the scheme actually changed.
pub fn update_prompt_on_scheme_change(
    mut changes: MessageReader<ControlSchemeChanged>,
    bindings: Res<InputBindings>,
    mut query: Query<&mut Text, With<PromptText>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    for mut text in query.iter_mut() {
        **text = prompt_text(change.scheme, &bindings);
    }
}
