use bevy::prelude::*;

/// Bar shown while a throw charges or an orb is held.
#[derive(Component)]
pub struct ProgressIndicator;

#[derive(Component)]
pub struct ProgressFill;

/// Control hint; rewritten when the control scheme changes.
#[derive(Component)]
pub struct PromptText;
