use bevy::prelude::*;

/// Marker component for the ground plane.
#[derive(Component)]
pub struct GroundPlane;

/// Marker for the decorative pedestal under a recharge zone.
#[derive(Component)]
pub struct ZonePedestal;
