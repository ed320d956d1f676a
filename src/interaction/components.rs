use bevy::prelude::*;

/// Something the player can aim at and interact with, hit-tested as a sphere.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Interactable {
    pub radius: f32,
}

impl Default for Interactable {
    fn default() -> Self {
        Self { radius: 0.3 }
    }
}

/// Highlight marker on the interactable currently aimed at.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Outlined;

/// What a holder is aiming at, refreshed every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct InteractionTarget {
    pub reach: f32,
    pub target: Option<Entity>,
}

impl Default for InteractionTarget {
    fn default() -> Self {
        Self {
            reach: 3.0,
            target: None,
        }
    }
}

/// Distance along a unit-length ray to the first hit on a sphere, if any.
/// A ray starting inside the sphere hits at distance zero.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;

    if closest_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;

    if far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}
