//! Pure mapping from orb vitality to light parameters.

use bevy::math::FloatExt;
use bevy::prelude::*;

use crate::orb::components::{GlowConfig, OrbGlow, Vitality};

/// Deterministic pseudo-random value in [0, 1] for an integer lattice point.
fn lattice(i: i32) -> f32 {
    let mut n = (i as u32).wrapping_mul(0x27d4_eb2d) ^ 0x9e37_79b9;
    n ^= n >> 15;
    n = n.wrapping_mul(0x2c1b_3c6d);
    n ^= n >> 12;
    (n & 0xffff) as f32 / 65535.0
}

/// Smooth 1D value noise in [0, 1].
pub fn smooth_noise(t: f32) -> f32 {
    let base = t.floor();
    let frac = t - base;
    let i = base as i32;
    let eased = frac * frac * (3.0 - 2.0 * frac);
    lattice(i).lerp(lattice(i.wrapping_add(1)), eased)
}

/// Multiplier in `[floor, 1]` that wanders smoothly with time.
pub fn flicker(time: f32, speed: f32, floor: f32) -> f32 {
    floor + (1.0 - floor) * smooth_noise(time * speed)
}

/// Approximate sRGB colour of a black body at `kelvin`.
pub fn kelvin_to_color(kelvin: f32) -> Color {
    let t = kelvin.clamp(1000.0, 40000.0) / 100.0;

    let red = if t <= 66.0 {
        255.0
    } else {
        329.698_73 * (t - 60.0).powf(-0.133_204_76)
    };

    let green = if t <= 66.0 {
        99.470_8 * t.ln() - 161.119_57
    } else {
        288.122_16 * (t - 60.0).powf(-0.075_514_85)
    };

    let blue = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_73 * (t - 10.0).ln() - 305.044_8
    };

    Color::srgb(
        (red / 255.0).clamp(0.0, 1.0),
        (green / 255.0).clamp(0.0, 1.0),
        (blue / 255.0).clamp(0.0, 1.0),
    )
}

/// Glow for the given vitality at game time `time`.
/// The last durability point flickers; everything else is a straight lerp.
pub fn glow_for(glow: &GlowConfig, vitality: Vitality, time: f32) -> OrbGlow {
    let durability_fraction = if vitality.max_durability == 0 {
        0.0
    } else {
        vitality.durability as f32 / vitality.max_durability as f32
    };

    let kelvin = glow.cool_kelvin.lerp(glow.warm_kelvin, vitality.carry_fraction.clamp(0.0, 1.0));
    let life = vitality.lifespan_fraction.clamp(0.0, 1.0);

    let mut intensity = glow.start_intensity.lerp(glow.end_intensity, life) * durability_fraction;
    let range = glow.start_range.lerp(glow.end_range, life) * durability_fraction;

    if vitality.durability == 1 {
        intensity *= flicker(time, glow.flicker_speed, glow.flicker_floor);
    }

    OrbGlow {
        color: kelvin_to_color(kelvin),
        intensity,
        range,
    }
}
