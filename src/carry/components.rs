use bevy::prelude::*;
use thiserror::Error;

/// Spring tuning for a held body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarryTuning {
    /// Pull per unit of distance to the anchor target
    pub strength: f32,
    /// Velocity damping, scaled up while the holder turns
    pub damping: f32,
    /// Beyond this distance the body is let go
    pub max_follow_distance: f32,
    /// Switch gravity off while held
    pub disable_gravity: bool,
}

impl Default for CarryTuning {
    fn default() -> Self {
        Self {
            strength: 150.0,
            damping: 12.0,
            max_follow_distance: 2.5,
            disable_gravity: true,
        }
    }
}

/// Drop the held body when the holder turns faster than `angular_threshold` (rad/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDrop {
    pub enabled: bool,
    pub angular_threshold: f32,
}

impl Default for SpinDrop {
    fn default() -> Self {
        Self {
            enabled: true,
            angular_threshold: 14.0,
        }
    }
}

/// Who holds a carryable and which anchor it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carrier {
    pub holder: Entity,
    pub anchor: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CarryError {
    #[error("holder {0} exposes no anchor to carry against")]
    MissingAnchor(Entity),
    #[error("already carried by {0}")]
    AlreadyCarried(Entity),
}

/// A rigid body that can be picked up and carried on a spring.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Carryable {
    /// Offset from the anchor, in anchor space, that the body is pulled to
    pub held_offset: Vec3,
    pub tuning: CarryTuning,
    pub spin_drop: SpinDrop,
    carrier: Option<Carrier>,
}

impl Carryable {
    pub fn new(tuning: CarryTuning, spin_drop: SpinDrop) -> Self {
        Self {
            held_offset: Vec3::ZERO,
            tuning,
            spin_drop,
            carrier: None,
        }
    }

    pub fn with_held_offset(mut self, offset: Vec3) -> Self {
        self.held_offset = offset;
        self
    }

    pub fn is_carried(&self) -> bool {
        self.carrier.is_some()
    }

    pub fn carrier(&self) -> Option<Carrier> {
        self.carrier
    }

    pub fn holder(&self) -> Option<Entity> {
        self.carrier.map(|c| c.holder)
    }

    pub fn is_held_by(&self, holder: Entity) -> bool {
        self.holder() == Some(holder)
    }

    /// Binds this carryable to `holder`, following the anchor the holder
    /// exposes right now. Nothing changes on error.
    pub fn attach(&mut self, holder: Entity, anchor: Option<Entity>) -> Result<Carrier, CarryError> {
        if let Some(current) = self.carrier {
            return Err(CarryError::AlreadyCarried(current.holder));
        }
        let anchor = anchor.ok_or(CarryError::MissingAnchor(holder))?;
        let carrier = Carrier { holder, anchor };
        self.carrier = Some(carrier);
        Ok(carrier)
    }

    /// Clears the carrier. `None` when nothing was holding it.
    pub fn detach(&mut self) -> Option<Carrier> {
        self.carrier.take()
    }
}

impl Default for Carryable {
    fn default() -> Self {
        Self::new(CarryTuning::default(), SpinDrop::default())
    }
}

/// Something that can hold a carryable. `anchor` is the entity whose global
/// pose the held body follows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Holder {
    pub anchor: Option<Entity>,
}

impl Holder {
    pub fn with_anchor(anchor: Entity) -> Self {
        Self {
            anchor: Some(anchor),
        }
    }
}

/// How fast a holder is turning its view, in radians per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct LookSpeed(pub f32);

/// Damped spring pulling a body toward its target. Damping grows with the
/// holder's turn rate so fast sweeps drag the body instead of snapping it.
pub fn spring_force(to_target: Vec3, velocity: Vec3, angular_speed: f32, tuning: &CarryTuning) -> Vec3 {
    let damping = tuning.damping * (1.0 + angular_speed * 0.2);
    to_target * tuning.strength - velocity * damping
}
