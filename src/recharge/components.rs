use std::time::Duration;

use bevy::prelude::*;

/// Pacing of a recharge station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RechargeTuning {
    /// Seconds to restore every missing point, split evenly between them
    pub recharge_duration: f32,
    /// How quickly a caught orb closes on the zone centre (per second)
    pub closing_rate: f32,
    /// Distance at which the orb snaps to the centre
    pub snap_threshold: f32,
    /// Leading share of each step spent flickering
    pub flicker_share: f32,
    pub jitter_min: f32,
    pub jitter_max: f32,
}

impl Default for RechargeTuning {
    fn default() -> Self {
        Self {
            recharge_duration: 4.0,
            closing_rate: 4.0,
            snap_threshold: 0.03,
            flicker_share: 0.3,
            jitter_min: 0.35,
            jitter_max: 1.6,
        }
    }
}

/// Result of advancing a recharge sequence by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepProgress {
    /// Inside a step; `flickering` during its leading share
    Waiting { flickering: bool },
    /// A step finished and one point should be restored
    Pulse { steps_done: u32, lifespan_elapsed: f32 },
    /// Every step has finished
    Complete,
}

/// Staged restoration of the points an orb was missing at capture.
/// Dropping the sequence abandons whatever step was in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct RechargeSequence {
    total_steps: u32,
    steps_done: u32,
    step: Timer,
    flicker_share: f32,
    start_lifespan: f32,
}

impl RechargeSequence {
    pub fn new(missing: u32, recharge_duration: f32, start_lifespan: f32, flicker_share: f32) -> Self {
        let step_delay = if missing == 0 {
            0.0
        } else {
            recharge_duration.max(0.0) / missing as f32
        };
        Self {
            total_steps: missing,
            steps_done: 0,
            step: Timer::from_seconds(step_delay, TimerMode::Once),
            flicker_share: flicker_share.clamp(0.0, 1.0),
            start_lifespan,
        }
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn steps_done(&self) -> u32 {
        self.steps_done
    }

    pub fn step_delay(&self) -> f32 {
        self.step.duration().as_secs_f32()
    }

    pub fn is_complete(&self) -> bool {
        self.steps_done >= self.total_steps
    }

    /// Lifespan after `steps_done` steps: linear from the capture value to zero.
    pub fn lifespan_after_steps(&self) -> f32 {
        if self.total_steps == 0 {
            return 0.0;
        }
        let progress = self.steps_done as f32 / self.total_steps as f32;
        self.start_lifespan * (1.0 - progress)
    }

    /// At most one step finishes per call; leftover time is discarded.
    pub fn advance(&mut self, delta: Duration) -> StepProgress {
        if self.is_complete() {
            return StepProgress::Complete;
        }

        if self.step.tick(delta).just_finished() {
            self.step.reset();
            self.steps_done += 1;
            return StepProgress::Pulse {
                steps_done: self.steps_done,
                lifespan_elapsed: self.lifespan_after_steps(),
            };
        }

        StepProgress::Waiting {
            flickering: self.step.fraction() < self.flicker_share,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ZoneState {
    #[default]
    Idle,
    /// Pulling the orb to the centre
    Catching,
    Charging(RechargeSequence),
}

/// A trigger region that catches free orbs and restores them.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct RechargeZone {
    pub tuning: RechargeTuning,
    pub state: ZoneState,
    /// Orb caught or docked here
    pub orb: Option<Entity>,
}

impl RechargeZone {
    pub fn new(tuning: RechargeTuning) -> Self {
        Self {
            tuning,
            ..default()
        }
    }

    pub fn is_free(&self) -> bool {
        self.orb.is_none()
    }

    pub fn holds(&self, orb: Entity) -> bool {
        self.orb == Some(orb)
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.state, ZoneState::Charging(_))
    }

    /// Starts catching `orb`. False if the zone is already occupied.
    pub fn begin_catch(&mut self, orb: Entity) -> bool {
        if !self.is_free() {
            return false;
        }
        self.orb = Some(orb);
        self.state = ZoneState::Catching;
        true
    }

    pub fn start_charging(&mut self, sequence: RechargeSequence) {
        self.state = ZoneState::Charging(sequence);
    }

    /// Back to idle with the orb still docked.
    pub fn finish(&mut self) {
        self.state = ZoneState::Idle;
    }

    /// Forgets the orb and discards any staged work.
    pub fn clear(&mut self) -> Option<Entity> {
        self.state = ZoneState::Idle;
        self.orb.take()
    }
}
