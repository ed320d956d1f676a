use std::time::Duration;

use bevy::prelude::*;
use bevy::time::Stopwatch;

/// Tuning for press-and-hold throws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowTuning {
    pub min_force: f32,
    pub max_force: f32,
    /// Force gained per second of holding
    pub charge_rate: f32,
    /// Shorter holds are a gentle drop
    pub hold_to_throw: f32,
}

impl Default for ThrowTuning {
    fn default() -> Self {
        Self {
            min_force: 2.0,
            max_force: 12.0,
            charge_rate: 8.0,
            hold_to_throw: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargePhase {
    #[default]
    Idle,
    Charging,
}

/// What a release of the throw button resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrowOutcome {
    /// Released without an active charge
    Ignored,
    /// Short tap: let go without impulse
    Drop,
    /// Held long enough: throw with this force
    Throw { force: f32 },
}

/// Charge state for a holder's throw button. Force grows from the minimum
/// with the time the button has been held.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct ThrowCharge {
    pub tuning: ThrowTuning,
    phase: ChargePhase,
    hold: Stopwatch,
}

impl ThrowCharge {
    pub fn new(tuning: ThrowTuning) -> Self {
        Self {
            tuning,
            ..default()
        }
    }

    pub fn phase(&self) -> ChargePhase {
        self.phase
    }

    pub fn is_charging(&self) -> bool {
        self.phase == ChargePhase::Charging
    }

    pub fn hold_elapsed(&self) -> f32 {
        self.hold.elapsed_secs()
    }

    pub fn current_force(&self) -> f32 {
        if !self.is_charging() {
            return 0.0;
        }
        let gained = self.tuning.charge_rate * self.hold.elapsed_secs();
        (self.tuning.min_force + gained).min(self.tuning.max_force)
    }

    /// Charge progress from min to max force (0.0 to 1.0)
    pub fn charge_fraction(&self) -> f32 {
        if !self.is_charging() {
            return 0.0;
        }
        let span = self.tuning.max_force - self.tuning.min_force;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.current_force() - self.tuning.min_force) / span).clamp(0.0, 1.0)
    }

    pub fn begin(&mut self) {
        self.phase = ChargePhase::Charging;
        self.hold.reset();
    }

    pub fn tick(&mut self, delta: Duration) {
        if self.is_charging() {
            self.hold.tick(delta);
        }
    }

    /// Ends the charge and resets it, whichever way it resolves.
    pub fn release(&mut self) -> ThrowOutcome {
        if !self.is_charging() {
            return ThrowOutcome::Ignored;
        }

        let outcome = if self.hold_elapsed() < self.tuning.hold_to_throw {
            ThrowOutcome::Drop
        } else {
            ThrowOutcome::Throw {
                force: self.current_force().clamp(self.tuning.min_force, self.tuning.max_force),
            }
        };

        self.cancel();
        outcome
    }

    /// Drops the charge without an outcome.
    pub fn cancel(&mut self) {
        self.phase = ChargePhase::Idle;
        self.hold.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(secs: f32) -> Duration {
        Duration::from_secs_f32(secs)
    }

    fn tuning() -> ThrowTuning {
        ThrowTuning {
            min_force: 2.0,
            max_force: 10.0,
            charge_rate: 4.0,
            hold_to_throw: 0.3,
        }
    }

    #[test]
    fn test_new_charge_is_idle() {
        let charge = ThrowCharge::new(tuning());
        assert_eq!(charge.phase(), ChargePhase::Idle);
        assert_eq!(charge.current_force(), 0.0);
        assert_eq!(charge.charge_fraction(), 0.0);
    }

    #[test]
    fn test_begin_resets_to_min_force() {
        let mut charge = ThrowCharge::new(tuning());
        charge.begin();
        charge.tick(secs(1.0));
        charge.begin();
        assert!(charge.is_charging());
        assert_eq!(charge.hold_elapsed(), 0.0);
        assert_eq!(charge.current_force(), 2.0);
    }

    #[test]
    fn test_tick_is_monotonic_and_capped() {
        let mut charge = ThrowCharge::new(tuning());
        charge.begin();

        let mut last = charge.current_force();
        for _ in 0..50 {
            charge.tick(secs(0.1));
            assert!(charge.current_force() >= last);
            last = charge.current_force();
        }
        assert_eq!(charge.current_force(), 10.0);
        assert_eq!(charge.charge_fraction(), 1.0);
    }

    #[test]
    fn test_tick_while_idle_does_nothing() {
        let mut charge = ThrowCharge::new(tuning());
        charge.tick(secs(1.0));
        assert_eq!(charge.hold_elapsed(), 0.0);
        assert_eq!(charge.current_force(), 0.0);
    }

    #[test]
    fn test_short_hold_is_a_drop() {
        let mut charge = ThrowCharge::new(tuning());
        charge.begin();
        charge.tick(secs(0.1));
        assert_eq!(charge.release(), ThrowOutcome::Drop);
    }

    #[test]
    fn test_hold_at_threshold_is_a_throw() {
        let mut charge = ThrowCharge::new(tuning());
        charge.begin();
        charge.tick(secs(0.3));
        match charge.release() {
            ThrowOutcome::Throw { force } => {
                assert!(force >= 2.0 && force <= 10.0);
                assert!((force - 3.2).abs() < 0.001);
            }
            other => panic!("expected throw, got {:?}", other),
        }
    }

    #[test]
    fn test_release_resets_state() {
        let mut charge = ThrowCharge::new(tuning());
        charge.begin();
        charge.tick(secs(2.0));
        charge.release();
        assert_eq!(charge.phase(), ChargePhase::Idle);
        assert_eq!(charge.current_force(), 0.0);
        assert_eq!(charge.hold_elapsed(), 0.0);
    }

    #[test]
    fn test_release_without_charge_is_ignored() {
        let mut charge = ThrowCharge::new(tuning());
        assert_eq!(charge.release(), ThrowOutcome::Ignored);
    }

    #[test]
    fn test_charge_fraction_midway() {
        let mut charge = ThrowCharge::new(tuning());
        charge.begin();
        charge.tick(secs(1.0));
        // 2 + 4 = 6, halfway between 2 and 10
        assert!((charge.charge_fraction() - 0.5).abs() < 0.001);
    }
}
