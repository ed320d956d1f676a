use std::time::Duration;

use bevy::prelude::*;

/// Light colour and brightness range an orb glows through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowConfig {
    /// Colour temperature with an empty carry timer
    pub cool_kelvin: f32,
    /// Colour temperature at the end of the carry timer
    pub warm_kelvin: f32,
    /// Intensity in lumens at the start of the lifespan
    pub start_intensity: f32,
    pub end_intensity: f32,
    pub start_range: f32,
    pub end_range: f32,
    /// Noise frequency of the last-point flicker
    pub flicker_speed: f32,
    /// Lowest multiplier the last-point flicker reaches
    pub flicker_floor: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            cool_kelvin: 7500.0,
            warm_kelvin: 1900.0,
            start_intensity: 250_000.0,
            end_intensity: 25_000.0,
            start_range: 10.0,
            end_range: 3.0,
            flicker_speed: 7.0,
            flicker_floor: 0.25,
        }
    }
}

/// Vitality tuning for an orb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbConfig {
    pub max_durability: u32,
    /// Seconds an orb can be held before it forces itself out of the hand
    pub max_carry_time: f32,
    /// Seconds until the orb burns out
    pub lifespan: f32,
    /// Impacts this soon after a drop are ignored
    pub post_drop_grace: f32,
    pub damage_cooldown: f32,
    /// Slower impacts are harmless
    pub min_break_speed: f32,
    /// Impacts at least this fast take all remaining durability
    pub one_hit_break_speed: Option<f32>,
    /// Lifespan seconds lost per damaging impact, before the speed bonus
    pub base_lifespan_penalty: f32,
    pub damage_accelerates_lifespan: bool,
    pub glow: GlowConfig,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            max_durability: 3,
            max_carry_time: 12.0,
            lifespan: 180.0,
            post_drop_grace: 0.25,
            damage_cooldown: 0.5,
            min_break_speed: 5.0,
            one_hit_break_speed: Some(18.0),
            base_lifespan_penalty: 6.0,
            damage_accelerates_lifespan: true,
            glow: GlowConfig::default(),
        }
    }
}

/// Impact speed at which the lifespan penalty bonus saturates.
pub const PENALTY_SPEED_SCALE: f32 = 20.0;

/// Timer expiries reported by `Orb::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrbTick {
    pub carry_expired: bool,
    pub burnt_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactOutcome {
    Ignored,
    Damaged { points: u32, lifespan_penalty: f32 },
    Shattered { points: u32 },
}

/// Snapshot of the values the glow is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitality {
    pub durability: u32,
    pub max_durability: u32,
    pub lifespan_fraction: f32,
    pub carry_fraction: f32,
}

/// A fragile, glowing carryable with durability and a finite lifespan.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Orb {
    pub config: OrbConfig,
    durability: u32,
    carry_timer: Timer,
    lifespan: Timer,
    shattered: bool,
    last_detach_at: Option<f32>,
    last_damage_at: Option<f32>,
}

impl Orb {
    pub fn new(config: OrbConfig) -> Self {
        Self {
            config,
            durability: config.max_durability,
            carry_timer: Timer::from_seconds(config.max_carry_time.max(0.0), TimerMode::Once),
            lifespan: Timer::from_seconds(config.lifespan.max(0.0), TimerMode::Once),
            shattered: false,
            last_detach_at: None,
            last_damage_at: None,
        }
    }

    pub fn durability(&self) -> u32 {
        self.durability
    }

    pub fn missing_durability(&self) -> u32 {
        self.config.max_durability.saturating_sub(self.durability)
    }

    pub fn carry_elapsed(&self) -> f32 {
        self.carry_timer.elapsed_secs()
    }

    pub fn lifespan_elapsed(&self) -> f32 {
        self.lifespan.elapsed_secs()
    }

    pub fn is_shattered(&self) -> bool {
        self.shattered
    }

    pub fn durability_fraction(&self) -> f32 {
        if self.config.max_durability == 0 {
            return 0.0;
        }
        self.durability as f32 / self.config.max_durability as f32
    }

    pub fn carry_fraction(&self) -> f32 {
        fraction(self.carry_elapsed(), self.config.max_carry_time)
    }

    pub fn lifespan_fraction(&self) -> f32 {
        fraction(self.lifespan_elapsed(), self.config.lifespan)
    }

    pub fn vitality(&self) -> Vitality {
        Vitality {
            durability: self.durability,
            max_durability: self.config.max_durability,
            lifespan_fraction: self.lifespan_fraction(),
            carry_fraction: self.carry_fraction(),
        }
    }

    /// Advances the lifespan, and the carry timer while held. The carry timer
    /// is reset the moment it finishes so the expiry is reported once.
    pub fn advance(&mut self, delta: Duration, carried: bool) -> OrbTick {
        if self.shattered {
            return OrbTick::default();
        }

        let mut tick = OrbTick::default();
        self.lifespan.tick(delta);

        if carried && self.carry_timer.tick(delta).is_finished() {
            self.carry_timer.reset();
            tick.carry_expired = true;
        }

        tick.burnt_out = self.lifespan.is_finished();
        tick
    }

    pub fn note_detached(&mut self, now: f32) {
        self.last_detach_at = Some(now);
    }

    pub fn reset_carry_timer(&mut self) {
        self.carry_timer.reset();
    }

    pub fn set_lifespan_elapsed(&mut self, elapsed: f32) {
        self.lifespan.reset();
        self.lifespan.set_elapsed(Duration::from_secs_f32(elapsed.max(0.0)));
    }

    /// Gives back one durability point, up to the maximum.
    pub fn restore_point(&mut self) -> bool {
        if self.shattered || self.durability >= self.config.max_durability {
            return false;
        }
        self.durability += 1;
        true
    }

    /// Marks the orb shattered. False if it already was.
    pub fn shatter(&mut self) -> bool {
        if self.shattered {
            return false;
        }
        self.durability = 0;
        self.shattered = true;
        true
    }

    /// Resolves a contact at `speed` happening at game time `now`.
    pub fn apply_impact(&mut self, speed: f32, now: f32) -> ImpactOutcome {
        if self.shattered {
            return ImpactOutcome::Ignored;
        }
        if within(self.last_detach_at, now, self.config.post_drop_grace)
            || within(self.last_damage_at, now, self.config.damage_cooldown)
            || speed < self.config.min_break_speed
        {
            return ImpactOutcome::Ignored;
        }

        let one_hit = self.config.one_hit_break_speed.is_some_and(|limit| speed >= limit);
        let points = if one_hit { self.durability } else { 1 }.min(self.durability);

        self.durability -= points;
        self.last_damage_at = Some(now);

        if self.durability == 0 {
            self.shatter();
            return ImpactOutcome::Shattered { points };
        }

        let lifespan_penalty = if self.config.damage_accelerates_lifespan {
            lifespan_penalty(self.config.base_lifespan_penalty, speed)
        } else {
            0.0
        };
        let elapsed = self.lifespan.elapsed() + Duration::from_secs_f32(lifespan_penalty);
        self.lifespan.set_elapsed(elapsed);

        ImpactOutcome::Damaged {
            points,
            lifespan_penalty,
        }
    }
}

impl Default for Orb {
    fn default() -> Self {
        Self::new(OrbConfig::default())
    }
}

/// Lifespan seconds taken by an impact: up to 50% more for fast hits.
pub fn lifespan_penalty(base: f32, speed: f32) -> f32 {
    base * (1.0 + (speed / PENALTY_SPEED_SCALE).clamp(0.0, 1.0) * 0.5)
}

fn fraction(elapsed: f32, total: f32) -> f32 {
    if total <= 0.0 {
        return 1.0;
    }
    (elapsed / total).clamp(0.0, 1.0)
}

fn within(last: Option<f32>, now: f32, window: f32) -> bool {
    last.is_some_and(|at| now - at < window)
}

/// Current glow, written by the vitality visuals and read by the light.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbGlow {
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

impl Default for OrbGlow {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 0.0,
            range: 0.0,
        }
    }
}

/// Extra light multiplier set while a recharge step flickers.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RechargeFlicker(pub f32);

impl Default for RechargeFlicker {
    fn default() -> Self {
        Self(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(secs: f32) -> Duration {
        Duration::from_secs_f32(secs)
    }

    fn config() -> OrbConfig {
        OrbConfig {
            max_durability: 3,
            max_carry_time: 2.0,
            lifespan: 100.0,
            post_drop_grace: 0.25,
            damage_cooldown: 0.5,
            min_break_speed: 5.0,
            one_hit_break_speed: Some(18.0),
            base_lifespan_penalty: 4.0,
            damage_accelerates_lifespan: true,
            glow: GlowConfig::default(),
        }
    }

    #[test]
    fn test_new_orb_is_full_and_fresh() {
        let orb = Orb::new(config());
        assert_eq!(orb.durability(), 3);
        assert_eq!(orb.carry_elapsed(), 0.0);
        assert_eq!(orb.lifespan_elapsed(), 0.0);
        assert!(!orb.is_shattered());
        assert_eq!(orb.durability_fraction(), 1.0);
    }

    #[test]
    fn test_carry_timer_only_runs_while_carried() {
        let mut orb = Orb::new(config());
        orb.advance(secs(0.5), false);
        assert_eq!(orb.carry_elapsed(), 0.0);
        assert_eq!(orb.lifespan_elapsed(), 0.5);

        orb.advance(secs(0.5), true);
        assert_eq!(orb.carry_elapsed(), 0.5);
    }

    #[test]
    fn test_carry_timer_expires_once_and_resets() {
        let mut orb = Orb::new(config());
        let mut expiries = 0;
        for _ in 0..25 {
            if orb.advance(secs(0.1), true).carry_expired {
                expiries += 1;
            }
        }
        assert_eq!(expiries, 1);
        assert!(orb.carry_elapsed() < 0.6);
    }

    #[test]
    fn test_burn_out_reported_at_lifespan() {
        let mut orb = Orb::new(config());
        assert!(!orb.advance(secs(99.0), false).burnt_out);
        assert!(orb.advance(secs(1.0), false).burnt_out);
    }

    #[test]
    fn test_impact_penalty_can_burn_out_the_lifespan() {
        let mut orb = Orb::new(config());
        orb.advance(secs(98.0), false);
        assert!(matches!(orb.apply_impact(10.0, 98.0), ImpactOutcome::Damaged { .. }));
        assert!(orb.advance(Duration::ZERO, false).burnt_out);
        assert_eq!(orb.lifespan_fraction(), 1.0);
    }

    #[test]
    fn test_reset_carry_timer_restarts_the_countdown() {
        let mut orb = Orb::new(config());
        orb.advance(secs(1.5), true);
        orb.reset_carry_timer();
        assert_eq!(orb.carry_elapsed(), 0.0);
        assert!(!orb.advance(secs(1.5), true).carry_expired);
        assert!(orb.advance(secs(0.5), true).carry_expired);
    }

    #[test]
    fn test_shattered_orb_does_not_advance() {
        let mut orb = Orb::new(config());
        orb.shatter();
        assert_eq!(orb.advance(secs(5.0), true), OrbTick::default());
        assert_eq!(orb.lifespan_elapsed(), 0.0);
    }

    #[test]
    fn test_slow_impact_is_harmless() {
        let mut orb = Orb::new(config());
        assert_eq!(orb.apply_impact(4.9, 10.0), ImpactOutcome::Ignored);
        assert_eq!(orb.durability(), 3);
    }

    #[test]
    fn test_impact_costs_one_point_and_lifespan() {
        let mut orb = Orb::new(config());
        let outcome = orb.apply_impact(10.0, 10.0);
        // 4 * (1 + 0.5 * 0.5)
        assert_eq!(
            outcome,
            ImpactOutcome::Damaged {
                points: 1,
                lifespan_penalty: 5.0
            }
        );
        assert_eq!(orb.durability(), 2);
        assert_eq!(orb.lifespan_elapsed(), 5.0);
    }

    #[test]
    fn test_lifespan_penalty_is_optional() {
        let mut orb = Orb::new(OrbConfig {
            damage_accelerates_lifespan: false,
            ..config()
        });
        orb.apply_impact(10.0, 10.0);
        assert_eq!(orb.lifespan_elapsed(), 0.0);
    }

    #[test]
    fn test_impacts_within_cooldown_cost_one_point() {
        let mut orb = Orb::new(config());
        orb.apply_impact(10.0, 10.0);
        assert_eq!(orb.apply_impact(10.0, 10.3), ImpactOutcome::Ignored);
        assert_eq!(orb.durability(), 2);

        assert!(matches!(orb.apply_impact(10.0, 10.6), ImpactOutcome::Damaged { .. }));
        assert_eq!(orb.durability(), 1);
    }

    #[test]
    fn test_impacts_right_after_a_drop_are_ignored() {
        let mut orb = Orb::new(config());
        orb.note_detached(10.0);
        assert_eq!(orb.apply_impact(10.0, 10.1), ImpactOutcome::Ignored);
        assert!(matches!(orb.apply_impact(10.0, 10.3), ImpactOutcome::Damaged { .. }));
    }

    #[test]
    fn test_one_hit_impact_shatters() {
        let mut orb = Orb::new(config());
        assert_eq!(orb.apply_impact(18.0, 1.0), ImpactOutcome::Shattered { points: 3 });
        assert!(orb.is_shattered());
        assert_eq!(orb.durability(), 0);
    }

    #[test]
    fn test_one_hit_threshold_can_be_disabled() {
        let mut orb = Orb::new(OrbConfig {
            one_hit_break_speed: None,
            ..config()
        });
        assert!(matches!(orb.apply_impact(50.0, 1.0), ImpactOutcome::Damaged { points: 1, .. }));
    }

    #[test]
    fn test_three_spaced_hits_shatter() {
        let mut orb = Orb::new(config());
        assert!(matches!(orb.apply_impact(6.0, 1.0), ImpactOutcome::Damaged { .. }));
        assert!(matches!(orb.apply_impact(6.0, 2.0), ImpactOutcome::Damaged { .. }));
        assert_eq!(orb.apply_impact(6.0, 3.0), ImpactOutcome::Shattered { points: 1 });
        assert_eq!(orb.apply_impact(6.0, 4.0), ImpactOutcome::Ignored);
    }

    #[test]
    fn test_durability_never_rises_outside_restore() {
        let mut orb = Orb::new(config());
        let mut last = orb.durability();
        for i in 0..10 {
            orb.apply_impact(6.0 + i as f32, i as f32);
            orb.advance(secs(0.3), i % 2 == 0);
            assert!(orb.durability() <= last);
            last = orb.durability();
        }
    }

    #[test]
    fn test_restore_point_caps_at_max() {
        let mut orb = Orb::new(config());
        orb.apply_impact(10.0, 1.0);
        assert!(orb.restore_point());
        assert!(!orb.restore_point());
        assert_eq!(orb.durability(), 3);
    }

    #[test]
    fn test_shatter_is_reported_once() {
        let mut orb = Orb::new(config());
        assert!(orb.shatter());
        assert!(!orb.shatter());
        assert!(!orb.restore_point());
    }

    #[test]
    fn test_fractions_are_clamped() {
        let mut orb = Orb::new(config());
        orb.set_lifespan_elapsed(500.0);
        assert_eq!(orb.lifespan_fraction(), 1.0);
        orb.set_lifespan_elapsed(-3.0);
        assert_eq!(orb.lifespan_fraction(), 0.0);
    }

    #[test]
    fn test_lifespan_penalty_saturates() {
        assert_eq!(lifespan_penalty(6.0, 0.0), 6.0);
        assert_eq!(lifespan_penalty(6.0, 40.0), 9.0);
    }
}
