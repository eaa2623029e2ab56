//! Power-up effect state machine
//!
//! Shield and boost are mutually exclusive: the active effect is a single enum
//! value, so both can never be on at once. The post-shield grace window is
//! tracked separately and keeps counting down regardless of the active effect.

use serde::{Deserialize, Serialize};

use super::powerups::PowerupKind;
use crate::tuning::EffectTuning;

/// Currently active ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveEffect {
    #[default]
    None,
    Shield,
    Boost,
}

impl From<PowerupKind> for ActiveEffect {
    fn from(kind: PowerupKind) -> Self {
        match kind {
            PowerupKind::Shield => ActiveEffect::Shield,
            PowerupKind::Boost => ActiveEffect::Boost,
        }
    }
}

/// What happens when the player runs into an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleOutcome {
    /// Shielded or in grace: the obstacle is left alone
    PassThrough,
    /// Boosted: the obstacle is smashed and removed
    Destroy,
    /// Unprotected: the run ends
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectState {
    active: ActiveEffect,
    time_remaining: f32,
    invincibility_grace: f32,
    /// Set by a pickup; the power-up spawner should restart its cooldown
    spawn_cooldown_override: bool,
    tuning: EffectTuning,
}

impl EffectState {
    pub fn new(tuning: EffectTuning) -> Self {
        Self {
            active: ActiveEffect::None,
            time_remaining: 0.0,
            invincibility_grace: 0.0,
            spawn_cooldown_override: false,
            tuning,
        }
    }

    pub fn active(&self) -> ActiveEffect {
        self.active
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn invincibility_grace(&self) -> f32 {
        self.invincibility_grace
    }

    pub fn shield_active(&self) -> bool {
        self.active == ActiveEffect::Shield
    }

    pub fn boost_active(&self) -> bool {
        self.active == ActiveEffect::Boost
    }

    /// Drop every effect, grace included, with no carry-over
    pub fn clear(&mut self) {
        self.active = ActiveEffect::None;
        self.time_remaining = 0.0;
        self.invincibility_grace = 0.0;
        self.spawn_cooldown_override = false;
    }

    /// Switch to the picked-up effect for a full duration.
    /// Whatever was running before (including a pending grace) is cleared first.
    pub fn activate(&mut self, kind: PowerupKind) {
        if self.active != ActiveEffect::None || self.invincibility_grace > 0.0 {
            log::debug!(
                "{:?} replaces {:?} (grace {:.2}s dropped)",
                kind,
                self.active,
                self.invincibility_grace
            );
        }
        self.clear();
        self.active = kind.into();
        self.time_remaining = self.tuning.duration;
        self.spawn_cooldown_override = true;
    }

    /// Count down grace and the active effect.
    /// Returns the effect that ran out this tick, if any.
    pub fn update(&mut self, dt: f32) -> Option<PowerupKind> {
        if self.invincibility_grace > 0.0 {
            self.invincibility_grace = (self.invincibility_grace - dt).max(0.0);
        }

        let expiring = match self.active {
            ActiveEffect::None => return None,
            ActiveEffect::Shield => PowerupKind::Shield,
            ActiveEffect::Boost => PowerupKind::Boost,
        };

        self.time_remaining -= dt;
        if self.time_remaining > 0.0 {
            return None;
        }

        self.active = ActiveEffect::None;
        self.time_remaining = 0.0;
        if expiring == PowerupKind::Shield {
            self.invincibility_grace = self.tuning.shield_grace;
        }
        log::debug!("{:?} expired", expiring);
        Some(expiring)
    }

    /// Collision policy for an obstacle hit this tick
    pub fn obstacle_outcome(&self) -> ObstacleOutcome {
        if self.shield_active() || self.invincibility_grace > 0.0 {
            ObstacleOutcome::PassThrough
        } else if self.boost_active() {
            ObstacleOutcome::Destroy
        } else {
            ObstacleOutcome::Fatal
        }
    }

    /// True once after each pickup; the caller restarts the power-up cooldown
    pub fn take_cooldown_request(&mut self) -> bool {
        std::mem::take(&mut self.spawn_cooldown_override)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn effects() -> EffectState {
        EffectState::new(EffectTuning::default())
    }

    #[test]
    fn test_activate_sets_full_duration() {
        let mut e = effects();
        e.activate(PowerupKind::Boost);
        assert_eq!(e.active(), ActiveEffect::Boost);
        assert_eq!(e.time_remaining(), 10.0);
        assert!(e.take_cooldown_request());
        assert!(!e.take_cooldown_request());
    }

    #[test]
    fn test_shield_expiry_starts_grace_same_tick() {
        let mut e = effects();
        e.activate(PowerupKind::Shield);
        assert_eq!(e.update(9.5), None);
        assert_eq!(e.update(0.5), Some(PowerupKind::Shield));
        assert_eq!(e.active(), ActiveEffect::None);
        assert_eq!(e.invincibility_grace(), 1.0);
        assert_eq!(e.obstacle_outcome(), ObstacleOutcome::PassThrough);

        e.update(0.6);
        assert!((e.invincibility_grace() - 0.4).abs() < 1e-6);
        e.update(0.6);
        assert_eq!(e.invincibility_grace(), 0.0);
        assert_eq!(e.obstacle_outcome(), ObstacleOutcome::Fatal);
    }

    #[test]
    fn test_boost_expiry_has_no_grace() {
        let mut e = effects();
        e.activate(PowerupKind::Boost);
        assert_eq!(e.update(10.5), Some(PowerupKind::Boost));
        assert_eq!(e.invincibility_grace(), 0.0);
        assert_eq!(e.time_remaining(), 0.0);
        assert_eq!(e.obstacle_outcome(), ObstacleOutcome::Fatal);
    }

    #[test]
    fn test_pickup_replaces_active_effect() {
        let mut e = effects();
        e.activate(PowerupKind::Shield);
        e.update(4.0);
        e.activate(PowerupKind::Boost);
        assert_eq!(e.active(), ActiveEffect::Boost);
        assert_eq!(e.time_remaining(), 10.0);
        assert!(!e.shield_active());
    }

    #[test]
    fn test_pickup_clears_pending_grace() {
        let mut e = effects();
        e.activate(PowerupKind::Shield);
        e.update(10.0);
        assert_eq!(e.invincibility_grace(), 1.0);
        e.activate(PowerupKind::Boost);
        assert_eq!(e.invincibility_grace(), 0.0);
        assert_eq!(e.obstacle_outcome(), ObstacleOutcome::Destroy);
    }

    #[test]
    fn test_outcome_table() {
        let mut e = effects();
        assert_eq!(e.obstacle_outcome(), ObstacleOutcome::Fatal);
        e.activate(PowerupKind::Shield);
        assert_eq!(e.obstacle_outcome(), ObstacleOutcome::PassThrough);
        e.activate(PowerupKind::Boost);
        assert_eq!(e.obstacle_outcome(), ObstacleOutcome::Destroy);
    }

    fn kind_strategy() -> impl Strategy<Value = PowerupKind> {
        prop_oneof![Just(PowerupKind::Shield), Just(PowerupKind::Boost)]
    }

    proptest! {
        #[test]
        fn prop_timers_never_negative(
            steps in prop::collection::vec((prop::option::of(kind_strategy()), 0.0f32..3.0), 1..64)
        ) {
            let mut e = effects();
            for (pickup, dt) in steps {
                if let Some(kind) = pickup {
                    e.activate(kind);
                    prop_assert_eq!(e.active(), ActiveEffect::from(kind));
                }
                let was_shield = e.shield_active();
                let expired = e.update(dt);
                prop_assert!(e.time_remaining() >= 0.0);
                prop_assert!(e.invincibility_grace() >= 0.0);
                if was_shield && expired == Some(PowerupKind::Shield) {
                    prop_assert_eq!(e.invincibility_grace(), 1.0);
                }
            }
        }
    }
}
