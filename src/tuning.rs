//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Each simulation subsystem is built from (and keeps a copy of) its own section.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Track speed and difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Speed at the start of a run (units/second)
    pub base_speed: f32,
    /// Speed gained per second of running
    pub acceleration: f32,
    /// Scroll multiplier while boost is active
    pub boost_multiplier: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            base_speed: 10.0,
            acceleration: 0.5,
            boost_multiplier: 1.5,
        }
    }
}

/// Obstacle spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Interval before the first pattern of a run (seconds)
    pub initial_interval: f32,
    /// Floor for the spawn interval (seconds)
    pub min_interval: f32,
    /// Interval = difficulty / effective speed, floored at `min_interval`
    pub difficulty: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            initial_interval: 2.0,
            min_interval: 0.6,
            difficulty: 20.0,
        }
    }
}

/// Power-up spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupTuning {
    /// Seconds between power-up spawns (independent of speed)
    pub interval: f32,
}

impl Default for PowerupTuning {
    fn default() -> Self {
        Self { interval: 30.0 }
    }
}

/// Shield/boost timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    /// How long a shield or boost lasts (seconds)
    pub duration: f32,
    /// Invincibility window after a shield runs out (seconds)
    pub shield_grace: f32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            duration: 10.0,
            shield_grace: 1.0,
        }
    }
}

/// Player movement feel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Exponential approach rate toward the target lane (1/second)
    pub lane_smoothing: f32,
    /// Upward launch velocity of a jump
    pub jump_velocity: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            lane_smoothing: 15.0,
            jump_velocity: 8.0,
            gravity: 20.0,
        }
    }
}

/// Collision forgiveness (fraction of the player's half-extents shaved off)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub obstacle_forgiveness: f32,
    pub pickup_forgiveness: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            obstacle_forgiveness: 0.3,
            pickup_forgiveness: 0.4,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub scroll: ScrollTuning,
    pub obstacles: ObstacleTuning,
    pub powerups: PowerupTuning,
    pub effects: EffectTuning,
    pub player: PlayerTuning,
    pub collision: CollisionTuning,
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            Self::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

fn require(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason })
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let s = &self.scroll;
        require(positive(s.base_speed), "scroll.base_speed", "must be > 0")?;
        require(
            s.acceleration.is_finite() && s.acceleration >= 0.0,
            "scroll.acceleration",
            "must be >= 0",
        )?;
        require(
            s.boost_multiplier.is_finite() && s.boost_multiplier >= 1.0,
            "scroll.boost_multiplier",
            "must be >= 1",
        )?;

        let o = &self.obstacles;
        require(positive(o.min_interval), "obstacles.min_interval", "must be > 0")?;
        require(positive(o.difficulty), "obstacles.difficulty", "must be > 0")?;
        require(
            o.initial_interval.is_finite() && o.initial_interval >= o.min_interval,
            "obstacles.initial_interval",
            "must be >= obstacles.min_interval",
        )?;

        require(positive(self.powerups.interval), "powerups.interval", "must be > 0")?;

        let e = &self.effects;
        require(positive(e.duration), "effects.duration", "must be > 0")?;
        require(
            e.shield_grace.is_finite() && e.shield_grace >= 0.0,
            "effects.shield_grace",
            "must be >= 0",
        )?;

        let p = &self.player;
        require(positive(p.lane_smoothing), "player.lane_smoothing", "must be > 0")?;
        require(positive(p.jump_velocity), "player.jump_velocity", "must be > 0")?;
        require(positive(p.gravity), "player.gravity", "must be > 0")?;

        let c = &self.collision;
        require(
            (0.0..1.0).contains(&c.obstacle_forgiveness),
            "collision.obstacle_forgiveness",
            "must be in [0, 1)",
        )?;
        require(
            (0.0..1.0).contains(&c.pickup_forgiveness),
            "collision.pickup_forgiveness",
            "must be in [0, 1)",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll": { "base_speed": 14.0 } }"#).unwrap();
        assert_eq!(tuning.scroll.base_speed, 14.0);
        assert_eq!(tuning.scroll.boost_multiplier, 1.5);
        assert_eq!(tuning.effects, EffectTuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut tuning = Tuning::default();
        tuning.powerups.interval = 12.0;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_initial_interval_below_floor() {
        let err = Tuning::from_json(
            r#"{ "obstacles": { "initial_interval": 0.2, "min_interval": 0.6 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "obstacles.initial_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_full_forgiveness() {
        let mut tuning = Tuning::default();
        tuning.collision.pickup_forgiveness = 1.0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("malformed tuning JSON"));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load_from("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
