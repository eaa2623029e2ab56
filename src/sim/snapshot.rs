//! Per-frame view of the simulation for the render/UI layer

use serde::Serialize;

use super::debris::Particle;
use super::effects::ActiveEffect;
use super::obstacles::Obstacle;
use super::powerups::Powerup;
use super::state::{GamePhase, Lane};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub lane: Lane,
    pub x: f32,
    pub height: f32,
    pub jumping: bool,
    pub tilt: f32,
    pub limb_swing: f32,
}

/// Everything needed to draw one frame and update the HUD.
/// The renderer derives shield/boost visuals from `effect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub final_score: Option<u64>,
    pub speed: f32,
    pub effect: ActiveEffect,
    pub effect_time_remaining: f32,
    pub invincibility_grace: f32,
    pub player: PlayerView,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<Powerup>,
    pub debris: Vec<Particle>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::obstacles::ObstacleShape;
    use crate::sim::state::{GameState, Lane};

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(3);
        state.start();
        let id = state.obstacles.place(Lane::Right, 20.0, ObstacleShape::Crate);
        let snapshot = state.snapshot();
        assert!(snapshot.obstacles.iter().any(|o| o.id == id && o.lane == Lane::Right));
        assert_eq!(snapshot.player.lane, Lane::Center);
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_snapshot_json() {
        let state = GameState::new(3);
        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Ready");
        assert_eq!(value["effect"], "None");
        assert_eq!(value["player"]["lane"], "Center");
    }
}
