//! Game state and core simulation types
//!
//! `GameState` owns every subsystem. Subsystems never reach into each other;
//! the tick function moves data between them through arguments and return values.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::debris::{self, Particle};
use super::effects::EffectState;
use super::obstacles::{ObstacleShape, ObstacleSpawner};
use super::player::PlayerState;
use super::powerups::{PowerupKind, PowerupSpawner};
use super::scroll::ScrollState;
use super::snapshot::{PlayerView, Snapshot};
use crate::consts::LANE_WIDTH;
use crate::tuning::Tuning;

/// One of the three fixed lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// -1, 0 or 1
    pub fn index(self) -> i8 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    pub fn from_index(index: i8) -> Option<Lane> {
        match index {
            -1 => Some(Lane::Left),
            0 => Some(Lane::Center),
            1 => Some(Lane::Right),
            _ => None,
        }
    }

    /// Neighbouring lane in `direction` (-1 left, +1 right); None past the edge
    pub fn shifted(self, direction: i8) -> Option<Lane> {
        Lane::from_index(self.index().saturating_add(direction))
    }

    /// Lateral world position of the lane center
    pub fn x(self) -> f32 {
        self.index() as f32 * LANE_WIDTH
    }

    pub fn random<R: Rng>(rng: &mut R) -> Lane {
        Lane::ALL[rng.random_range(0..Lane::ALL.len())]
    }
}

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Active gameplay
    Running,
    /// Run ended on a fatal collision
    GameOver,
}

/// Something the render/audio/UI layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    GameReset,
    GameOver { score: u64 },
    ObstacleSpawned { id: u32, lane: Lane, shape: ObstacleShape },
    /// Scrolled out behind the player
    ObstacleRemoved { id: u32 },
    /// Smashed by a boosted player
    ObstacleDestroyed { id: u32, lane: Lane },
    PowerupSpawned { id: u32, lane: Lane, kind: PowerupKind },
    /// Scrolled out or picked up
    PowerupRemoved { id: u32 },
    PowerupPickedUp { kind: PowerupKind },
    EffectExpired { kind: PowerupKind },
    LaneChanged { lane: Lane },
    Jumped,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Score of the run that just ended
    pub final_score: Option<u64>,
    pub scroll: ScrollState,
    pub player: PlayerState,
    pub obstacles: ObstacleSpawner,
    pub powerups: PowerupSpawner,
    pub effects: EffectState,
    /// Visual particles (not gameplay-affecting)
    pub debris: Vec<Particle>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::Ready,
            final_score: None,
            scroll: ScrollState::new(tuning.scroll),
            player: PlayerState::new(tuning.player),
            obstacles: ObstacleSpawner::new(tuning.obstacles),
            powerups: PowerupSpawner::new(tuning.powerups),
            effects: EffectState::new(tuning.effects),
            debris: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Current score: whole units of distance covered
    pub fn score(&self) -> u64 {
        self.scroll.score()
    }

    /// Put every subsystem back to its initial values. Does not change the phase.
    pub fn reset(&mut self) {
        self.scroll.reset();
        self.player.reset();
        self.obstacles.reset();
        self.powerups.reset();
        self.effects.clear();
        self.debris.clear();
        self.events.push(GameEvent::GameReset);
        log::info!("Game reset");
    }

    /// Begin a fresh run. No-op while already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.reset();
        self.final_score = None;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::GameStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    /// End the run; gameplay freezes until the next start
    pub fn game_over(&mut self) {
        let score = self.score();
        self.phase = GamePhase::GameOver;
        self.final_score = Some(score);
        self.events.push(GameEvent::GameOver { score });
        log::info!("Game over at distance {} (speed {:.1})", score, self.scroll.speed);
    }

    /// Emit debris where an obstacle was smashed
    pub(crate) fn spawn_debris(&mut self, origin: Vec3) {
        debris::burst(&mut self.debris, origin, &mut self.rng);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events, without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Everything the renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score(),
            final_score: self.final_score,
            speed: self.scroll.speed,
            effect: self.effects.active(),
            effect_time_remaining: self.effects.time_remaining(),
            invincibility_grace: self.effects.invincibility_grace(),
            player: PlayerView {
                lane: self.player.lane,
                x: self.player.lateral,
                height: self.player.height,
                jumping: self.player.jumping,
                tilt: self.player.tilt(),
                limb_swing: self.player.limb_swing(),
            },
            obstacles: self.obstacles.obstacles().to_vec(),
            powerups: self.powerups.powerups().to_vec(),
            debris: self.debris.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_shift_bounds() {
        assert_eq!(Lane::Left.shifted(-1), None);
        assert_eq!(Lane::Left.shifted(1), Some(Lane::Center));
        assert_eq!(Lane::Right.shifted(1), None);
        assert_eq!(Lane::Center.shifted(-1), Some(Lane::Left));
        assert_eq!(Lane::Center.shifted(i8::MAX), None);
    }

    #[test]
    fn test_lane_positions() {
        assert_eq!(Lane::Left.x(), -LANE_WIDTH);
        assert_eq!(Lane::Center.x(), 0.0);
        assert_eq!(Lane::Right.x(), LANE_WIDTH);
    }

    #[test]
    fn test_new_state_is_ready() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score(), 0);
        assert!(state.obstacles.is_empty());
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut state = GameState::new(1);
        state.start();
        state.scroll.distance = 42.0;
        state.drain_events();

        state.start();
        assert_eq!(state.score(), 42);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_game_over_records_score() {
        let mut state = GameState::new(1);
        state.start();
        state.scroll.distance = 99.7;
        state.game_over();
        assert!(!state.is_running());
        assert_eq!(state.final_score, Some(99));
        assert!(state.events().contains(&GameEvent::GameOver { score: 99 }));

        state.start();
        assert!(state.is_running());
        assert_eq!(state.final_score, None);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_reset_twice_matches_once() {
        let mut state = GameState::new(5);
        state.start();
        state.scroll.advance(3.0);
        state.player.apply_lane_intent(1);
        state.player.update(0.1);
        state.obstacles.place(Lane::Left, 10.0, ObstacleShape::Pillar);
        state.powerups.place(Lane::Right, 12.0, PowerupKind::Shield);
        state.effects.activate(PowerupKind::Boost);
        state.spawn_debris(Vec3::ZERO);

        state.reset();
        let once = state.clone();
        state.reset();

        assert_eq!(state.scroll, once.scroll);
        assert_eq!(state.player, once.player);
        assert_eq!(state.obstacles, once.obstacles);
        assert_eq!(state.powerups, once.powerups);
        assert_eq!(state.effects, once.effects);
        assert_eq!(state.debris, once.debris);

        let fresh = GameState::new(5);
        assert_eq!(state.scroll, fresh.scroll);
        assert_eq!(state.player, fresh.player);
        assert_eq!(state.obstacles, fresh.obstacles);
        assert_eq!(state.powerups, fresh.powerups);
        assert_eq!(state.effects, fresh.effects);
        assert!(state.debris.is_empty());
    }
}
