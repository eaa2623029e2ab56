//! Obstacle spawning and scrolling
//!
//! Patterns are cycled in a fixed order rather than drawn at random, so every
//! shape of wall shows up regularly; only the open lane inside a pattern is random.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, check_collision};
use super::registry::{LaneEntity, Registry};
use super::state::{GameEvent, Lane};
use crate::consts::*;
use crate::tuning::ObstacleTuning;

/// Obstacle look (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleShape {
    Spike,
    Pillar,
    Crate,
}

impl ObstacleShape {
    fn roll<R: Rng>(rng: &mut R) -> Self {
        let roll: f32 = rng.random();
        if roll < 0.4 {
            ObstacleShape::Spike
        } else if roll < 0.7 {
            ObstacleShape::Pillar
        } else {
            ObstacleShape::Crate
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    pub depth: f32,
    pub shape: ObstacleShape,
    /// Cosmetic tumble angle
    pub spin: f32,
}

impl LaneEntity for Obstacle {
    const HALF_EXTENTS: Vec3 = OBSTACLE_HALF_EXTENTS;
    const CENTER_HEIGHT: f32 = OBSTACLE_CENTER_HEIGHT;

    fn id(&self) -> u32 {
        self.id
    }

    fn lane(&self) -> Lane {
        self.lane
    }

    fn depth(&self) -> f32 {
        self.depth
    }

    fn scroll(&mut self, step: f32, dt: f32) {
        self.depth -= step;
        self.spin += OBSTACLE_SPIN_RATE * dt;
    }
}

/// Lane-subset rule for one spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPattern {
    /// One obstacle in a random lane
    SingleRandom,
    /// Two neighbouring lanes blocked, one side lane open
    Pair,
    /// Two lanes blocked, the open lane anywhere
    WallWithGap,
    /// One obstacle in the center lane
    CenterOnly,
    /// One obstacle in a random side lane
    SingleSide,
}

/// Spawn order; each spawn advances one slot
pub const PATTERN_CYCLE: [SpawnPattern; 6] = [
    SpawnPattern::SingleRandom,
    SpawnPattern::Pair,
    SpawnPattern::SingleRandom,
    SpawnPattern::WallWithGap,
    SpawnPattern::CenterOnly,
    SpawnPattern::SingleSide,
];

fn random_side<R: Rng>(rng: &mut R) -> Lane {
    if rng.random_bool(0.5) { Lane::Left } else { Lane::Right }
}

impl SpawnPattern {
    /// Lanes that receive an obstacle, left to right
    pub fn lanes<R: Rng>(self, rng: &mut R) -> Vec<Lane> {
        let all_but = |open: Lane| -> Vec<Lane> {
            Lane::ALL.into_iter().filter(|&l| l != open).collect()
        };
        match self {
            SpawnPattern::SingleRandom => vec![Lane::random(rng)],
            SpawnPattern::Pair => all_but(random_side(rng)),
            SpawnPattern::WallWithGap => all_but(Lane::random(rng)),
            SpawnPattern::CenterOnly => vec![Lane::Center],
            SpawnPattern::SingleSide => vec![random_side(rng)],
        }
    }
}

/// Obstacle registry plus its spawn timer
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleSpawner {
    registry: Registry<Obstacle>,
    /// Seconds since the last pattern
    pub spawn_timer: f32,
    /// Seconds required before the next pattern
    pub spawn_interval: f32,
    /// Slot in `PATTERN_CYCLE` used by the next spawn
    pub pattern_index: usize,
    tuning: ObstacleTuning,
}

impl ObstacleSpawner {
    pub fn new(tuning: ObstacleTuning) -> Self {
        Self {
            registry: Registry::new(),
            spawn_timer: 0.0,
            spawn_interval: tuning.initial_interval,
            pattern_index: 0,
            tuning,
        }
    }

    pub fn reset(&mut self) {
        self.registry.clear();
        self.spawn_timer = 0.0;
        self.spawn_interval = self.tuning.initial_interval;
        self.pattern_index = 0;
    }

    /// Spawn interval for a given scroll rate (faster track, denser patterns)
    pub fn interval_for_speed(&self, effective_speed: f32) -> f32 {
        (self.tuning.difficulty / effective_speed.max(f32::EPSILON)).max(self.tuning.min_interval)
    }

    /// Run the spawn timer, then scroll and cull
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        effective_speed: f32,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer > self.spawn_interval {
            self.spawn_pattern(rng, events);
            self.spawn_timer = 0.0;
            self.spawn_interval = self.interval_for_speed(effective_speed);
        }

        for id in self.registry.scroll(effective_speed * dt, dt, DESPAWN_DEPTH) {
            events.push(GameEvent::ObstacleRemoved { id });
        }
    }

    /// Spawn the current pattern at the far end of the track and advance the cycle
    pub fn spawn_pattern<R: Rng>(
        &mut self,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> SpawnPattern {
        let pattern = PATTERN_CYCLE[self.pattern_index];
        self.pattern_index = (self.pattern_index + 1) % PATTERN_CYCLE.len();

        let lanes = pattern.lanes(rng);
        log::debug!("Spawning {:?} in {:?}", pattern, lanes);
        for lane in lanes {
            let shape = ObstacleShape::roll(rng);
            let id = self.place(lane, SPAWN_DEPTH, shape);
            events.push(GameEvent::ObstacleSpawned { id, lane, shape });
        }
        pattern
    }

    /// Put an obstacle at an explicit spot on the track
    pub fn place(&mut self, lane: Lane, depth: f32, shape: ObstacleShape) -> u32 {
        self.registry.insert_with(|id| Obstacle {
            id,
            lane,
            depth,
            shape,
            spin: 0.0,
        })
    }

    /// First obstacle overlapping the player's box, if any
    pub fn check_collision(&self, player: &Aabb) -> Option<&Obstacle> {
        check_collision(player, &self.registry)
    }

    /// Remove a destroyed obstacle. Idempotent.
    pub fn remove_obstacle(&mut self, id: u32) -> Option<Obstacle> {
        self.registry.remove(id)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.registry.as_slice()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
