//! Power-up spawning, scrolling and pickup

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::registry::{LaneEntity, Registry};
use super::state::{GameEvent, Lane};
use crate::consts::*;
use crate::tuning::PowerupTuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Pass through obstacles
    Shield,
    /// Faster scroll, smash obstacles
    Boost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub lane: Lane,
    pub depth: f32,
    pub kind: PowerupKind,
    /// Cosmetic spin angle
    pub spin: f32,
}

impl LaneEntity for Powerup {
    const HALF_EXTENTS: Vec3 = POWERUP_HALF_EXTENTS;
    const CENTER_HEIGHT: f32 = POWERUP_CENTER_HEIGHT;

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
        self.spin += POWERUP_SPIN_RATE * dt;
    }
}

/// Power-up registry plus its spawn timer
#[derive(Debug, Clone, PartialEq)]
pub struct PowerupSpawner {
    registry: Registry<Powerup>,
    /// Seconds since the last spawn (or pickup)
    pub spawn_timer: f32,
    tuning: PowerupTuning,
}

impl PowerupSpawner {
    pub fn new(tuning: PowerupTuning) -> Self {
        Self {
            registry: Registry::new(),
            spawn_timer: 0.0,
            tuning,
        }
    }

    pub fn reset(&mut self) {
        self.registry.clear();
        self.spawn_timer = 0.0;
    }

    /// Restart the spawn timer so a pickup isn't followed by another right away
    pub fn start_cooldown(&mut self) {
        self.spawn_timer = 0.0;
    }

    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        effective_speed: f32,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.spawn_timer += dt;
        if self.spawn_timer > self.tuning.interval {
            self.spawn(rng, events);
            self.spawn_timer = 0.0;
        }

        for id in self.registry.scroll(effective_speed * dt, dt, DESPAWN_DEPTH) {
            events.push(GameEvent::PowerupRemoved { id });
        }
    }

    /// Spawn one power-up of a random type in a random lane
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) -> u32 {
        let lane = Lane::random(rng);
        let kind = if rng.random_bool(0.5) {
            PowerupKind::Shield
        } else {
            PowerupKind::Boost
        };
        let id = self.place(lane, SPAWN_DEPTH, kind);
        log::debug!("Spawned {:?} power-up in {:?}", kind, lane);
        events.push(GameEvent::PowerupSpawned { id, lane, kind });
        id
    }

    /// Put a power-up at an explicit spot on the track
    pub fn place(&mut self, lane: Lane, depth: f32, kind: PowerupKind) -> u32 {
        self.registry.insert_with(|id| Powerup {
            id,
            lane,
            depth,
            kind,
            spin: 0.0,
        })
    }

    /// Consume the first power-up overlapping the player's box.
    /// At most one is taken per call.
    pub fn check_collision(
        &mut self,
        player: &Aabb,
        events: &mut Vec<GameEvent>,
    ) -> Option<PowerupKind> {
        let step = self.registry.last_step();
        let taken = self
            .registry
            .take_first(|p| player.intersects(&p.swept_volume(step)))?;
        events.push(GameEvent::PowerupRemoved { id: taken.id });
        Some(taken.kind)
    }

    pub fn powerups(&self) -> &[Powerup] {
        self.registry.as_slice()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawner() -> PowerupSpawner {
        PowerupSpawner::new(PowerupTuning::default())
    }

    fn player_box_at(lane: Lane) -> Aabb {
        Aabb::from_center(Vec3::new(lane.x(), PLAYER_HALF_EXTENTS.y, 0.0), PLAYER_HALF_EXTENTS)
    }

    #[test]
    fn test_spawn_cadence_ignores_speed() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut s = spawner();

        for _ in 0..29 {
            s.update(1.0, 500.0, &mut rng, &mut events);
        }
        assert!(events.is_empty());

        s.update(1.5, 500.0, &mut rng, &mut events);
        assert!(matches!(events[0], GameEvent::PowerupSpawned { .. }));
        assert_eq!(s.spawn_timer, 0.0);
    }

    #[test]
    fn test_spawn_covers_lanes_and_kinds() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut events = Vec::new();
        let mut s = spawner();
        for _ in 0..200 {
            s.spawn(&mut rng, &mut events);
        }
        for lane in Lane::ALL {
            assert!(s.powerups().iter().any(|p| p.lane == lane));
        }
        assert!(s.powerups().iter().any(|p| p.kind == PowerupKind::Shield));
        assert!(s.powerups().iter().any(|p| p.kind == PowerupKind::Boost));
    }

    #[test]
    fn test_cooldown_resets_timer() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut s = spawner();
        s.update(25.0, 10.0, &mut rng, &mut events);
        s.start_cooldown();
        s.update(25.0, 10.0, &mut rng, &mut events);
        assert!(s.is_empty());
    }

    #[test]
    fn test_culled_behind_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let mut s = spawner();
        let id = s.place(Lane::Right, DESPAWN_DEPTH + 0.5, PowerupKind::Boost);

        s.update(0.1, 10.0, &mut rng, &mut events);
        assert!(s.is_empty());
        assert_eq!(events, vec![GameEvent::PowerupRemoved { id }]);
    }

    #[test]
    fn test_reset_clears_and_restarts_ids() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut events = Vec::new();
        let mut s = spawner();
        s.place(Lane::Left, 10.0, PowerupKind::Shield);
        s.update(12.0, 10.0, &mut rng, &mut events);

        s.reset();
        assert!(s.is_empty());
        assert_eq!(s.spawn_timer, 0.0);
        assert_eq!(s, spawner());
        assert_eq!(s.place(Lane::Center, 5.0, PowerupKind::Boost), 1);
    }

    #[test]
    fn test_pickup_consumes_exactly_one() {
        let mut events = Vec::new();
        let mut s = spawner();
        s.place(Lane::Left, 20.0, PowerupKind::Shield);
        let boost = s.place(Lane::Right, 0.0, PowerupKind::Boost);
        s.place(Lane::Right, 0.3, PowerupKind::Shield);

        let before = s.len();
        let kind = s.check_collision(&player_box_at(Lane::Right), &mut events);
        assert_eq!(kind, Some(PowerupKind::Boost));
        assert_eq!(s.len(), before - 1);
        assert_eq!(events, vec![GameEvent::PowerupRemoved { id: boost }]);
    }

    #[test]
    fn test_no_pickup_in_other_lane() {
        let mut events = Vec::new();
        let mut s = spawner();
        s.place(Lane::Left, 0.0, PowerupKind::Shield);
        assert_eq!(s.check_collision(&player_box_at(Lane::Center), &mut events), None);
        assert_eq!(s.len(), 1);
        assert!(events.is_empty());
    }
}
