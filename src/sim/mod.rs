//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - One `tick` per frame, no self-scheduling
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod debris;
pub mod effects;
pub mod obstacles;
pub mod player;
pub mod powerups;
pub mod registry;
pub mod scroll;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check_collision};
pub use debris::Particle;
pub use effects::{ActiveEffect, EffectState, ObstacleOutcome};
pub use obstacles::{Obstacle, ObstacleShape, ObstacleSpawner, PATTERN_CYCLE, SpawnPattern};
pub use player::PlayerState;
pub use powerups::{Powerup, PowerupKind, PowerupSpawner};
pub use registry::{LaneEntity, Registry};
pub use scroll::ScrollState;
pub use snapshot::{PlayerView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, Lane};
pub use tick::tick;
