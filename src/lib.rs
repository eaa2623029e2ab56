//! Lane Runner - a three-lane endless runner simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, spawning, collisions, power-ups)
//! - `tuning`: Data-driven game balance
//! - `input`: Discrete player intents and the per-frame input queue
//! - `best_distance`: Best-distance persistence
//! - `autopilot`: Scripted intent source for demo/attract mode

pub mod autopilot;
pub mod best_distance;
pub mod input;
pub mod sim;
pub mod tuning;

pub use best_distance::BestDistance;
pub use input::{InputQueue, Intent};
pub use tuning::{Tuning, TuningError};

/// Fixed track geometry
pub mod consts {
    use glam::Vec3;

    /// Lateral distance between lane centers
    pub const LANE_WIDTH: f32 = 3.0;

    /// Depth at which new entities appear (far ahead of the player)
    pub const SPAWN_DEPTH: f32 = 50.0;
    /// Entities whose depth falls below this are behind the player and culled
    pub const DESPAWN_DEPTH: f32 = -10.0;

    /// Player bounding box half-extents (x = lateral, y = up, z = depth)
    pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.25, 0.57, 0.15);

    /// Obstacles spin on two axes, so their box is a conservative cube
    pub const OBSTACLE_HALF_EXTENTS: Vec3 = Vec3::new(0.6, 0.6, 0.6);
    pub const OBSTACLE_CENTER_HEIGHT: f32 = 0.5;

    /// Power-up stars spin around the vertical axis
    pub const POWERUP_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.5, 0.5);
    pub const POWERUP_CENTER_HEIGHT: f32 = 0.5;

    /// Cosmetic spin rates (radians/second)
    pub const OBSTACLE_SPIN_RATE: f32 = 1.0;
    pub const POWERUP_SPIN_RATE: f32 = 2.0;

    /// Frame delta of the headless driver's clock (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver accumulates after a stall
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Maximum live debris particles
    pub const MAX_DEBRIS: usize = 256;
}
