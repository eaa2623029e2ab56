//! Player lane and jump state

use glam::Vec3;

use super::collision::Aabb;
use super::state::Lane;
use crate::consts::PLAYER_HALF_EXTENTS;
use crate::tuning::PlayerTuning;

/// Stride frequency of the run cycle (radians/second)
const STRIDE_RATE: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Target lane (discrete, changes instantly)
    pub lane: Lane,
    /// Current lateral position (slides toward `lane.x()`)
    pub lateral: f32,
    /// Height of the feet above the track
    pub height: f32,
    pub jumping: bool,
    pub jump_velocity: f32,
    /// Seconds of running, drives the limb animation
    pub run_time: f32,
    tuning: PlayerTuning,
}

impl PlayerState {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            lane: Lane::Center,
            lateral: 0.0,
            height: 0.0,
            jumping: false,
            jump_velocity: 0.0,
            run_time: 0.0,
            tuning,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.tuning);
    }

    /// Step one lane left (negative) or right (positive).
    /// Returns false when already at the edge.
    pub fn apply_lane_intent(&mut self, direction: i8) -> bool {
        match self.lane.shifted(direction.signum()) {
            Some(lane) if lane != self.lane => {
                self.lane = lane;
                true
            }
            _ => false,
        }
    }

    /// Launch a jump. Ignored while airborne.
    pub fn apply_jump_intent(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.jump_velocity = self.tuning.jump_velocity;
        true
    }

    pub fn update(&mut self, dt: f32) {
        let target = self.lane.x();
        // Large frames would overshoot the lane; cap the blend at a full snap
        let blend = (self.tuning.lane_smoothing * dt).min(1.0);
        self.lateral += (target - self.lateral) * blend;

        if self.jumping {
            self.jump_velocity -= self.tuning.gravity * dt;
            self.height += self.jump_velocity * dt;
            if self.height <= 0.0 {
                self.height = 0.0;
                self.jumping = false;
                self.jump_velocity = 0.0;
            }
        }

        self.run_time += dt;
    }

    /// Bounding box, shrunk by `forgiveness` (fraction of each half-extent)
    pub fn volume(&self, forgiveness: f32) -> Aabb {
        let center = Vec3::new(self.lateral, self.height + PLAYER_HALF_EXTENTS.y, 0.0);
        Aabb::from_center(center, PLAYER_HALF_EXTENTS).shrunk(forgiveness)
    }

    /// Body roll while sliding between lanes (cosmetic)
    pub fn tilt(&self) -> f32 {
        -(self.lateral - self.lane.x()) * 0.1
    }

    /// Arm/leg swing angle for the run cycle (cosmetic, damped mid-air)
    pub fn limb_swing(&self) -> f32 {
        let amplitude = if self.jumping { 0.1 } else { 0.5 };
        (self.run_time * STRIDE_RATE).sin() * amplitude
    }
}
