//! Track progress: distance covered and the ever-growing scroll speed

use crate::tuning::ScrollTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Base scroll speed (units/second); only grows while running
    pub speed: f32,
    /// Distance covered this run
    pub distance: f32,
    tuning: ScrollTuning,
}

impl ScrollState {
    pub fn new(tuning: ScrollTuning) -> Self {
        Self {
            speed: tuning.base_speed,
            distance: 0.0,
            tuning,
        }
    }

    /// Cover ground at the current speed, then ramp the speed up
    pub fn advance(&mut self, dt: f32) {
        self.distance += self.speed * dt;
        self.speed += self.tuning.acceleration * dt;
    }

    /// Scroll rate applied to entities this tick
    pub fn effective_speed(&self, boost_active: bool) -> f32 {
        if boost_active {
            self.speed * self.tuning.boost_multiplier
        } else {
            self.speed
        }
    }

    /// Displayed score
    pub fn score(&self) -> u64 {
        self.distance.floor() as u64
    }

    pub fn reset(&mut self) {
        self.speed = self.tuning.base_speed;
        self.distance = 0.0;
    }
}
