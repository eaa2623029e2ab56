//! Debris particles from smashed obstacles (cosmetic only)

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_DEBRIS;

/// Particles emitted per smashed obstacle
pub const DEBRIS_PER_BURST: usize = 12;
const DEBRIS_GRAVITY: f32 = 15.0;
const DEBRIS_FADE_RATE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// 1 when emitted, removed at 0
    pub life: f32,
    pub size: f32,
}

/// Emit a burst of debris at `origin`. Oldest particles give way past the cap.
pub fn burst<R: Rng>(particles: &mut Vec<Particle>, origin: Vec3, rng: &mut R) {
    for _ in 0..DEBRIS_PER_BURST {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(3.0..8.0);
        let lift = rng.random_range(2.0..6.0);
        particles.push(Particle {
            pos: origin,
            vel: Vec3::new(angle.cos() * speed, lift, angle.sin() * speed),
            life: 1.0,
            size: rng.random_range(0.1..0.3),
        });
    }
    if particles.len() > MAX_DEBRIS {
        let excess = particles.len() - MAX_DEBRIS;
        particles.drain(..excess);
    }
}

/// Integrate and fade; bounces off the track surface
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.vel.y -= DEBRIS_GRAVITY * dt;
        p.pos += p.vel * dt;
        if p.pos.y < 0.0 {
            p.pos.y = 0.0;
            p.vel.y = -p.vel.y * 0.4;
        }
        p.life -= DEBRIS_FADE_RATE * dt;
    }
    particles.retain(|p| p.life > 0.0);
}
