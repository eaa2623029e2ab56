//! Collision detection between the player and lane entities
//!
//! Everything is an axis-aligned box: x is lateral, y is up, z is depth along
//! the track. No impulses, no resolution; a hit is just an overlap.

use glam::Vec3;

use super::registry::{LaneEntity, Registry};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Shrink toward the center by `fraction` of each half-extent
    pub fn shrunk(&self, fraction: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        Self::from_center(self.center(), self.half_extents() * (1.0 - fraction))
    }

    /// Stretch the far (+depth) face by `distance`
    pub fn extended_depth(&self, distance: f32) -> Self {
        let mut extended = *self;
        extended.max.z += distance.max(0.0);
        extended
    }

    /// Strict overlap test (touching faces do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmplt(other.max).all() && other.min.cmplt(self.max).all()
    }
}

/// First entity (in spawn order) whose box overlaps `player`.
///
/// Entity boxes are swept over the registry's last scroll step, so a fast
/// track cannot carry an entity from in front of the player to behind it
/// between two checks. When two entities overlap on the same tick the
/// earlier-spawned one wins.
pub fn check_collision<'a, T: LaneEntity>(
    player: &Aabb,
    registry: &'a Registry<T>,
) -> Option<&'a T> {
    let step = registry.last_step();
    registry
        .iter()
        .find(|entity| player.intersects(&entity.swept_volume(step)))
}
