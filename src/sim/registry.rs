//! Lane entity registry
//!
//! Obstacles and power-ups share the same life cycle: they appear far down the
//! track, scroll toward the player and are culled once they fall behind.

use glam::Vec3;

use super::collision::Aabb;
use super::state::Lane;

/// Something that lives on a lane and scrolls along the depth axis
pub trait LaneEntity {
    /// Box half-extents
    const HALF_EXTENTS: Vec3;
    /// Height of the box center above the track
    const CENTER_HEIGHT: f32;

    fn id(&self) -> u32;
    fn lane(&self) -> Lane;
    fn depth(&self) -> f32;

    /// Move `step` units toward (and past) the player; `dt` drives cosmetic spin
    fn scroll(&mut self, step: f32, dt: f32);

    /// World-space box derived from lane, depth and the fixed extent
    fn volume(&self) -> Aabb {
        Aabb::from_center(
            Vec3::new(self.lane().x(), Self::CENTER_HEIGHT, self.depth()),
            Self::HALF_EXTENTS,
        )
    }

    /// Box covering everywhere the entity was during a scroll of `step` units
    /// that ended at its current depth
    fn swept_volume(&self, step: f32) -> Aabb {
        self.volume().extended_depth(step)
    }
}

/// Insertion-ordered set of live entities of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<T> {
    items: Vec<T>,
    next_id: u32,
    /// Distance the last `scroll` moved every entity
    last_step: f32,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            last_step: 0.0,
        }
    }
}

impl<T: LaneEntity> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an ID and append the entity built from it
    pub fn insert_with(&mut self, build: impl FnOnce(u32) -> T) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(build(id));
        id
    }

    /// Remove by ID. Returns None if it was already gone.
    pub fn remove(&mut self, id: u32) -> Option<T> {
        let index = self.items.iter().position(|e| e.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Remove and return the first entity matching `pred`
    pub fn take_first(&mut self, pred: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.items.iter().position(pred)?;
        Some(self.items.remove(index))
    }

    /// Scroll every entity, then cull the ones behind `despawn_depth`.
    /// Returns the IDs that were culled, in spawn order.
    pub fn scroll(&mut self, step: f32, dt: f32, despawn_depth: f32) -> Vec<u32> {
        self.last_step = step.max(0.0);
        for item in &mut self.items {
            item.scroll(step, dt);
        }
        let mut culled = Vec::new();
        self.items.retain(|item| {
            let keep = item.depth() >= despawn_depth;
            if !keep {
                culled.push(item.id());
            }
            keep
        });
        culled
    }

    /// Distance covered by the most recent `scroll`
    pub fn last_step(&self) -> f32 {
        self.last_step
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop everything and restart ID allocation
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 1;
        self.last_step = 0.0;
    }
}
