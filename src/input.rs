//! Player intents
//!
//! Raw device input (keys, swipes, taps) is translated upstream; the simulation
//! only ever sees these discrete intents.

use serde::{Deserialize, Serialize};

/// A discrete player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Jump,
    StartOrRestart,
}

/// Intents buffered between frames.
/// The platform layer pushes as events arrive; the frame driver drains once per tick.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    intents: Vec<Intent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            intents: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Take all pending intents in arrival order, leaving the queue empty
    pub fn drain(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }
}
