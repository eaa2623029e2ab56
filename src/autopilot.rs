//! Demo/attract mode: the game plays itself
//!
//! Looks a short way down the track and steers around whatever is coming.
//! Not meant to be good, just believable.

use crate::input::Intent;
use crate::sim::{GameState, Lane};

/// How far ahead (depth units) the autopilot reacts to obstacles
const LOOKAHEAD: f32 = 12.0;
/// Jump when an unavoidable obstacle is this close
const JUMP_DEPTH: f32 = 3.0;

fn lane_blocked(state: &GameState, lane: Lane) -> bool {
    state
        .obstacles
        .obstacles()
        .iter()
        .any(|o| o.lane == lane && o.depth > -1.0 && o.depth < LOOKAHEAD)
}

/// Nearest threatening obstacle depth in `lane`, if any
fn nearest_threat(state: &GameState, lane: Lane) -> Option<f32> {
    state
        .obstacles
        .obstacles()
        .iter()
        .filter(|o| o.lane == lane && o.depth > -1.0 && o.depth < LOOKAHEAD)
        .map(|o| o.depth)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

fn step_toward(from: Lane, to: Lane) -> Option<Intent> {
    match to.index().cmp(&from.index()) {
        std::cmp::Ordering::Less => Some(Intent::MoveLeft),
        std::cmp::Ordering::Greater => Some(Intent::MoveRight),
        std::cmp::Ordering::Equal => None,
    }
}

/// Intents for this frame
pub fn choose_intents(state: &GameState) -> Vec<Intent> {
    if !state.is_running() {
        return vec![Intent::StartOrRestart];
    }

    let lane = state.player.lane;
    let invulnerable = state.effects.shield_active()
        || state.effects.boost_active()
        || state.effects.invincibility_grace() > 0.0;

    let threat = if invulnerable { None } else { nearest_threat(state, lane) };
    if let Some(depth) = threat {
        // Prefer a clear neighbour; one lane at a time
        let escape = [lane.shifted(-1), lane.shifted(1)]
            .into_iter()
            .flatten()
            .find(|&l| !lane_blocked(state, l));
        return match escape {
            Some(target) => step_toward(lane, target).into_iter().collect(),
            None if depth < JUMP_DEPTH && !state.player.jumping => vec![Intent::Jump],
            None => Vec::new(),
        };
    }

    // Nothing in the way: go for the nearest power-up in a safe lane
    let target = state
        .powerups
        .powerups()
        .iter()
        .filter(|p| p.depth > 0.0 && (invulnerable || !lane_blocked(state, p.lane)))
        .min_by(|a, b| a.depth.partial_cmp(&b.depth).unwrap_or(std::cmp::Ordering::Equal))
        .map(|p| p.lane);

    target
        .and_then(|to| step_toward(lane, to))
        .into_iter()
        .collect()
}
