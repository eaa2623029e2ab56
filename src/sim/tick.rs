//! Per-frame simulation step
//!
//! Core game loop. One call advances the run by one frame; the caller owns the
//! frame clock and calls this exactly once per frame.

use glam::Vec3;

use super::debris;
use super::effects::ObstacleOutcome;
use super::state::{GameEvent, GameState};
use crate::consts::OBSTACLE_CENTER_HEIGHT;
use crate::input::Intent;

/// Advance the game state by one frame of `dt` seconds.
///
/// Order within a frame: scroll, player (intents then physics), spawners at the
/// frame's effective speed, effect timers, pickups, obstacle hits. Negative or
/// non-finite deltas count as zero.
pub fn tick(state: &mut GameState, intents: &[Intent], dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    // Debris keeps falling on the game-over screen
    debris::update(&mut state.debris, dt);

    if !state.is_running() {
        if intents.contains(&Intent::StartOrRestart) {
            state.start();
        }
        return;
    }

    state.scroll.advance(dt);

    for intent in intents {
        match intent {
            Intent::MoveLeft | Intent::MoveRight => {
                let direction = if *intent == Intent::MoveLeft { -1 } else { 1 };
                if state.player.apply_lane_intent(direction) {
                    state.events.push(GameEvent::LaneChanged {
                        lane: state.player.lane,
                    });
                }
            }
            Intent::Jump => {
                if state.player.apply_jump_intent() {
                    state.events.push(GameEvent::Jumped);
                }
            }
            // Restart only applies once the run is over
            Intent::StartOrRestart => {}
        }
    }
    state.player.update(dt);

    let speed = state.scroll.effective_speed(state.effects.boost_active());
    state
        .obstacles
        .update(dt, speed, &mut state.rng, &mut state.events);
    state
        .powerups
        .update(dt, speed, &mut state.rng, &mut state.events);

    if let Some(kind) = state.effects.update(dt) {
        state.events.push(GameEvent::EffectExpired { kind });
    }

    resolve_pickups(state);
    resolve_obstacle_hit(state);
}

fn resolve_pickups(state: &mut GameState) {
    let volume = state
        .player
        .volume(state.tuning.collision.pickup_forgiveness);
    let Some(kind) = state.powerups.check_collision(&volume, &mut state.events) else {
        return;
    };

    log::debug!("Picked up {:?} at distance {}", kind, state.score());
    state.effects.activate(kind);
    state.events.push(GameEvent::PowerupPickedUp { kind });
    if state.effects.take_cooldown_request() {
        state.powerups.start_cooldown();
    }
}

fn resolve_obstacle_hit(state: &mut GameState) {
    let volume = state
        .player
        .volume(state.tuning.collision.obstacle_forgiveness);
    let Some((id, lane, depth)) = state
        .obstacles
        .check_collision(&volume)
        .map(|o| (o.id, o.lane, o.depth))
    else {
        return;
    };

    match state.effects.obstacle_outcome() {
        ObstacleOutcome::PassThrough => {}
        ObstacleOutcome::Destroy => {
            if state.obstacles.remove_obstacle(id).is_some() {
                log::debug!("Smashed obstacle {} in {:?}", id, lane);
                state.events.push(GameEvent::ObstacleDestroyed { id, lane });
                state.spawn_debris(Vec3::new(lane.x(), OBSTACLE_CENTER_HEIGHT, depth));
            }
        }
        ObstacleOutcome::Fatal => state.game_over(),
    }
}
