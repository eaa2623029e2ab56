//! Lane Runner headless driver
//!
//! Runs the simulation under the autopilot at a fixed frame rate, logging each
//! run and keeping the best distance on disk. Rendering, audio and device input
//! belong to the platform layer and are not part of this binary.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `LANE_RUNNER_TUNING`: optional path to a tuning JSON file
//! - `LANE_RUNNER_SEED`: optional run seed (default: current time)

use std::time::{SystemTime, UNIX_EPOCH};

use lane_runner::consts::{FRAME_DT, MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use lane_runner::sim::{GameEvent, GameState, tick};
use lane_runner::{BestDistance, InputQueue, Tuning, autopilot};

/// Runs to play before exiting
const RUNS: u32 = 5;
/// Safety cap on simulated time per session (seconds)
const MAX_SESSION_SECS: f32 = 15.0 * 60.0;

fn load_tuning() -> Tuning {
    match std::env::var("LANE_RUNNER_TUNING") {
        Ok(path) => Tuning::load_from(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default tuning");
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    }
}

fn session_seed() -> u64 {
    std::env::var("LANE_RUNNER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = session_seed();
    let mut state = GameState::with_tuning(seed, load_tuning());
    let best_path = std::env::temp_dir().join("lane_runner_best.json");
    let mut best = BestDistance::load_from(&best_path);
    let mut input = InputQueue::new();

    log::info!("Lane Runner session starting (seed {seed})");

    let mut runs = 0;
    let mut elapsed = 0.0;
    let mut accumulator = 0.0;
    while runs < RUNS && elapsed < MAX_SESSION_SECS {
        for intent in autopilot::choose_intents(&state) {
            input.push(intent);
        }

        let dt = FRAME_DT.min(MAX_FRAME_DT);
        accumulator += dt;
        elapsed += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Intents are one-shot: only the first substep sees them
            tick(&mut state, &input.drain(), SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in state.drain_events() {
            match event {
                GameEvent::GameOver { score } => {
                    runs += 1;
                    log::info!("Run {runs}/{RUNS}: distance {score}");
                    if best.record(score) {
                        if let Err(e) = best.save_to(&best_path) {
                            log::warn!("Could not save best distance: {e}");
                        }
                    }
                }
                GameEvent::PowerupPickedUp { kind } => log::debug!("Picked up {kind:?}"),
                GameEvent::ObstacleDestroyed { id, .. } => log::debug!("Smashed obstacle {id}"),
                _ => {}
            }
        }
    }

    if state.is_running() {
        log::info!("Session time limit reached mid-run at distance {}", state.score());
    }
    log::info!("Best distance: {}", best.best);
}
