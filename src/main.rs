//! Star Skirmish headless runner
//!
//! Drives the simulation with a simple scripted pilot and prints the final
//! state as JSON. Rendering and real input wiring live with the host.
//!
//! Usage: `star-skirmish [tuning.json] [seed] [ticks]`

use glam::Vec2;

use star_skirmish::Tuning;
use star_skirmish::platform::{Direction, InputState, capture};
use star_skirmish::sim::{Bounds, GameEvent, GamePhase, GameState, option_regions, tick};

const DEFAULT_TICKS: u64 = 60 * 60;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next().filter(|a| a != "-") {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_TICKS);

    let bounds = Bounds::new(1280.0, 720.0);
    let mut state = match GameState::new(seed, tuning, bounds) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Star Skirmish (headless) running {ticks} ticks with seed {seed}");
    let mut input = InputState::new(bounds);
    let mut upgrades_taken = 0u32;

    for _ in 0..ticks {
        pilot(&state, &mut input);
        let frame = capture(&mut input);
        tick(&mut state, &frame);

        for event in &state.events {
            if let GameEvent::UpgradeChosen { .. } = event {
                upgrades_taken += 1;
            }
        }
        if state.time_ticks % 600 == 0 {
            log::info!(
                "tick {}: score={} enemies={} bullets={}",
                state.time_ticks,
                state.score,
                state.enemies.len(),
                state.bullets.len()
            );
        }
    }

    log::info!("Finished: score={}, upgrades taken={upgrades_taken}", state.score);
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

fn load_tuning(path: &str) -> Result<Tuning, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

/// Aim at the nearest enemy, circle-strafe, and take the first upgrade offered
fn pilot(state: &GameState, input: &mut InputState) {
    match state.phase {
        GamePhase::UpgradeSelect => {
            if let Some(card) = option_regions(state, input.bounds).first() {
                input.pointer = card.min() + Vec2::new(card.width, card.height) / 2.0;
                input.click();
            }
            input.fire_held = false;
        }
        GamePhase::Playing => {
            let target = state
                .enemies
                .iter()
                .map(|e| e.pos)
                .min_by(|a, b| {
                    a.distance_squared(state.player.pos)
                        .total_cmp(&b.distance_squared(state.player.pos))
                })
                .unwrap_or(input.bounds.center());
            input.pointer = target;
            input.fire_held = !state.enemies.is_empty();
            input.set_key(Direction::Right, true);
        }
    }
}
