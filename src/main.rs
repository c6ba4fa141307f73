//! Rooftop Run entry point
//!
//! Headless demo driver: runs the deterministic core at a fixed timestep
//! with the autopilot and prints a run summary. A real frontend feeds
//! `tick()` from its frame callback, drains events into audio/UI, and
//! draws from `GameState::snapshot()`.

use rooftop_run::consts::*;
use rooftop_run::highscores::BestScore;
use rooftop_run::sim::{tick, GameEvent, GamePhase, GameState, TickInput};
use rooftop_run::tuning::Tuning;

const BEST_SCORE_PATH: &str = "best_score.json";
const TUNING_PATH: &str = "tuning.json";

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(20_000);

    let tuning = Tuning::load_from(TUNING_PATH);
    let mut state = GameState::new(seed, tuning);
    state.reset(PLAYER_X, GROUND_Y - PLAYER_HEIGHT);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut jumps = 0u32;
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        tick(&mut state, &input, REF_FRAME_MS);
        for event in state.drain_events() {
            match event {
                GameEvent::Jump => jumps += 1,
                GameEvent::Land => {}
                GameEvent::Death => {
                    log::info!("autopilot died at distance {:.0}", state.world.distance)
                }
            }
        }
    }

    let mut best = BestScore::load_from(BEST_SCORE_PATH);
    let record = best.submit(state.score(), state.world.distance);
    if record {
        if let Err(err) = best.save_to(BEST_SCORE_PATH) {
            log::warn!("failed to save best score: {err}");
        }
    }

    println!(
        "seed {seed}: score {} over {:.0}px in {} ticks ({jumps} jumps){}",
        state.score(),
        state.world.distance,
        state.time_ticks,
        if record { " - new best" } else { "" },
    );
}
