//! Per-tick orchestration
//!
//! The run controller: advances the world, resolves the ground under the
//! player, applies the landing and side-collision rules, and turns terminal
//! conditions into events. Owns no state of its own - it only reads and
//! coordinates the world and player it is handed.

use super::physics::{self, RoofContact};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick. Edges, not key codes: the host
/// translates whatever raw input it has into press/release pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump button went down this frame
    pub jump_pressed: bool,
    /// Jump button came up this frame
    pub jump_released: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart the run
    pub restart: bool,
    /// Demo autopilot: synthesize jump edges instead of reading input
    pub idle_mode: bool,
}

/// Advance the game by one frame of `dt_ms` wall-clock milliseconds.
///
/// A stalled frame (hidden tab, debugger) collapses to one nominal frame
/// instead of a catch-up teleport through the skyline. Negative or NaN
/// deltas are a caller contract violation and are not sanitized here.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let frames = if dt_ms > MAX_FRAME_MS {
        1.0
    } else {
        dt_ms / REF_FRAME_MS
    };

    if input.restart {
        state.reset(PLAYER_X, GROUND_Y - PLAYER_HEIGHT);
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Menu | GamePhase::Paused => return,
        GamePhase::GameOver => {
            state.player.advance_death(frames);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    let mut input = *input;
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    // 1. Held boost continues an airborne jump; a fresh press takes effect
    //    the same tick it arrives.
    state.player.apply_hold_boost(&state.tuning, frames);
    if input.jump_pressed && state.player.press_jump(&state.tuning) {
        state.push_event(GameEvent::Jump);
    }
    if input.jump_released {
        state.player.release_jump();
    }

    // 2. Scroll the skyline.
    state.world.update(&state.tuning, frames);

    // 3. Ground under the feet. No platform is not an error - it is the
    //    normal gap-entry condition, and walking off an edge starts a fall.
    let roof = state.world.platform_at(state.player.center_x()).map(|p| p.y);
    if roof.is_none() && state.player.grounded {
        state.player.grounded = false;
    }

    // 4. Vertical integration against the resolved rooftop.
    let (prev_top, prev_bottom) = state.player.integrate(&state.tuning, frames);

    state.player.update_cosmetics(frames);

    // 5. Landing vs wall impact, judged on the pre-/post-update span.
    if let Some(roof_y) = roof {
        if !state.player.grounded {
            match physics::classify_roof_contact(
                prev_top,
                prev_bottom,
                state.player.bottom(),
                state.player.vy,
                roof_y,
                LANDING_EPSILON,
            ) {
                RoofContact::Landed => {
                    state.player.land(roof_y);
                    state.push_event(GameEvent::Land);
                }
                RoofContact::FatalImpact => {
                    game_over(state);
                    return;
                }
                RoofContact::None => {}
            }
        }
    }

    // The face of an oncoming building. Platforms scan left-to-right, so
    // the loop can stop once they start past the player.
    let player_box = state.player.aabb();
    let mut wall_hit = false;
    for platform in state.world.platforms() {
        if physics::side_impact(&player_box, &platform.aabb(), SIDE_TOLERANCE) {
            wall_hit = true;
            break;
        }
        if platform.x >= player_box.right() {
            break;
        }
    }
    if wall_hit {
        game_over(state);
        return;
    }

    // 6. The void between buildings.
    if state.player.y > VIEW_HEIGHT + FALL_MARGIN {
        game_over(state);
        return;
    }

    // 7. Score rides the scroll, not the player.
    let gained = (state.world.scroll_speed * frames * state.tuning.score_rate) as f64;
    state.add_score(gained);
}

/// Exactly one death transition per run: the phase flip gates re-entry.
fn game_over(state: &mut GameState) {
    state.player.kill();
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::Death);
    log::info!(
        "run over: score {} distance {:.0}",
        state.score(),
        state.world.distance
    );
}

/// Demo autopilot: press when the rooftop underfoot is about to run out,
/// hold through the rise, release on the way down.
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    if !player.alive {
        return;
    }
    if player.grounded {
        if let Some(platform) = state.world.platform_at(player.center_x()) {
            let runway = platform.right() - player.center_x();
            if runway < state.world.scroll_speed * 4.0 {
                input.jump_pressed = true;
            }
        }
    } else if player.vy >= 0.0 {
        input.jump_released = true;
    }
}
