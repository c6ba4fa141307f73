//! Aggregate game state, phases, and outbound events
//!
//! The phase is an explicit tagged variant consumed by the run controller;
//! collaborators (UI, audio) react to drained events rather than shared
//! globals.

use serde::{Deserialize, Serialize};

use super::player::{Player, TrailPoint};
use super::world::{Platform, World};
use crate::consts::*;
use crate::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting in the menu; the simulation does not run
    Menu,
    /// Active run
    Playing,
    /// Frozen mid-run
    Paused,
    /// Run ended; only the death animation advances
    GameOver,
}

/// Fire-and-forget cues for the audio/UI collaborators. Consumers drain
/// the queue between ticks; nothing in the core depends on whether anyone
/// listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Land,
    /// Terminal; emitted exactly once per run
    Death,
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub world: World,
    pub player: Player,
    /// Simulation tick counter
    pub time_ticks: u64,
    score: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let world = World::new(seed, &tuning);
        let player = Player::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT);
        Self {
            seed,
            tuning,
            phase: GamePhase::Menu,
            world,
            player,
            time_ticks: 0,
            score: 0.0,
            events: Vec::new(),
        }
    }

    /// Start (or restart) a run with the player at the given position.
    /// Reinitializes world and player from the run seed; two consecutive
    /// resets produce identical state.
    pub fn reset(&mut self, start_x: f32, start_y: f32) {
        self.world.reset(&self.tuning);
        self.player.reset(start_x, start_y);
        // Spawning flush on a rooftop starts the run grounded rather than
        // with a one-frame fall.
        if let Some(roof) = self.world.platform_at(self.player.center_x()).map(|p| p.y) {
            if (self.player.bottom() - roof).abs() <= LANDING_EPSILON {
                self.player.land(roof);
            }
        }
        self.time_ticks = 0;
        self.score = 0.0;
        self.events.clear();
        self.phase = GamePhase::Playing;
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain queued cues; called once per frame by the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn add_score(&mut self, amount: f64) {
        self.score += amount;
    }

    pub fn score(&self) -> u64 {
        self.score as u64
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score(),
            distance: self.world.distance,
            scroll_speed: self.world.scroll_speed,
            death_progress: self.player.death_progress,
            player: &self.player,
            world: &self.world,
        }
    }
}

/// Read-only render snapshot borrowed from live state. The renderer draws
/// from this and emits nothing back into the core.
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub distance: f32,
    pub scroll_speed: f32,
    /// Death animation progress in [0,1]
    pub death_progress: f32,
    pub player: &'a Player,
    world: &'a World,
}

impl<'a> Snapshot<'a> {
    /// Platform list in left-to-right order
    pub fn platforms(&self) -> impl Iterator<Item = &'a Platform> {
        self.world.platforms()
    }

    /// Trail buffer, newest first
    pub fn trail(&self) -> &'a [TrailPoint] {
        &self.player.trail
    }
}
