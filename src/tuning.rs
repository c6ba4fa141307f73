//! Data-driven game balance
//!
//! Every gameplay tunable lives here so runs can be rebalanced without
//! touching simulation code. Velocities and accelerations are in pixels
//! per reference frame (60 Hz); the tick loop normalizes wall-clock deltas
//! into frames before they reach these numbers.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Vertical physics ===
    /// Downward acceleration (px/frame^2)
    pub gravity: f32,
    /// Fall speed cap (px/frame)
    pub terminal_velocity: f32,
    /// Jump launch velocity; negative is upward
    pub jump_power: f32,
    /// Extra upward impulse per frame while the jump is held
    pub jump_hold_power: f32,
    /// Length of the held-boost window in frames
    pub max_hold_frames: f32,

    // === Scroll speed ramp ===
    pub base_speed: f32,
    pub max_speed: f32,
    /// Speed gained per pixel of distance traveled
    pub speed_increase_rate: f32,

    // === Platform synthesis ===
    pub min_gap: f32,
    pub max_gap: f32,
    /// Difficulty widens gaps at most this much; keeps the game winnable
    pub gap_difficulty_cap: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Width lost per unit of difficulty above 1
    pub width_shrink_rate: f32,
    /// Shrunk width bounds never drop below these floors
    pub min_width_floor: f32,
    pub max_width_floor: f32,
    /// Rooftop staircase step, per building
    pub height_variation: f32,
    /// Rooftops stay within [ground - rise, ground + drop]
    pub roof_rise_limit: f32,
    pub roof_drop_limit: f32,

    // === Difficulty curve ===
    /// Distance per unit of difficulty gained
    pub difficulty_distance: f32,

    // === Scoring ===
    /// Score per pixel scrolled
    pub score_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            terminal_velocity: 12.0,
            jump_power: -11.0,
            jump_hold_power: 0.35,
            max_hold_frames: 20.0,

            base_speed: 4.0,
            max_speed: 9.0,
            speed_increase_rate: 0.0005,

            min_gap: 80.0,
            max_gap: 150.0,
            gap_difficulty_cap: 2.0,
            min_width: 200.0,
            max_width: 420.0,
            width_shrink_rate: 40.0,
            min_width_floor: 120.0,
            max_width_floor: 250.0,
            height_variation: 50.0,
            roof_rise_limit: 100.0,
            roof_drop_limit: 60.0,

            difficulty_distance: 3000.0,

            score_rate: 0.25,
        }
    }
}

impl Tuning {
    /// Derived difficulty scalar: 1.0 at the start, unbounded growth
    #[inline]
    pub fn difficulty(&self, distance: f32) -> f32 {
        1.0 + distance / self.difficulty_distance
    }

    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.as_ref().display());
                    tuning
                }
                Err(err) => {
                    log::warn!("bad tuning file, using defaults: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save as pretty-printed JSON
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
