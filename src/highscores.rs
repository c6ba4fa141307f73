//! Best-score record
//!
//! The core reports finished runs; the host owns where (and whether) the
//! value is persisted. A single scalar, only ever updated upward.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
    /// Distance of the record run, for the game-over screen
    pub distance: f32,
}

impl BestScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a finished run would set a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a finished run. Returns true when it set a new record; a
    /// lower or equal score never overwrites the stored one.
    pub fn submit(&mut self, score: u64, distance: f32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        self.distance = distance;
        true
    }

    /// Load from a JSON file, falling back to an empty record
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(best) => best,
                Err(err) => {
                    log::warn!("corrupt best-score file, starting fresh: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save as JSON
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
