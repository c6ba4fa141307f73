//! Player kinematics and jump state
//!
//! The runner never moves horizontally - the world scrolls underneath.
//! Vertical motion is the whole game: a jump impulse, a held-boost window
//! for variable jump height, gravity, and the landing/death transitions the
//! run controller drives through the physics classifiers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{self, Aabb};
use crate::consts::*;
use crate::Tuning;

/// Trail point for rendering (newest first)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Linearly decaying opacity in [0,1]
    pub alpha: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 16;

/// Death animation length in reference frames
pub const DEATH_ANIM_FRAMES: f32 = 45.0;

/// Player kinematic state for one run
#[derive(Debug, Clone)]
pub struct Player {
    /// Nominal fixed x in a world-scroll game
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
    pub alive: bool,
    /// Frames of held-jump boost spent on the current jump
    hold_frames: f32,
    /// Button state as reported by input edges
    jump_held: bool,
    /// Set once the boost window closes; re-armed only by landing
    boost_spent: bool,
    /// Animation frame counter (cosmetic)
    pub anim_frame: u32,
    /// Trail history, newest first (cosmetic, no physics effect)
    pub trail: Vec<TrailPoint>,
    /// Death animation progress in [0,1]
    pub death_progress: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            grounded: false,
            alive: true,
            hold_frames: 0.0,
            jump_held: false,
            boost_spent: false,
            anim_frame: 0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            death_progress: 0.0,
        }
    }

    pub fn reset(&mut self, x: f32, y: f32) {
        *self = Player::new(x, y);
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Horizontal feet position used for the ground query
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Jump press edge. Fires only while grounded and takes effect the same
    /// tick it is processed. Returns whether a jump actually started.
    pub fn press_jump(&mut self, tuning: &Tuning) -> bool {
        self.jump_held = true;
        if !self.grounded || !self.alive {
            return false;
        }
        self.vy = tuning.jump_power;
        self.grounded = false;
        self.hold_frames = 0.0;
        self.boost_spent = false;
        true
    }

    /// Release edge: ends the boost window for the current jump for good
    pub fn release_jump(&mut self) {
        self.jump_held = false;
        self.boost_spent = true;
    }

    /// Variable jump height: a small extra upward impulse each tick while
    /// the button stays held, the hold window is open, and the player is
    /// still rising. Once closed the window never reopens mid-air.
    pub fn apply_hold_boost(&mut self, tuning: &Tuning, frames: f32) {
        if self.grounded || self.boost_spent || !self.jump_held || self.vy >= 0.0 {
            return;
        }
        if self.hold_frames >= tuning.max_hold_frames {
            self.boost_spent = true;
            return;
        }
        self.vy -= tuning.jump_hold_power * frames;
        self.hold_frames += frames;
    }

    /// Integrate vertical motion. Returns `(prev_top, prev_bottom)` for the
    /// landing classifier.
    pub fn integrate(&mut self, tuning: &Tuning, frames: f32) -> (f32, f32) {
        let prev_top = self.y;
        let prev_bottom = self.bottom();
        if !self.grounded {
            self.vy = physics::apply_gravity(
                self.vy,
                tuning.gravity,
                tuning.terminal_velocity,
                frames,
            );
            self.y += self.vy * frames;
        }
        (prev_top, prev_bottom)
    }

    /// Snap onto a rooftop; re-arms the jump boost
    pub fn land(&mut self, roof_y: f32) {
        self.y = roof_y - self.height;
        self.vy = 0.0;
        self.grounded = true;
        self.hold_frames = 0.0;
        self.boost_spent = false;
    }

    pub fn kill(&mut self) {
        self.alive = false;
        self.grounded = false;
        self.death_progress = 0.0;
    }

    /// Cosmetic bookkeeping: runs every tick, never feeds back into the
    /// state machine
    pub fn update_cosmetics(&mut self, frames: f32) {
        self.anim_frame = self.anim_frame.wrapping_add(1);
        let fade = frames / TRAIL_LENGTH as f32;
        for point in &mut self.trail {
            point.alpha = (point.alpha - fade).max(0.0);
        }
        self.trail.insert(
            0,
            TrailPoint {
                pos: Vec2::new(self.x, self.y),
                alpha: 1.0,
            },
        );
        self.trail.truncate(TRAIL_LENGTH);
    }

    pub fn advance_death(&mut self, frames: f32) {
        self.death_progress = (self.death_progress + frames / DEATH_ANIM_FRAMES).min(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_player() -> Player {
        let mut player = Player::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT);
        player.land(GROUND_Y);
        player
    }

    /// Run a full jump arc and return the apex height above takeoff
    fn jump_apex(tuning: &Tuning, hold_ticks: u32) -> f32 {
        let mut player = grounded_player();
        let takeoff = player.y;
        player.press_jump(tuning);
        let mut apex = 0.0_f32;
        for tick in 0..600 {
            if tick >= hold_ticks && player.jump_held {
                player.release_jump();
            }
            player.apply_hold_boost(tuning, 1.0);
            player.integrate(tuning, 1.0);
            apex = apex.max(takeoff - player.y);
            if player.y >= takeoff && player.vy > 0.0 {
                break;
            }
        }
        apex
    }

    #[test]
    fn test_jump_fires_same_tick() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        assert!(player.press_jump(&tuning));
        assert_eq!(player.vy, tuning.jump_power);
        assert!(!player.grounded);
    }

    #[test]
    fn test_jump_requires_ground() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        player.press_jump(&tuning);
        let vy = player.vy;
        // Pressing again mid-air does nothing
        assert!(!player.press_jump(&tuning));
        assert_eq!(player.vy, vy);
    }

    #[test]
    fn test_held_jump_rises_higher() {
        let tuning = Tuning::default();
        let tap = jump_apex(&tuning, 1);
        let held = jump_apex(&tuning, 120);
        assert!(
            held > tap + 20.0,
            "held apex {held:.1} should clear tap apex {tap:.1}"
        );
    }

    #[test]
    fn test_release_ends_boost_permanently() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        player.press_jump(&tuning);
        player.apply_hold_boost(&tuning, 1.0);
        player.release_jump();
        let vy = player.vy;
        // Re-pressing mid-air must not restart the boost
        player.press_jump(&tuning);
        player.apply_hold_boost(&tuning, 1.0);
        assert_eq!(player.vy, vy);
    }

    #[test]
    fn test_boost_window_expires() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        player.press_jump(&tuning);
        for _ in 0..(tuning.max_hold_frames as u32) {
            player.apply_hold_boost(&tuning, 1.0);
        }
        let vy = player.vy;
        player.apply_hold_boost(&tuning, 1.0);
        // First call past the window only latches boost_spent
        assert_eq!(player.vy, vy);
        player.apply_hold_boost(&tuning, 1.0);
        assert_eq!(player.vy, vy);
    }

    #[test]
    fn test_landing_rearms_boost() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        player.press_jump(&tuning);
        player.release_jump();
        player.land(GROUND_Y);
        assert!(player.press_jump(&tuning));
        player.apply_hold_boost(&tuning, 1.0);
        // Boost applies again on the new jump while the press is held
        assert!(player.vy < tuning.jump_power);
    }

    #[test]
    fn test_grounded_player_does_not_fall() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        let y = player.y;
        player.integrate(&tuning, 1.0);
        assert_eq!(player.y, y);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn test_trail_is_bounded_and_fades() {
        let mut player = grounded_player();
        for _ in 0..100 {
            player.update_cosmetics(1.0);
        }
        assert_eq!(player.trail.len(), TRAIL_LENGTH);
        assert_eq!(player.trail[0].alpha, 1.0);
        let last = player.trail.last().unwrap().alpha;
        assert!(last < 0.1, "oldest point should be nearly faded, got {last}");
    }

    #[test]
    fn test_death_progress_saturates() {
        let mut player = Player::new(0.0, 0.0);
        player.kill();
        for _ in 0..200 {
            player.advance_death(1.0);
        }
        assert_eq!(player.death_progress, 1.0);
    }
}
