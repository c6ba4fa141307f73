//! Stateless kinematics and collision rules
//!
//! The failure-sensitive part of the runner: deciding whether a vertical
//! crossing of a rooftop line is a landing or a wall impact, one frame at a
//! time. Everything here is a pure function over axis-aligned boxes; the
//! run controller feeds in pre-/post-update positions and acts on the
//! returned classification.
//!
//! Nothing in this module errors. NaN inputs propagate as NaN - the driving
//! loop is responsible for clamping dt before a tick reaches these.

use serde::{Deserialize, Serialize};

use crate::Tuning;

/// Axis-aligned box; `y` is the top edge and grows downward
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Half-open overlap test; touching edges do NOT count as overlap
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Gravity integration over `frames` reference frames, clamped to the
/// terminal fall velocity
#[inline]
pub fn apply_gravity(vy: f32, gravity: f32, terminal: f32, frames: f32) -> f32 {
    (vy + gravity * frames).min(terminal)
}

/// Outcome of a vertical pass across a rooftop line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoofContact {
    /// No crossing this tick
    None,
    /// Clean landing: snap to the roof, zero vy, grounded
    Landed,
    /// Crossed the line from inside or below the building face; fatal
    FatalImpact,
}

/// Classify a player's crossing of a platform's rooftop line.
///
/// Lands only when the fall genuinely started above the roof:
/// - previous bottom at-or-above the line (within `eps`),
/// - current bottom at-or-below it,
/// - moving downward (`vy >= 0`), and
/// - previous top strictly above the line.
///
/// A crossing that satisfies the first three but not the last approached
/// from inside, below, or through the side of the building, and is a fatal
/// impact rather than a landing.
pub fn classify_roof_contact(
    prev_top: f32,
    prev_bottom: f32,
    new_bottom: f32,
    vy: f32,
    roof_y: f32,
    eps: f32,
) -> RoofContact {
    let crossed = prev_bottom <= roof_y + eps && new_bottom >= roof_y;
    if !crossed || vy < 0.0 {
        return RoofContact::None;
    }
    if prev_top < roof_y {
        RoofContact::Landed
    } else {
        RoofContact::FatalImpact
    }
}

/// Wall hit against an oncoming building: the player's right edge has
/// crossed the platform's left face, the player's own left edge has not,
/// and the overlap reaches below the rooftop line by more than `tolerance`.
pub fn side_impact(player: &Aabb, platform: &Aabb, tolerance: f32) -> bool {
    player.right() > platform.x
        && player.x < platform.x
        && player.bottom() > platform.y + tolerance
}

/// Launch velocity needed to reach `height` pixels: `-sqrt(2*g*h)`.
/// Tuning verification only, never evaluated per-frame.
#[inline]
pub fn jump_velocity_for_height(gravity: f32, height: f32) -> f32 {
    -(2.0 * gravity * height).sqrt()
}

/// Horizontal distance a fully-held jump covers at `speed`, returning to
/// takeoff height. Simulated at the reference timestep so the answer
/// matches the tick integrator exactly; used by the reachability checks.
pub fn max_jump_span(t: &Tuning, speed: f32) -> f32 {
    let mut vy = t.jump_power;
    let mut y = 0.0_f32;
    let mut held = 0.0_f32;
    let mut frames = 0.0_f32;
    while frames < 10_000.0 {
        if held < t.max_hold_frames && vy < 0.0 {
            vy -= t.jump_hold_power;
            held += 1.0;
        }
        vy = apply_gravity(vy, t.gravity, t.terminal_velocity, 1.0);
        y += vy;
        frames += 1.0;
        if vy > 0.0 && y >= 0.0 {
            break;
        }
    }
    frames * speed
}
