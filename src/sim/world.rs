//! Procedural skyline generation and scrolling
//!
//! The world owns the platform pool and the generation frontier. Buildings
//! are synthesized left-to-right ahead of the viewport, shifted by the
//! scroll speed each tick, and released back to the pool once fully
//! off-screen. Difficulty widens gaps (capped so runs stay winnable) and
//! narrows rooftops as distance accumulates.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::Aabb;
use super::pool::{Handle, Pool};
use super::rng::{range_f32, RngState};
use crate::consts::*;
use crate::Tuning;

/// A building the player can run across. `y` is the rooftop surface (top
/// edge); the body extends far enough below the viewport to read as solid
/// ground rather than a floating slab.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub active: bool,
    /// Facade style index for the renderer
    pub style: u8,
    /// Per-building seed, fixed at spawn, so silhouettes and window grids
    /// are a pure function of stored state
    pub seed: u64,
}

impl Platform {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Half-open span test used by the ground query
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.right()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

/// Scrolling skyline state
#[derive(Debug, Clone)]
pub struct World {
    /// Current forward velocity in pixels per reference frame;
    /// non-decreasing up to the tuned maximum
    pub scroll_speed: f32,
    /// Monotonic accumulator driving both speed and difficulty
    pub distance: f32,
    /// Screen-space x up to which platforms have been generated
    pub last_platform_end: f32,
    platforms: Pool<Platform>,
    /// Active platforms in generation order (left to right)
    order: Vec<Handle>,
    rng: Pcg32,
    rng_state: RngState,
    /// Rooftop height of the most recently generated building
    prev_roof: f32,
}

impl World {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let rng_state = RngState::new(seed);
        let mut world = Self {
            scroll_speed: tuning.base_speed,
            distance: 0.0,
            last_platform_end: 0.0,
            platforms: Pool::with_capacity(16),
            order: Vec::new(),
            rng: rng_state.to_rng(),
            rng_state,
            prev_roof: GROUND_Y,
        };
        world.spawn_initial(tuning);
        world
    }

    /// Release everything and regenerate the initial safe run. Reseeds the
    /// generator from the run seed, so consecutive resets are identical.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.platforms.clear();
        self.order.clear();
        self.scroll_speed = tuning.base_speed;
        self.distance = 0.0;
        self.last_platform_end = 0.0;
        self.prev_roof = GROUND_Y;
        self.rng = self.rng_state.to_rng();
        self.spawn_initial(tuning);
    }

    /// One long rooftop under the spawn point, then normal generation
    /// through the lookahead window
    fn spawn_initial(&mut self, tuning: &Tuning) {
        let start = Platform {
            x: -OFFSCREEN_MARGIN * 0.5,
            y: GROUND_Y,
            width: START_PLATFORM_WIDTH,
            height: PLATFORM_DEPTH,
            active: true,
            style: 0,
            seed: self.rng.random(),
        };
        self.last_platform_end = start.right();
        self.order.push(self.platforms.insert(start));
        self.fill_frontier(tuning);
        log::info!(
            "skyline reset: {} buildings, frontier at {:.0}",
            self.order.len(),
            self.last_platform_end
        );
    }

    /// Derived difficulty scalar; grows without bound, clamped only through
    /// the gap/width formulas that consume it
    pub fn difficulty(&self, tuning: &Tuning) -> f32 {
        tuning.difficulty(self.distance)
    }

    /// Advance the skyline by `frames` reference frames
    pub fn update(&mut self, tuning: &Tuning, frames: f32) {
        self.scroll_speed = (tuning.base_speed + self.distance * tuning.speed_increase_rate)
            .min(tuning.max_speed);
        let scroll = self.scroll_speed * frames;
        self.distance += scroll;

        for &handle in &self.order {
            if let Some(platform) = self.platforms.get_mut(handle) {
                platform.x -= scroll;
            }
        }

        // Buildings leave in generation order, so only the front of the
        // list can expire. Release past a margin, not at x=0, to avoid
        // pop-out at the screen edge.
        while let Some(&front) = self.order.first() {
            let expired = self
                .platforms
                .get(front)
                .is_some_and(|p| p.right() < -OFFSCREEN_MARGIN);
            if !expired {
                break;
            }
            self.order.remove(0);
            let _ = self.platforms.remove(front);
        }

        // The frontier is screen-relative; retire it by the scroll amount
        // so the comparison below stays viewport-anchored.
        self.last_platform_end -= scroll;
        self.fill_frontier(tuning);
    }

    fn fill_frontier(&mut self, tuning: &Tuning) {
        while self.last_platform_end < VIEW_WIDTH + LOOKAHEAD_MARGIN {
            self.spawn_next(tuning);
        }
    }

    /// Synthesize the next building past the frontier. Gaps are strictly
    /// positive by construction, so spans never overlap and the order list
    /// stays sorted without ever reordering.
    fn spawn_next(&mut self, tuning: &Tuning) {
        let difficulty = self.difficulty(tuning);

        let gap_scale = difficulty.min(tuning.gap_difficulty_cap);
        let gap = range_f32(&mut self.rng, tuning.min_gap, tuning.max_gap) * gap_scale;

        let shrink = (difficulty - 1.0) * tuning.width_shrink_rate;
        let lo = (tuning.min_width - shrink).max(tuning.min_width_floor);
        let hi = (tuning.max_width - shrink).max(tuning.max_width_floor);
        let width = range_f32(&mut self.rng, lo, hi);

        let wobble = range_f32(
            &mut self.rng,
            -tuning.height_variation,
            tuning.height_variation,
        );
        let y = (self.prev_roof + wobble).clamp(
            GROUND_Y - tuning.roof_rise_limit,
            GROUND_Y + tuning.roof_drop_limit,
        );

        let platform = Platform {
            x: self.last_platform_end + gap,
            y,
            width,
            height: PLATFORM_DEPTH,
            active: true,
            style: self.rng.random::<u8>() % STYLE_COUNT,
            seed: self.rng.random(),
        };
        self.prev_roof = y;
        self.last_platform_end = platform.right();
        self.order.push(self.platforms.insert(platform));
    }

    /// The unique active platform whose horizontal span contains `x`, or
    /// none (a gap). O(n) over the active set, which is bounded by
    /// viewport width over the minimum gap.
    pub fn platform_at(&self, x: f32) -> Option<&Platform> {
        self.order
            .iter()
            .filter_map(|&handle| self.platforms.get(handle))
            .find(|p| p.contains_x(x))
    }

    /// Active platforms in generation order, for collision scans and the
    /// render snapshot
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.order
            .iter()
            .filter_map(|handle| self.platforms.get(*handle))
    }

    pub fn active_count(&self) -> usize {
        self.order.len()
    }

    /// Total slots the pool has ever allocated
    pub fn pool_capacity(&self) -> usize {
        self.platforms.capacity()
    }
}
