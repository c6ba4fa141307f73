//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-normalized timestep with a stall cap
//! - Seeded RNG only
//! - Platforms generated left-to-right, never reordered
//! - No rendering or platform dependencies

pub mod physics;
pub mod player;
pub mod pool;
pub mod rng;
pub mod state;
pub mod tick;
pub mod world;

pub use physics::{Aabb, RoofContact};
pub use player::{Player, TrailPoint, TRAIL_LENGTH};
pub use pool::{Handle, Pool};
pub use rng::RngState;
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{tick, TickInput};
pub use world::{Platform, World};
