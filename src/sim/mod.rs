//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, simulated time in whole milliseconds
//! - Seeded RNG only
//! - Stable iteration order (insertion order per entity kind)
//! - No rendering or platform dependencies

pub mod clock;
pub mod entity;
pub mod shield;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use entity::{Faller, Player, Rect, Star};
pub use shield::{ShieldPhase, ShieldTimer};
pub use spawn::{SpawnTimers, Spawner, run_spawners};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
