//! Star Dodger - dodge falling asteroids, collect orbs, raise your shield
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `renderer`: Draw command generation and 2D surface playback
//! - `input`: Held-key tracking and per-tick input snapshots
//! - `audio`: Feedback tones for gameplay events
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use input::KeyState;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical units, also the canvas size)
    pub const PLAYFIELD_WIDTH: f32 = 500.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Fixed simulation interval in milliseconds (50 Hz)
    pub const TICK_MS: u32 = 20;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame we account for (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Background starfield size
    pub const STAR_COUNT: usize = 50;
}
