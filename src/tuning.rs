//! Data-driven game balance
//!
//! Defaults reproduce the classic arcade feel. A page can override any subset
//! of fields with a JSON object; missing fields keep their defaults.

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Errors produced while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Base displacement per tick
    pub player_speed: f32,
    /// Speed multiplier while the boost key is held
    pub boost_multiplier: f32,
    pub starting_lives: u8,

    // === Shield ===
    pub shield_active_ms: u64,
    pub shield_cooldown_ms: u64,

    // === Asteroids ===
    pub asteroid_interval_ms: u32,
    pub asteroid_size: f32,
    /// Spawn speed is uniform in [min, max)
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,

    // === Orbs ===
    pub orb_interval_ms: u32,
    pub orb_size: f32,
    pub orb_speed: f32,
    pub orb_score: u64,

    // === UFOs ===
    pub ufo_interval_ms: u32,
    pub ufo_width: f32,
    pub ufo_height: f32,
    pub ufo_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 40.0,
            player_height: 40.0,
            player_speed: 5.0,
            boost_multiplier: 2.0,
            starting_lives: 3,

            shield_active_ms: 3_000,
            shield_cooldown_ms: 10_000,

            asteroid_interval_ms: 1_000,
            asteroid_size: 30.0,
            asteroid_min_speed: 3.0,
            asteroid_max_speed: 5.0,

            orb_interval_ms: 3_000,
            orb_size: 20.0,
            orb_speed: 2.0,
            orb_score: 10,

            ufo_interval_ms: 5_000,
            ufo_width: 40.0,
            ufo_height: 30.0,
            ufo_speed: 2.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    pub fn asteroid_dims(&self) -> Vec2 {
        Vec2::splat(self.asteroid_size)
    }

    pub fn orb_dims(&self) -> Vec2 {
        Vec2::splat(self.orb_size)
    }

    pub fn ufo_dims(&self) -> Vec2 {
        Vec2::new(self.ufo_width, self.ufo_height)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let extents = [
            ("player_width", self.player_width, PLAYFIELD_WIDTH),
            ("player_height", self.player_height, PLAYFIELD_HEIGHT),
            ("asteroid_size", self.asteroid_size, PLAYFIELD_WIDTH),
            ("orb_size", self.orb_size, PLAYFIELD_WIDTH),
            ("ufo_width", self.ufo_width, PLAYFIELD_WIDTH),
            ("ufo_height", self.ufo_height, PLAYFIELD_HEIGHT),
        ];
        for (field, value, limit) in extents {
            if !(value > 0.0 && value < limit) {
                return Err(invalid(field, format!("must be in (0, {limit})")));
            }
        }

        let speeds = [
            ("player_speed", self.player_speed),
            ("boost_multiplier", self.boost_multiplier),
            ("asteroid_min_speed", self.asteroid_min_speed),
            ("orb_speed", self.orb_speed),
            ("ufo_speed", self.ufo_speed),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, "must be finite and non-negative"));
            }
        }
        if !self.asteroid_max_speed.is_finite()
            || self.asteroid_max_speed <= self.asteroid_min_speed
        {
            return Err(invalid(
                "asteroid_max_speed",
                "must be greater than asteroid_min_speed",
            ));
        }

        let intervals = [
            ("asteroid_interval_ms", self.asteroid_interval_ms),
            ("orb_interval_ms", self.orb_interval_ms),
            ("ufo_interval_ms", self.ufo_interval_ms),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(invalid(field, "must be positive"));
            }
        }

        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if self.shield_active_ms == 0 {
            return Err(invalid("shield_active_ms", "must be positive"));
        }

        Ok(())
    }
}
