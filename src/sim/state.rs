//! Game session state
//!
//! One `GameState` is one run: player, entity lists, score and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Faller, Player, Rect, Star};
use super::shield::ShieldTimer;
use super::spawn::SpawnTimers;
use crate::consts::*;
use crate::tuning::Tuning;

/// Something the host should react to (sound, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Shield went up this tick
    ShieldRaised,
    /// Unshielded asteroid overlap cost a life
    AsteroidHit { lives_left: u8 },
    /// Orb picked up
    OrbCollected { score: u64 },
    /// Last life lost
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub player: Player,
    /// Recycled at the top when they leave the playfield
    pub asteroids: Vec<Faller>,
    /// Removed when collected or when they leave the playfield
    pub orbs: Vec<Faller>,
    /// Recycled like asteroids, never collide
    pub ufos: Vec<Faller>,
    pub stars: Vec<Star>,
    pub score: u64,
    /// Once set, only `reset` clears it
    pub game_over: bool,
    /// Simulated clock
    pub now_ms: u64,
    pub spawners: SpawnTimers,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// `tuning` must pass `Tuning::validate`; spawning panics on an empty
    /// asteroid speed range.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid tuning: {:?}", tuning);
        let mut state = Self {
            seed,
            player: Self::fresh_player(&tuning),
            spawners: SpawnTimers::from_tuning(&tuning),
            tuning,
            asteroids: Vec::new(),
            orbs: Vec::new(),
            ufos: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            score: 0,
            game_over: false,
            now_ms: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.create_stars();
        state
    }

    /// Start a fresh run with a new seed, keeping the tuning
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, tuning);
        log::info!("Session reset with seed {}", seed);
    }

    fn fresh_player(tuning: &Tuning) -> Player {
        let mut player = Player::spawn(
            tuning.player_size(),
            tuning.player_speed,
            tuning.starting_lives,
            Self::bounds(),
        );
        player.shield = ShieldTimer::new(tuning.shield_active_ms, tuning.shield_cooldown_ms);
        player
    }

    /// Playfield extent
    #[inline]
    pub fn bounds() -> Vec2 {
        Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Random left edge for something `width` wide, fully inside the playfield
    pub fn random_x(&mut self, width: f32) -> f32 {
        let span = (PLAYFIELD_WIDTH - width).max(0.0);
        self.rng.random::<f32>() * span
    }

    fn faller_above_top(&mut self, size: Vec2, speed: f32) -> Faller {
        let x = self.random_x(size.x);
        Faller {
            id: self.next_entity_id(),
            rect: Rect {
                pos: Vec2::new(x, -size.y),
                size,
            },
            speed,
        }
    }

    pub fn spawn_asteroid(&mut self) {
        let speed = self
            .rng
            .random_range(self.tuning.asteroid_min_speed..self.tuning.asteroid_max_speed);
        let asteroid = self.faller_above_top(self.tuning.asteroid_dims(), speed);
        self.asteroids.push(asteroid);
    }

    pub fn spawn_orb(&mut self) {
        let orb = self.faller_above_top(self.tuning.orb_dims(), self.tuning.orb_speed);
        self.orbs.push(orb);
    }

    pub fn spawn_ufo(&mut self) {
        let ufo = self.faller_above_top(self.tuning.ufo_dims(), self.tuning.ufo_speed);
        self.ufos.push(ufo);
    }

    fn create_stars(&mut self) {
        for _ in 0..STAR_COUNT {
            let star = Star {
                pos: Vec2::new(
                    self.rng.random::<f32>() * PLAYFIELD_WIDTH,
                    self.rng.random::<f32>() * PLAYFIELD_HEIGHT,
                ),
                size: self.rng.random::<f32>() * 2.0,
                speed: self.rng.random::<f32>() * 2.0 + 1.0,
            };
            self.stars.push(star);
        }
    }
}
