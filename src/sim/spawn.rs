//! Fixed-interval spawners
//!
//! Each spawner accumulates simulated time independently of the tick and
//! fires once per elapsed period. They do not look at `game_over`: entities
//! keep piling up (harmlessly) after the run ends.

use super::state::GameState;
use crate::tuning::Tuning;

/// Repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawner {
    pub period_ms: u32,
    elapsed_ms: u32,
}

impl Spawner {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Advance by `dt_ms`, returning how many times the period elapsed
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        self.elapsed_ms += dt_ms;
        let fires = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;
        fires
    }
}

/// The three gameplay spawners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTimers {
    pub asteroid: Spawner,
    pub orb: Spawner,
    pub ufo: Spawner,
}

impl SpawnTimers {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            asteroid: Spawner::new(tuning.asteroid_interval_ms),
            orb: Spawner::new(tuning.orb_interval_ms),
            ufo: Spawner::new(tuning.ufo_interval_ms),
        }
    }
}

/// Advance all spawners by `dt_ms` and append whatever they produce
pub fn run_spawners(state: &mut GameState, dt_ms: u32) {
    for _ in 0..state.spawners.asteroid.advance(dt_ms) {
        state.spawn_asteroid();
    }
    for _ in 0..state.spawners.orb.advance(dt_ms) {
        state.spawn_orb();
    }
    for _ in 0..state.spawners.ufo.advance(dt_ms) {
        state.spawn_ufo();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawner_fires_on_period() {
        let mut s = Spawner::new(1_000);
        let mut total = 0;
        for _ in 0..49 {
            total += s.advance(20);
        }
        assert_eq!(total, 0);
        assert_eq!(s.advance(20), 1);
        assert_eq!(s.advance(2_500), 2);
        // 500ms carried over
        assert_eq!(s.advance(499), 0);
        assert_eq!(s.advance(1), 1);
    }

    #[test]
    fn test_run_spawners_cadence() {
        let mut state = GameState::new(5);
        for _ in 0..(15_000 / 20) {
            run_spawners(&mut state, 20);
        }
        assert_eq!(state.asteroids.len(), 15);
        assert_eq!(state.orbs.len(), 5);
        assert_eq!(state.ufos.len(), 3);
    }

    #[test]
    fn test_spawning_continues_after_game_over() {
        let mut state = GameState::new(5);
        state.game_over = true;
        run_spawners(&mut state, 5_000);
        assert_eq!(state.asteroids.len(), 5);
        assert_eq!(state.orbs.len(), 1);
        assert_eq!(state.ufos.len(), 1);
    }
}
