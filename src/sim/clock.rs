//! Frame clock
//!
//! Turns variable host frame times into fixed simulation steps. Each step
//! advances the simulated clock, runs the spawners, then runs the tick.

use super::spawn::run_spawners;
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};

#[derive(Debug, Clone)]
pub struct FrameClock {
    pub tick_ms: u32,
    pub max_substeps: u32,
    accumulator_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_MS, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(tick_ms: u32, max_substeps: u32) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            max_substeps,
            accumulator_ms: 0.0,
        }
    }

    /// Time carried over to the next frame
    pub fn pending_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Run as many fixed steps as `elapsed_ms` allows and collect their events
    pub fn advance(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        elapsed_ms: f64,
    ) -> Vec<GameEvent> {
        self.accumulator_ms += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let step = f64::from(self.tick_ms);
        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator_ms >= step && substeps < self.max_substeps {
            self.accumulator_ms -= step;
            state.now_ms += u64::from(self.tick_ms);
            run_spawners(state, self.tick_ms);
            events.extend(tick(state, input));
            substeps += 1;
        }

        if self.accumulator_ms >= step {
            log::debug!(
                "Frame clock behind by {:.1}ms, dropping whole ticks",
                self.accumulator_ms
            );
            self.accumulator_ms %= step;
        }

        events
    }
}
