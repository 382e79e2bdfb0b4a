//! Shield timer
//!
//! Three phases, ready -> active -> cooldown -> ready, derived from the
//! simulated clock. Each phase stores the timestamp it began at, so nothing
//! can fire late once the session is rebuilt.

/// Current shield phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShieldPhase {
    #[default]
    Ready,
    /// Raised at `since_ms`
    Active { since_ms: u64 },
    /// Lowered at `since_ms`, reactivation blocked
    Cooldown { since_ms: u64 },
}

/// Shield state machine evaluated once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldTimer {
    pub phase: ShieldPhase,
    pub active_ms: u64,
    pub cooldown_ms: u64,
}

impl Default for ShieldTimer {
    fn default() -> Self {
        Self::new(3_000, 10_000)
    }
}

impl ShieldTimer {
    pub fn new(active_ms: u64, cooldown_ms: u64) -> Self {
        Self {
            phase: ShieldPhase::Ready,
            active_ms,
            cooldown_ms,
        }
    }

    /// Advance phases that have expired by `now_ms`
    ///
    /// A long gap between calls can pass through active and cooldown in one go;
    /// each transition is timestamped at its exact deadline.
    pub fn update(&mut self, now_ms: u64) {
        if let ShieldPhase::Active { since_ms } = self.phase {
            let ends_at = since_ms.saturating_add(self.active_ms);
            if now_ms >= ends_at {
                log::debug!("Shield down at {}ms, cooling down", ends_at);
                self.phase = ShieldPhase::Cooldown { since_ms: ends_at };
            }
        }
        if let ShieldPhase::Cooldown { since_ms } = self.phase {
            let ready_at = since_ms.saturating_add(self.cooldown_ms);
            if now_ms >= ready_at {
                log::debug!("Shield ready at {}ms", ready_at);
                self.phase = ShieldPhase::Ready;
            }
        }
    }

    /// Raise the shield if ready. Returns true if it was raised.
    pub fn try_activate(&mut self, now_ms: u64) -> bool {
        self.update(now_ms);
        if self.phase == ShieldPhase::Ready {
            self.phase = ShieldPhase::Active { since_ms: now_ms };
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, ShieldPhase::Active { .. })
    }

    pub fn on_cooldown(&self) -> bool {
        matches!(self.phase, ShieldPhase::Cooldown { .. })
    }
}
