//! Held-key tracking
//!
//! Key events arrive whenever the browser delivers them; the simulation reads
//! a `TickInput` snapshot once per frame. Only the held state matters, so a
//! press and release that both land between two snapshots are never seen.

use std::collections::HashSet;

use crate::sim::TickInput;

/// DOM `KeyboardEvent.key` names for each action
pub mod keys {
    pub const LEFT: &str = "ArrowLeft";
    pub const RIGHT: &str = "ArrowRight";
    pub const UP: &str = "ArrowUp";
    pub const DOWN: &str = "ArrowDown";
    pub const BOOST: &str = "Shift";
    pub const SHIELD: &str = " ";

    pub const ALL: [&str; 6] = [LEFT, RIGHT, UP, DOWN, BOOST, SHIELD];
}

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        if !self.held.contains(key) {
            self.held.insert(key.to_owned());
        }
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Forget everything (focus lost: key-up events will not arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// True for keys the game reacts to (their browser default is suppressed)
    pub fn is_bound(key: &str) -> bool {
        keys::ALL.contains(&key)
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_held(keys::LEFT),
            right: self.is_held(keys::RIGHT),
            up: self.is_held(keys::UP),
            down: self.is_held(keys::DOWN),
            boost: self.is_held(keys::BOOST),
            shield: self.is_held(keys::SHIELD),
        }
    }
}
