//! Entity records and rectangle geometry
//!
//! Everything in the playfield is an axis-aligned rectangle with its origin
//! at the top-left corner; y grows downward.

use glam::Vec2;

use super::shield::ShieldTimer;

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// AABB overlap test. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.pos, self.max());
        let (b_min, b_max) = (other.pos, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Displacement per tick before boost
    pub speed: f32,
    pub lives: u8,
    pub shield: ShieldTimer,
}

impl Player {
    /// Spawn centered horizontally, 60 units above the bottom edge
    pub fn spawn(size: Vec2, speed: f32, lives: u8, bounds: Vec2) -> Self {
        Self {
            rect: Rect {
                pos: Vec2::new(bounds.x / 2.0 - size.x / 2.0, bounds.y - 60.0),
                size,
            },
            speed,
            lives,
            shield: ShieldTimer::default(),
        }
    }

    /// Move by `delta`, clamped so the ship stays fully inside `bounds`
    pub fn move_clamped(&mut self, delta: Vec2, bounds: Vec2) {
        let max = (bounds - self.rect.size).max(Vec2::ZERO);
        self.rect.pos = (self.rect.pos + delta).clamp(Vec2::ZERO, max);
    }
}

/// A falling body: asteroid, orb or UFO
#[derive(Debug, Clone, PartialEq)]
pub struct Faller {
    pub id: u32,
    pub rect: Rect,
    /// Downward displacement per tick
    pub speed: f32,
}

impl Faller {
    pub fn fall(&mut self) {
        self.rect.pos.y += self.speed;
    }

    /// True once the top edge has passed below the playfield
    pub fn exited(&self, height: f32) -> bool {
        self.rect.pos.y > height
    }

    /// Put back above the top edge at a new horizontal offset
    pub fn recycle(&mut self, x: f32) {
        self.rect.pos = Vec2::new(x, -self.rect.size.y);
    }
}

/// Background parallax star (cosmetic)
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}
