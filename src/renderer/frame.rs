//! Frame building: game state to draw commands

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::{Faller, GameState};

/// Palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    /// Player with shield up
    Blue,
    /// Player without shield
    Cyan,
    Red,
    Yellow,
    Purple,
}

impl Color {
    /// CSS color name
    pub fn css(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Cyan => "cyan",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size_px: u32,
        color: Color,
    },
}

const HUD_FONT_PX: u32 = 20;
const GAME_OVER_FONT_PX: u32 = 30;

fn rect_of(faller: &Faller, color: Color) -> DrawCommand {
    DrawCommand::Rect {
        x: faller.rect.pos.x,
        y: faller.rect.pos.y,
        w: faller.rect.size.x,
        h: faller.rect.size.y,
        color,
    }
}

/// Build the draw list for the current state
///
/// Back to front: stars, player, asteroids, orbs, UFOs, HUD, game-over banner.
pub fn build_frame(state: &GameState) -> Vec<DrawCommand> {
    let entity_count =
        state.stars.len() + state.asteroids.len() + state.orbs.len() + state.ufos.len();
    let mut commands = Vec::with_capacity(entity_count + 4);

    commands.push(DrawCommand::Clear);

    commands.extend(state.stars.iter().map(|star| DrawCommand::Rect {
        x: star.pos.x,
        y: star.pos.y,
        w: star.size,
        h: star.size,
        color: Color::White,
    }));

    let player = &state.player;
    commands.push(DrawCommand::Rect {
        x: player.rect.pos.x,
        y: player.rect.pos.y,
        w: player.rect.size.x,
        h: player.rect.size.y,
        color: if player.shield.is_active() {
            Color::Blue
        } else {
            Color::Cyan
        },
    });

    commands.extend(state.asteroids.iter().map(|a| rect_of(a, Color::Red)));
    commands.extend(state.orbs.iter().map(|o| rect_of(o, Color::Yellow)));
    commands.extend(state.ufos.iter().map(|u| rect_of(u, Color::Purple)));

    commands.push(DrawCommand::Text {
        text: format!("Score: {} | Lives: {}", state.score, player.lives),
        x: 20.0,
        y: 30.0,
        size_px: HUD_FONT_PX,
        color: Color::White,
    });

    if state.game_over {
        commands.push(DrawCommand::Text {
            text: "Game Over!".to_string(),
            x: PLAYFIELD_WIDTH / 2.0 - 80.0,
            y: PLAYFIELD_HEIGHT / 2.0,
            size_px: GAME_OVER_FONT_PX,
            color: Color::Red,
        });
    }

    commands
}
