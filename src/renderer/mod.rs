//! 2D rendering
//!
//! A frame is built as a list of draw commands from the game state, then
//! replayed onto anything implementing `Surface` (the canvas on the web).

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{Color, DrawCommand, build_frame};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// The three primitives the game draws with
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    /// Draw `text` with its baseline starting at (x, y)
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: u32, color: Color);
}

/// Replay a frame onto a surface
pub fn present<S: Surface + ?Sized>(commands: &[DrawCommand], surface: &mut S) {
    for command in commands {
        match command {
            DrawCommand::Clear => surface.clear(),
            DrawCommand::Rect { x, y, w, h, color } => surface.fill_rect(*x, *y, *w, *h, *color),
            DrawCommand::Text {
                text,
                x,
                y,
                size_px,
                color,
            } => surface.fill_text(text, *x, *y, *size_px, *color),
        }
    }
}
