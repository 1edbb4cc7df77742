//! Render pass for an external canvas
//!
//! The simulation never touches a graphics API. After each tick the driver
//! hands a [`Canvas`] to [`render_frame`], which draws the walls and the
//! marble shifted by the camera position.

use glam::DVec2;

use crate::sim::SimulationState;

/// RGBA, each channel in [0, 1]
pub type Color = [f32; 4];

const fn hex(rgb: u32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, hex};

    pub const BACKGROUND: Color = hex(0xeeeeee);
    pub const WALL: Color = hex(0xdddddd);
    pub const MARBLE_INSIDE: Color = hex(0xcccccc);
    pub const MARBLE_OUTLINE: Color = hex(0xbbbbbb);
}

/// Drawing primitives supplied by the platform layer
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    /// Axis-aligned rectangle with its origin corner at `(x, y)`
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Color,
    },
}

/// Canvas that records draw calls instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

/// Draw one frame: background, walls, then the marble (outline under inside)
pub fn render_frame(state: &SimulationState, canvas: &mut impl Canvas) {
    let offset = -state.camera.pos;

    canvas.clear(colors::BACKGROUND);

    for wall in state.stage.walls() {
        canvas.fill_rect(
            wall.origin_x + offset.x,
            wall.origin_y + offset.y,
            wall.size_x,
            wall.size_y,
            colors::WALL,
        );
    }

    let marble = &state.marble;
    let center = marble.pos + offset;
    canvas.fill_circle(center, marble.radius, colors::MARBLE_OUTLINE);
    canvas.fill_circle(center, marble.inner_radius(), colors::MARBLE_INSIDE);
}
