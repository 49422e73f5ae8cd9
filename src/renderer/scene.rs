//! Scene construction
//!
//! Turns a [`GameState`] into a triangle list in surface coordinates. Pure,
//! so the drawing rules can be checked without a GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Paddle};

/// Divider stroke width
pub const DIVIDER_WIDTH: f32 = 2.0;
/// Divider dash pattern (on, off)
pub const DIVIDER_DASH: (f32, f32) = (5.0, 15.0);
/// Segments used to approximate the ball
pub const BALL_SEGMENTS: u32 = 24;
/// Pixel size of one glyph cell in the pause banner (7 rows ~ 42px text)
pub const BANNER_SCALE: f32 = 6.0;
pub const PAUSED_TEXT: &str = "PAUSED";

fn paddle(paddle: &Paddle, color: [f32; 4]) -> Vec<Vertex> {
    shapes::rect(paddle.pos, Vec2::new(paddle.width, paddle.height), color)
}

/// Build the full frame, back to front
pub fn build(state: &GameState) -> Vec<Vertex> {
    let surface = state.surface;
    let mut vertices = Vec::with_capacity(512);

    vertices.extend(shapes::rect(Vec2::ZERO, surface, colors::BACKGROUND));
    vertices.extend(shapes::dashed_vline(
        surface.x / 2.0,
        0.0,
        surface.y,
        DIVIDER_WIDTH,
        DIVIDER_DASH.0,
        DIVIDER_DASH.1,
        colors::DIVIDER,
    ));

    vertices.extend(paddle(&state.left, colors::PLAYER_PADDLE));
    vertices.extend(paddle(&state.right, colors::CPU_PADDLE));

    vertices.extend(shapes::circle(
        state.ball.center(),
        state.ball.size / 2.0,
        colors::BALL,
        BALL_SEGMENTS,
    ));

    if state.is_paused() {
        vertices.extend(shapes::rect(Vec2::ZERO, surface, colors::PAUSE_OVERLAY));
        vertices.extend(shapes::text(
            PAUSED_TEXT,
            surface / 2.0,
            BANNER_SCALE,
            colors::PAUSE_TEXT,
        ));
    }

    vertices
}
