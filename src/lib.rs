//! CPU Pong - classic Pong against a computer opponent
//!
//! Core modules:
//! - `sim`: Simulation step (paddles, ball, collisions, scoring, CPU controller)
//! - `renderer`: Scene construction and the WebGPU pipeline
//! - `game`: Session driver wiring simulation, input, renderer and HUD
//! - `input`: Keyboard state sampled once per frame
//! - `hud`: Score and status display sinks
//! - `platform`: Browser/native adapters for the HUD sinks
//! - `settings`: Player preferences (key bindings, auto-pause)

pub mod game;
pub mod hud;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Drawing surface size in logical pixels
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Display refresh rate assumed by the native runner
    pub const FRAME_RATE: u32 = 60;

    /// Distance between a paddle and its side of the surface
    pub const PADDLE_INSET: f32 = 20.0;
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 60.0;
    /// Paddle speed (pixels/frame)
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball diameter
    pub const BALL_SIZE: f32 = 8.0;
    /// Ball speed (pixels/frame), also the horizontal serve speed
    pub const BALL_SPEED: f32 = 4.0;

    /// CPU skill (0 = easy, 1 = perfect tracking)
    pub const CPU_DIFFICULTY: f32 = 0.8;
    /// Frames of vertical travel the CPU extrapolates ahead
    pub const CPU_PREDICTION_FACTOR: f32 = 10.0;
    /// Full width of the CPU aim noise at difficulty 0
    pub const CPU_NOISE_SPAN: f32 = 50.0;
    /// CPU holds still while its center is this close to the target
    pub const CPU_DEAD_ZONE: f32 = 5.0;

    /// Smallest vertical speed after a paddle hit
    pub const MIN_RETURN_SPEED_Y: f32 = 1.0;
}
