//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; it holds no
//! references to the presentation surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Run state of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Waiting for the first toggle
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
}

/// Which side of the surface a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human player
    Left,
    /// CPU opponent
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "player",
            Side::Right => "cpu",
        }
    }
}

/// Fixed rules of the game
///
/// Not exposed to players. Tests override `difficulty` to remove CPU noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_inset: f32,
    pub ball_size: f32,
    pub ball_speed: f32,
    /// CPU skill in [0, 1]
    pub difficulty: f32,
    pub prediction_factor: f32,
    pub noise_span: f32,
    pub dead_zone: f32,
    pub min_return_speed_y: f32,
    /// Largest deflection off a paddle edge (radians)
    pub max_bounce_angle: f32,
    /// Largest serve angle either side of horizontal (radians)
    pub max_serve_angle: f32,
}

impl Default for Rules {
    fn default() -> Self {
        use std::f32::consts::FRAC_PI_4;
        use std::f32::consts::FRAC_PI_6;
        Self {
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_inset: PADDLE_INSET,
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            difficulty: CPU_DIFFICULTY,
            prediction_factor: CPU_PREDICTION_FACTOR,
            noise_span: CPU_NOISE_SPAN,
            dead_zone: CPU_DEAD_ZONE,
            min_return_speed_y: MIN_RETURN_SPEED_Y,
            max_bounce_angle: FRAC_PI_6,
            max_serve_angle: FRAC_PI_4,
        }
    }
}

impl Rules {
    /// Same rules with a different CPU difficulty (clamped to [0, 1])
    pub fn with_difficulty(mut self, difficulty: f32) -> Self {
        self.difficulty = difficulty.clamp(0.0, 1.0);
        self
    }
}

/// A paddle (top-left origin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Movement speed (pixels/frame)
    pub speed: f32,
    pub score: u32,
}

impl Paddle {
    /// Create a paddle vertically centered on its side of the surface
    pub fn new(side: Side, surface: Vec2, rules: &Rules) -> Self {
        let x = match side {
            Side::Left => rules.paddle_inset,
            Side::Right => surface.x - rules.paddle_inset - rules.paddle_width,
        };
        Self {
            pos: Vec2::new(x, surface.y / 2.0 - rules.paddle_height / 2.0),
            width: rules.paddle_width,
            height: rules.paddle_height,
            speed: rules.paddle_speed,
            score: 0,
        }
    }

    /// Vertical center
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// Largest legal `y` on a surface of the given height
    pub fn max_y(&self, surface_height: f32) -> f32 {
        (surface_height - self.height).max(0.0)
    }

    /// Move vertically by `dy`, staying inside the surface
    pub fn move_by(&mut self, dy: f32, surface_height: f32) {
        self.pos.y = (self.pos.y + dy).clamp(0.0, self.max_y(surface_height));
    }
}

/// The ball (top-left of its bounding box)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Velocity (pixels/frame)
    pub vel: Vec2,
}

impl Ball {
    pub fn new(size: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            vel: Vec2::ZERO,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Something that happened during a frame, for the session driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom edge
    WallBounce,
    /// Ball was returned by a paddle
    PaddleHit { side: Side },
    /// A side scored and the ball was served again
    Goal { scorer: Side, score: u32 },
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Drawing surface size
    pub surface: Vec2,
    pub rules: Rules,
    pub run: RunState,
    /// Human paddle
    pub left: Paddle,
    /// CPU paddle
    pub right: Paddle,
    pub ball: Ball,
}

impl GameState {
    /// Create a fresh match on the default surface; the ball sits at the
    /// center, not moving, until [`super::serve`] is called
    pub fn new() -> Self {
        Self::with_rules(Vec2::new(SURFACE_WIDTH, SURFACE_HEIGHT), Rules::default())
    }

    pub fn with_rules(surface: Vec2, rules: Rules) -> Self {
        let mut ball = Ball::new(rules.ball_size);
        ball.pos = surface / 2.0;
        Self {
            surface,
            rules,
            run: RunState::Idle,
            left: Paddle::new(Side::Left, surface, &rules),
            right: Paddle::new(Side::Right, surface, &rules),
            ball,
        }
    }

    /// True when `advance` will move things
    pub fn is_active(&self) -> bool {
        self.run == RunState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.run == RunState::Paused
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        self.paddle(side).score
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
