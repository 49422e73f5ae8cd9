//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per display frame, fixed per-frame speeds
//! - Randomness only through the caller's RNG
//! - No rendering or platform dependencies

pub mod collision;
pub mod cpu;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ball_hits_wall, ball_paddle_overlap, deflect_off_paddle, hit_fraction};
pub use state::{Ball, GameEvent, GameState, Paddle, Rules, RunState, Side};
pub use tick::{FrameInput, advance, serve, toggle};
