//! Reactive CPU opponent
//!
//! Stateless: each frame the target is rebuilt from the ball's current
//! position and velocity. The CPU defends the right side.

use rand::Rng;

use super::state::{Ball, Paddle, Rules};

/// Where the CPU wants its paddle center to be, before aim noise
///
/// Linear extrapolation of the ball's vertical travel.
#[inline]
pub fn predict_target(ball: &Ball, rules: &Rules) -> f32 {
    ball.center().y + ball.vel.y * rules.prediction_factor
}

/// Zero-mean aim error; vanishes at difficulty 1
pub fn aim_noise<R: Rng>(rng: &mut R, rules: &Rules) -> f32 {
    (rng.random::<f32>() - 0.5) * (1.0 - rules.difficulty) * rules.noise_span
}

/// Vertical step the paddle takes toward `target` this frame
///
/// Zero inside the dead zone around the paddle center.
pub fn step_toward(paddle: &Paddle, target: f32, rules: &Rules) -> f32 {
    let center = paddle.center_y();
    let step = paddle.speed * rules.difficulty;
    if target > center + rules.dead_zone {
        step
    } else if target < center - rules.dead_zone {
        -step
    } else {
        0.0
    }
}

/// Move the CPU paddle for one frame
pub fn update_cpu<R: Rng>(
    paddle: &mut Paddle,
    ball: &Ball,
    rules: &Rules,
    surface_height: f32,
    rng: &mut R,
) {
    // Only track a ball that is heading our way
    if ball.vel.x <= 0.0 {
        return;
    }

    let target = predict_target(ball, rules) + aim_noise(rng, rules);
    let dy = step_toward(paddle, target, rules);
    if dy != 0.0 {
        paddle.move_by(dy, surface_height);
    }
}
