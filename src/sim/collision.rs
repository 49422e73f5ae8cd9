//! Collision detection and response for axis-aligned boxes
//!
//! Paddles and the ball are both treated as rectangles. Edges are inclusive,
//! so touching counts as a hit.

use glam::Vec2;

use super::state::{Ball, Paddle, Rules, Side};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Inclusive overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl Ball {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }
}

impl Paddle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }
}

/// Check whether the ball touches a paddle
#[inline]
pub fn ball_paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bounds().overlaps(&paddle.bounds())
}

/// Whether the ball is touching or past the top or bottom edge
#[inline]
pub fn ball_hits_wall(ball: &Ball, surface_height: f32) -> bool {
    ball.pos.y <= 0.0 || ball.pos.y >= surface_height - ball.size
}

/// Where along the paddle the ball struck (0 = top edge, 1 = bottom edge)
///
/// Measured from the ball's top edge, so values slightly outside [0, 1]
/// are possible when the ball clips a corner.
#[inline]
pub fn hit_fraction(ball: &Ball, paddle: &Paddle) -> f32 {
    (ball.pos.y - paddle.pos.y) / paddle.height
}

/// Send the ball back from the paddle on `side`
///
/// Forces the horizontal direction away from the paddle, keeping its
/// magnitude, then derives the vertical speed from the hit position. A
/// center hit would otherwise leave the ball travelling flat forever, so
/// the vertical speed never drops below `min_return_speed_y`.
pub fn deflect_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Side, rules: &Rules) {
    ball.vel.x = match side {
        Side::Left => ball.vel.x.abs(),
        Side::Right => -ball.vel.x.abs(),
    };

    let angle = (hit_fraction(ball, paddle) - 0.5) * 2.0 * rules.max_bounce_angle;
    let speed_y = rules.ball_speed * angle.sin();

    ball.vel.y = if speed_y.abs() < rules.min_return_speed_y {
        if speed_y > 0.0 {
            rules.min_return_speed_y
        } else {
            -rules.min_return_speed_y
        }
    } else {
        speed_y
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle_at(x: f32, y: f32) -> Paddle {
        Paddle {
            pos: Vec2::new(x, y),
            width: 10.0,
            height: 60.0,
            speed: 5.0,
            score: 0,
        }
    }

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            size: 8.0,
            vel,
        }
    }

    #[test]
    fn test_aabb_overlap_is_inclusive() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 10.0), Vec2::splat(5.0));
        let apart = Aabb::new(Vec2::new(10.1, 0.0), Vec2::splat(5.0));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_ball_paddle_overlap() {
        let paddle = paddle_at(20.0, 100.0);
        assert!(ball_paddle_overlap(
            &ball_at(25.0, 120.0, Vec2::ZERO),
            &paddle
        ));
        assert!(!ball_paddle_overlap(
            &ball_at(50.0, 120.0, Vec2::ZERO),
            &paddle
        ));
        assert!(!ball_paddle_overlap(
            &ball_at(25.0, 170.0, Vec2::ZERO),
            &paddle
        ));
    }

    #[test]
    fn test_wall_detection() {
        assert!(ball_hits_wall(&ball_at(100.0, 0.0, Vec2::ZERO), 400.0));
        assert!(ball_hits_wall(&ball_at(100.0, 392.0, Vec2::ZERO), 400.0));
        assert!(!ball_hits_wall(&ball_at(100.0, 200.0, Vec2::ZERO), 400.0));
    }

    #[test]
    fn test_top_corner_hit_on_left_paddle() {
        let rules = Rules::default();
        let paddle = paddle_at(20.0, 100.0);
        let mut ball = ball_at(28.0, 100.0, Vec2::new(-4.0, 2.0));

        deflect_off_paddle(&mut ball, &paddle, Side::Left, &rules);

        assert_eq!(ball.vel.x, 4.0);
        // -30 degrees: 4 * sin(-pi/6) = -2
        assert!((ball.vel.y - (-2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_bottom_hit_on_right_paddle() {
        let rules = Rules::default();
        let paddle = paddle_at(770.0, 100.0);
        let mut ball = ball_at(765.0, 160.0, Vec2::new(4.0, -1.0));

        deflect_off_paddle(&mut ball, &paddle, Side::Right, &rules);

        assert_eq!(ball.vel.x, -4.0);
        assert!((ball.vel.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_center_hit_keeps_minimum_vertical_speed() {
        let rules = Rules::default();
        let paddle = paddle_at(20.0, 100.0);

        // Exactly centered: sin(0) = 0 falls back to -1
        let mut ball = ball_at(28.0, 130.0, Vec2::new(-4.0, 0.0));
        deflect_off_paddle(&mut ball, &paddle, Side::Left, &rules);
        assert_eq!(ball.vel.y, -1.0);

        // Slightly below center keeps its sign
        let mut ball = ball_at(28.0, 132.0, Vec2::new(-4.0, 0.0));
        deflect_off_paddle(&mut ball, &paddle, Side::Left, &rules);
        assert_eq!(ball.vel.y, 1.0);
    }

    #[test]
    fn test_deflect_keeps_horizontal_magnitude() {
        let rules = Rules::default();
        let paddle = paddle_at(20.0, 100.0);
        let mut ball = ball_at(28.0, 110.0, Vec2::new(4.0, 0.0));

        // Already moving away: direction unchanged
        deflect_off_paddle(&mut ball, &paddle, Side::Left, &rules);
        assert_eq!(ball.vel.x, 4.0);
    }
}
