//! Per-frame simulation step
//!
//! Order within a frame: paddles (human, then CPU), ball motion and wall
//! bounce, paddle collisions, scoring.

use rand::Rng;

use super::collision::{ball_hits_wall, ball_paddle_overlap, deflect_off_paddle};
use super::cpu::update_cpu;
use super::state::{GameEvent, GameState, RunState, Side};

/// Held controls for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Human paddle up
    pub up: bool,
    /// Human paddle down
    pub down: bool,
}

/// Start, pause or resume the match
///
/// Returns the new run state. There is no way back to `Idle`.
pub fn toggle(state: &mut GameState) -> RunState {
    state.run = match state.run {
        RunState::Idle | RunState::Paused => RunState::Running,
        RunState::Running => RunState::Paused,
    };
    state.run
}

/// Put the ball back at the surface center and launch it in a random
/// direction within `max_serve_angle` of horizontal
pub fn serve<R: Rng>(state: &mut GameState, rng: &mut R) {
    let rules = state.rules;
    let ball = &mut state.ball;
    ball.pos = state.surface / 2.0;

    let angle = (rng.random::<f32>() - 0.5) * 2.0 * rules.max_serve_angle;
    let dir_x = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let dir_y = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

    ball.vel.x = rules.ball_speed * dir_x;
    ball.vel.y = rules.ball_speed * angle.sin() * dir_y;

    log::debug!("Serve: vel=({:.2}, {:.2})", ball.vel.x, ball.vel.y);
}

/// Advance the game by one frame
///
/// No-op unless the match is running. Returns what happened so the caller
/// can update score displays.
pub fn advance<R: Rng>(state: &mut GameState, input: &FrameInput, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_active() {
        return events;
    }

    update_paddles(state, input, rng);
    update_ball(state, &mut events);
    check_collisions(state, &mut events);
    check_scoring(state, rng, &mut events);

    events
}

fn update_paddles<R: Rng>(state: &mut GameState, input: &FrameInput, rng: &mut R) {
    let height = state.surface.y;

    let speed = state.left.speed;
    if input.up {
        state.left.move_by(-speed, height);
    }
    if input.down {
        state.left.move_by(speed, height);
    }

    update_cpu(&mut state.right, &state.ball, &state.rules, height, rng);
}

fn update_ball(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // Overshoot is left alone; the flipped velocity brings it back
    if ball_hits_wall(ball, state.surface.y) {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::WallBounce);
    }
}

fn check_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    // Both sides are checked every frame
    for side in [Side::Left, Side::Right] {
        let paddle = state.paddle(side);
        if ball_paddle_overlap(&state.ball, paddle) {
            let paddle = paddle.clone();
            deflect_off_paddle(&mut state.ball, &paddle, side, &state.rules);
            events.push(GameEvent::PaddleHit { side });
        }
    }
}

fn check_scoring<R: Rng>(state: &mut GameState, rng: &mut R, events: &mut Vec<GameEvent>) {
    if state.ball.pos.x <= 0.0 {
        goal(state, Side::Right, rng, events);
    }

    if state.ball.pos.x >= state.surface.x {
        goal(state, Side::Left, rng, events);
    }
}

fn goal<R: Rng>(state: &mut GameState, scorer: Side, rng: &mut R, events: &mut Vec<GameEvent>) {
    let paddle = state.paddle_mut(scorer);
    paddle.score += 1;
    events.push(GameEvent::Goal {
        scorer,
        score: paddle.score,
    });
    serve(state, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Rules;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state(rules: Rules) -> GameState {
        let mut state = GameState::with_rules(Vec2::new(800.0, 400.0), rules);
        state.run = RunState::Running;
        state
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn test_toggle_cycle_preserves_state() {
        let mut state = GameState::new();
        let mut rng = rng();
        serve(&mut state, &mut rng);
        assert_eq!(state.run, RunState::Idle);

        assert_eq!(toggle(&mut state), RunState::Running);
        for _ in 0..30 {
            advance(&mut state, &FrameInput::default(), &mut rng);
        }

        assert_eq!(toggle(&mut state), RunState::Paused);
        let snapshot = state.clone();
        for _ in 0..30 {
            advance(&mut state, &FrameInput { up: true, down: false }, &mut rng);
        }
        assert_eq!(toggle(&mut state), RunState::Running);

        let mut expected = snapshot;
        expected.run = RunState::Running;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_idle_advance_is_noop() {
        let mut state = GameState::new();
        let mut rng = rng();
        serve(&mut state, &mut rng);
        let before = state.clone();

        let events = advance(&mut state, &FrameInput { up: false, down: true }, &mut rng);

        assert!(events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_ball_leaving_left_scores_for_cpu() {
        let mut state = running_state(Rules::default());
        let mut rng = rng();
        state.ball.pos = Vec2::new(0.0, 200.0);
        state.ball.vel = Vec2::new(-4.0, 0.0);

        let events = advance(&mut state, &FrameInput::default(), &mut rng);

        assert_eq!(state.right.score, 1);
        assert_eq!(state.left.score, 0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 200.0));
        assert_eq!(state.ball.vel.x.abs(), 4.0);
        assert!(events.contains(&GameEvent::Goal {
            scorer: Side::Right,
            score: 1
        }));
    }

    #[test]
    fn test_ball_leaving_right_scores_for_player() {
        let mut state = running_state(Rules::default());
        let mut rng = rng();
        state.ball.pos = Vec2::new(798.0, 20.0);
        state.ball.vel = Vec2::new(4.0, 0.5);

        advance(&mut state, &FrameInput::default(), &mut rng);

        assert_eq!(state.left.score, 1);
        assert_eq!(state.right.score, 0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn test_serve_angle_within_limits() {
        let mut state = GameState::new();
        let mut rng = rng();
        let max_y = 4.0 * std::f32::consts::FRAC_PI_4.sin() + 1e-5;
        for _ in 0..500 {
            serve(&mut state, &mut rng);
            assert_eq!(state.ball.vel.x.abs(), 4.0);
            assert!(state.ball.vel.y.abs() <= max_y);
        }
    }

    #[test]
    fn test_serve_picks_both_directions() {
        let mut state = GameState::new();
        let mut rng = rng();
        let mut left = 0;
        let mut right = 0;
        for _ in 0..200 {
            serve(&mut state, &mut rng);
            if state.ball.vel.x > 0.0 {
                right += 1;
            } else {
                left += 1;
            }
        }
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn test_cpu_tracks_ball_during_advance() {
        let mut state = running_state(Rules::default().with_difficulty(1.0));
        let mut rng = rng();
        state.right.pos.y = 100.0;
        state.ball.pos = Vec2::new(400.0, 90.0);
        state.ball.vel = Vec2::new(4.0, 0.0);

        advance(&mut state, &FrameInput::default(), &mut rng);

        assert_eq!(state.right.pos.y, 95.0);
    }

    #[test]
    fn test_human_paddle_moves_and_clamps() {
        let mut state = running_state(Rules::default());
        let mut rng = rng();
        state.ball.pos = Vec2::new(400.0, 200.0);
        state.ball.vel = Vec2::new(-1.0, 0.5);
        state.left.pos.y = 3.0;

        advance(&mut state, &FrameInput { up: true, down: false }, &mut rng);
        assert_eq!(state.left.pos.y, 0.0);

        advance(&mut state, &FrameInput { up: false, down: true }, &mut rng);
        assert_eq!(state.left.pos.y, 5.0);

        // Both held cancel out
        advance(&mut state, &FrameInput { up: true, down: true }, &mut rng);
        assert_eq!(state.left.pos.y, 5.0);
    }

    #[test]
    fn test_left_paddle_top_corner_return() {
        let mut state = running_state(Rules::default());
        let mut rng = rng();
        state.left.pos.y = 100.0;
        // Lands on (28, 100) after moving
        state.ball.pos = Vec2::new(32.0, 100.0);
        state.ball.vel = Vec2::new(-4.0, 0.0);

        let events = advance(&mut state, &FrameInput::default(), &mut rng);

        assert!(events.contains(&GameEvent::PaddleHit { side: Side::Left }));
        assert!(state.ball.vel.x > 0.0);
        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.vel.y - (-2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_right_paddle_return() {
        let mut state = running_state(Rules::default().with_difficulty(1.0));
        let mut rng = rng();
        state.right.pos.y = 100.0;
        state.ball.pos = Vec2::new(762.0, 150.0);
        state.ball.vel = Vec2::new(4.0, 0.0);

        let events = advance(&mut state, &FrameInput::default(), &mut rng);

        // CPU steps down first, then the ball lands at 3/4 of the paddle
        assert_eq!(state.right.pos.y, 105.0);
        assert_eq!(events, vec![GameEvent::PaddleHit { side: Side::Right }]);
        assert_eq!(state.ball.vel.x, -4.0);
        let expected_y = 4.0 * (std::f32::consts::PI / 12.0).sin();
        assert!((state.ball.vel.y - expected_y).abs() < 1e-4);
        assert_eq!(state.right.score, 0);
    }

    #[test]
    fn test_wall_bounce_flips_vertical_speed() {
        let mut state = running_state(Rules::default());
        let mut rng = rng();
        state.ball.pos = Vec2::new(400.0, 2.0);
        state.ball.vel = Vec2::new(-4.0, -3.0);

        let events = advance(&mut state, &FrameInput::default(), &mut rng);

        assert!(events.contains(&GameEvent::WallBounce));
        assert_eq!(state.ball.vel.y, 3.0);
        // Overshoot is not corrected
        assert_eq!(state.ball.pos.y, -1.0);
    }

    fn arb_running_state() -> impl Strategy<Value = GameState> {
        (
            -10.0f32..800.0,
            -10.0f32..400.0,
            prop_oneof![-4.0f32..-0.5, 0.5f32..4.0],
            -4.0f32..4.0,
            0.0f32..340.0,
            0.0f32..340.0,
            0.0f32..=1.0,
        )
            .prop_map(|(bx, by, vx, vy, left_y, right_y, difficulty)| {
                let mut state = running_state(Rules::default().with_difficulty(difficulty));
                state.ball.pos = Vec2::new(bx, by);
                state.ball.vel = Vec2::new(vx, vy);
                state.left.pos.y = left_y;
                state.right.pos.y = right_y;
                state
            })
    }

    /// Ball that overlaps `side`'s paddle once it has moved this frame
    ///
    /// The vertical offset stays clear of the CPU paddle's one step.
    fn arb_paddle_hit() -> impl Strategy<Value = (GameState, Side)> {
        (
            prop_oneof![Just(Side::Left), Just(Side::Right)],
            0.5f32..=17.5,
            -2.5f32..=54.5,
            0.5f32..4.0,
            -4.0f32..4.0,
            20.0f32..320.0,
            0.0f32..=1.0,
        )
            .prop_map(|(side, dx, dy, speed, vy, paddle_y, difficulty)| {
                let mut state = running_state(Rules::default().with_difficulty(difficulty));
                state.paddle_mut(side).pos.y = paddle_y;
                let paddle_x = state.paddle(side).pos.x;
                let ball_size = state.ball.size;
                let vx = match side {
                    Side::Left => -speed,
                    Side::Right => speed,
                };
                let landing = Vec2::new(paddle_x - ball_size + dx, paddle_y + dy);
                state.ball.vel = Vec2::new(vx, vy);
                state.ball.pos = landing - state.ball.vel;
                (state, side)
            })
    }

    /// Ball in mid-court that reaches the top or bottom wall this frame
    fn arb_wall_approach() -> impl Strategy<Value = GameState> {
        (
            any::<bool>(),
            0.0f32..0.9,
            0.5f32..4.0,
            prop_oneof![-4.0f32..-0.5, 0.5f32..4.0],
            200.0f32..600.0,
        )
            .prop_map(|(top, depth, speed, vx, x)| {
                let mut state = running_state(Rules::default());
                let floor = state.surface.y - state.ball.size;
                let (y, vy) = if top {
                    (depth * speed, -speed)
                } else {
                    (floor - depth * speed, speed)
                };
                state.ball.pos = Vec2::new(x, y);
                state.ball.vel = Vec2::new(vx, vy);
                state
            })
    }

    fn arb_input() -> impl Strategy<Value = FrameInput> {
        (any::<bool>(), any::<bool>()).prop_map(|(up, down)| FrameInput { up, down })
    }

    proptest! {
        #[test]
        fn prop_inactive_advance_changes_nothing(
            mut state in arb_running_state(),
            input in arb_input(),
            paused in any::<bool>(),
            seed in any::<u64>(),
        ) {
            state.run = if paused { RunState::Paused } else { RunState::Idle };
            let before = state.clone();
            let mut rng = Pcg32::seed_from_u64(seed);
            let events = advance(&mut state, &input, &mut rng);
            prop_assert!(events.is_empty());
            prop_assert_eq!(state, before);
        }

        #[test]
        fn prop_paddles_stay_on_surface(
            mut state in arb_running_state(),
            inputs in proptest::collection::vec(arb_input(), 1..120),
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for input in &inputs {
                advance(&mut state, input, &mut rng);
                for paddle in [&state.left, &state.right] {
                    prop_assert!(paddle.pos.y >= 0.0);
                    prop_assert!(paddle.pos.y <= state.surface.y - paddle.height);
                }
            }
        }

        #[test]
        fn prop_wall_bounce_preserves_vertical_speed(
            state in arb_wall_approach(),
            seed in any::<u64>(),
        ) {
            let mut state = state;
            let vel_before = state.ball.vel;
            let mut rng = Pcg32::seed_from_u64(seed);
            let events = advance(&mut state, &FrameInput::default(), &mut rng);
            prop_assert_eq!(events, vec![GameEvent::WallBounce]);
            prop_assert_eq!(state.ball.vel.y, -vel_before.y);
            prop_assert_eq!(state.ball.vel.x, vel_before.x);
        }

        #[test]
        fn prop_paddle_hit_sends_ball_away(
            (state, side) in arb_paddle_hit(),
            input in arb_input(),
            seed in any::<u64>(),
        ) {
            let mut state = state;
            let speed_x = state.ball.vel.x.abs();
            let mut rng = Pcg32::seed_from_u64(seed);
            let events = advance(&mut state, &input, &mut rng);
            let expected_hit = GameEvent::PaddleHit { side };
            prop_assert!(events.contains(&expected_hit));
            match side {
                Side::Left => prop_assert!(state.ball.vel.x > 0.0),
                Side::Right => prop_assert!(state.ball.vel.x < 0.0),
            }
            prop_assert_eq!(state.ball.vel.x.abs(), speed_x);
            prop_assert!(state.ball.vel.y.abs() >= state.rules.min_return_speed_y);
        }
    }
}
