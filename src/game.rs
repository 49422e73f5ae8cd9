//! Session driver
//!
//! Owns the game state for one session and the collaborators it talks to.
//! An external tick source calls [`Game::frame`] once per display refresh.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::hud::{Hud, Status};
use crate::input::{InputState, KeyAction};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, RunState, Side};

/// Game instance holding all state
pub struct Game<R: Renderer> {
    state: GameState,
    input: InputState,
    rng: Pcg32,
    renderer: R,
    hud: Hud,
    pause_on_blur: bool,
}

impl<R: Renderer> Game<R> {
    /// Start a session on the default surface
    pub fn new(seed: u64, settings: &Settings, renderer: R, hud: Hud) -> Self {
        Self::with_state(GameState::new(), seed, settings, renderer, hud)
    }

    /// Start a session from a prepared state; the ball is served immediately
    pub fn with_state(
        mut state: GameState,
        seed: u64,
        settings: &Settings,
        renderer: R,
        mut hud: Hud,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        sim::serve(&mut state, &mut rng);

        hud.show_score(Side::Left, state.left.score);
        hud.show_score(Side::Right, state.right.score);
        hud.show_status(state.run.into());

        log::info!("Session ready (seed {})", seed);

        Self {
            state,
            input: InputState::new(settings.keys.clone()),
            rng,
            renderer,
            hud,
            pause_on_blur: settings.pause_on_blur,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// One display tick: advance the simulation, then paint it
    pub fn frame(&mut self) {
        let input = self.input.frame();
        let events = sim::advance(&mut self.state, &input, &mut self.rng);

        for event in events {
            match event {
                GameEvent::Goal { scorer, score } => {
                    self.hud.show_score(scorer, score);
                    log::info!(
                        "Goal for {} ({} - {})",
                        scorer.as_str(),
                        self.state.left.score,
                        self.state.right.score
                    );
                }
                GameEvent::PaddleHit { side } => {
                    log::debug!("Return by {}", side.as_str());
                }
                GameEvent::WallBounce => {}
            }
        }

        self.renderer.render(&self.state);
    }

    /// Start, pause or resume
    pub fn toggle(&mut self) -> RunState {
        let run = sim::toggle(&mut self.state);
        match run {
            RunState::Running => log::info!("Game running"),
            RunState::Paused => log::info!("Game paused"),
            RunState::Idle => {}
        }
        self.hud.show_status(Status::from(run));
        run
    }

    /// Feed a key press; returns true if the key is bound to a control
    pub fn key_down(&mut self, key: &str) -> bool {
        if self.input.key_down(key) == KeyAction::Toggle {
            self.toggle();
        }
        self.input.is_bound(key)
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Window lost focus or the page was hidden
    pub fn focus_lost(&mut self) {
        self.input.release_all();
        if self.pause_on_blur && self.state.run == RunState::Running {
            log::info!("Auto-paused (focus lost)");
            self.toggle();
        }
    }
}
