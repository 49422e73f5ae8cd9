//! Rendering module
//!
//! `scene` turns game state into triangles; `pipeline` uploads them through
//! WebGPU. Anything implementing [`Renderer`] can be driven by [`crate::Game`].

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::sim::GameState;

/// Paints one frame of the current state
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Builds the scene without presenting it
///
/// Used by the native runner and tests; keeps the last frame for inspection.
#[derive(Debug, Default)]
pub struct Headless {
    pub frames: u64,
    pub last_frame: Vec<Vertex>,
}

impl Renderer for Headless {
    fn render(&mut self, state: &GameState) {
        self.last_frame = scene::build(state);
        self.frames += 1;
        log::trace!(
            "Frame {}: {} vertices",
            self.frames,
            self.last_frame.len()
        );
    }
}
