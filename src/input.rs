//! Keyboard input handling
//!
//! Movement keys are level-triggered and sampled once per frame. The toggle
//! key is edge-triggered: auto-repeat while it is held does nothing.

use std::collections::HashSet;

use crate::settings::KeyBindings;
use crate::sim::FrameInput;

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Start, pause or resume
    Toggle,
    /// Movement key or unbound key; nothing to do immediately
    None,
}

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    held: HashSet<String>,
}

/// Keys are matched case-insensitively (`"W"` and `"w"` are the same key)
fn normalize(key: &str) -> String {
    key.to_lowercase()
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    /// Record a key going down
    pub fn key_down(&mut self, key: &str) -> KeyAction {
        let key = normalize(key);
        let is_toggle = self.bindings.toggle.iter().any(|k| normalize(k) == key);
        let first_press = self.held.insert(key);
        if is_toggle && first_press {
            KeyAction::Toggle
        } else {
            KeyAction::None
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&normalize(key));
    }

    /// Forget every held key (e.g. on focus loss, where key-up never arrives)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Whether this key is bound to anything (so the browser default can be
    /// suppressed)
    pub fn is_bound(&self, key: &str) -> bool {
        let key = normalize(key);
        self.bindings
            .up
            .iter()
            .chain(&self.bindings.down)
            .chain(&self.bindings.toggle)
            .any(|k| normalize(k) == key)
    }

    fn any_held(&self, keys: &[String]) -> bool {
        keys.iter().any(|k| self.held.contains(&normalize(k)))
    }

    /// Sample the held movement keys for this frame
    pub fn frame(&self) -> FrameInput {
        FrameInput {
            up: self.any_held(&self.bindings.up),
            down: self.any_held(&self.bindings.down),
        }
    }
}
