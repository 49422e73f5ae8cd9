//! Platform adapters for the HUD sinks
//!
//! - `web`: DOM elements (browser)
//! - `LogText` / `LogStatus`: the `log` facade (native, headless)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::hud::{StatusSink, TextSink};

/// Writes text updates to the log under a label
#[derive(Debug, Clone)]
pub struct LogText {
    label: &'static str,
    current: String,
}

impl LogText {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            current: String::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }
}

impl TextSink for LogText {
    fn set_text(&mut self, text: &str) {
        log::info!("{}: {}", self.label, text);
        self.current = text.to_string();
    }
}

/// Writes status changes to the log
#[derive(Debug, Clone, Default)]
pub struct LogStatus;

impl StatusSink for LogStatus {
    fn set_status(&mut self, text: &str, _color: &str) {
        log::info!("Status: {}", text);
    }
}
