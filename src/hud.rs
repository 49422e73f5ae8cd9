//! Score and status displays
//!
//! The game pushes text into sinks it was handed at construction; it never
//! looks display elements up itself.

use crate::sim::{RunState, Side};

/// A place to show a line of text (e.g. one score)
pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

/// A place to show the match status with a CSS color
pub trait StatusSink {
    fn set_status(&mut self, text: &str, color: &str);
}

/// What the status line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    Paused,
}

impl Status {
    pub fn text(&self) -> &'static str {
        match self {
            Status::NotStarted => "Press Space to Start",
            Status::Running => "Game Running",
            Status::Paused => "Game Paused",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Status::NotStarted => "#ffffff",
            Status::Running => "#00ff00",
            Status::Paused => "#ffaa00",
        }
    }
}

impl From<RunState> for Status {
    fn from(run: RunState) -> Self {
        match run {
            RunState::Idle => Status::NotStarted,
            RunState::Running => Status::Running,
            RunState::Paused => Status::Paused,
        }
    }
}

/// The three display collaborators
pub struct Hud {
    left_score: Box<dyn TextSink>,
    right_score: Box<dyn TextSink>,
    status: Box<dyn StatusSink>,
    shown: Option<Status>,
}

impl Hud {
    pub fn new(
        left_score: Box<dyn TextSink>,
        right_score: Box<dyn TextSink>,
        status: Box<dyn StatusSink>,
    ) -> Self {
        Self {
            left_score,
            right_score,
            status,
            shown: None,
        }
    }

    pub fn show_score(&mut self, side: Side, score: u32) {
        let text = score.to_string();
        match side {
            Side::Left => self.left_score.set_text(&text),
            Side::Right => self.right_score.set_text(&text),
        }
    }

    /// Update the status line; repeated identical updates are dropped
    pub fn show_status(&mut self, status: Status) {
        if self.shown == Some(status) {
            return;
        }
        self.status.set_status(status.text(), status.color());
        self.shown = Some(status);
    }
}
