//! Typed text reveal
//!
//! Shows a status message one character per step. Starting a new reveal
//! always clears what was shown and begins again from empty.

use crate::timing::scheduler::{Scheduler, TimerEvent, TimerHandle};
use std::time::Duration;

/// Progressive view of a target string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reveal {
    target: Vec<char>,
    shown: usize,
    visible: String,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin revealing `text` from an empty view
    pub fn start(&mut self, text: &str) {
        self.target = text.chars().collect();
        self.shown = 0;
        self.visible.clear();
    }

    /// Show `text` in full at once
    pub fn show_all(&mut self, text: &str) {
        self.start(text);
        self.visible.push_str(text);
        self.shown = self.target.len();
    }

    /// Show one more character. Returns false once complete.
    pub fn advance(&mut self) -> bool {
        match self.target.get(self.shown) {
            Some(c) => {
                self.visible.push(*c);
                self.shown += 1;
                true
            }
            None => false,
        }
    }

    pub fn visible(&self) -> &str {
        &self.visible
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.target.len()
    }
}

/// A reveal driven by its own repeating timer
#[derive(Debug, Default)]
pub struct TypedReveal {
    reveal: Reveal,
    handle: Option<TimerHandle>,
}

impl TypedReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart with `text`, typed at `interval` per character. The first
    /// character appears immediately.
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S, text: &str, interval: Duration) {
        self.cancel(scheduler);
        self.reveal.start(text);
        self.reveal.advance();
        if !self.reveal.is_complete() {
            self.handle = Some(scheduler.schedule_repeating(interval, TimerEvent::RevealStep));
        }
    }

    /// Replace the text at once, stopping any typing in progress
    pub fn show<S: Scheduler>(&mut self, scheduler: &mut S, text: &str) {
        self.cancel(scheduler);
        self.reveal.show_all(text);
    }

    /// Handle a step from `handle`; stale handles are ignored
    pub fn on_step<S: Scheduler>(&mut self, scheduler: &mut S, handle: TimerHandle) {
        if self.handle != Some(handle) {
            return;
        }
        self.reveal.advance();
        if self.reveal.is_complete() {
            self.cancel(scheduler);
        }
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn visible(&self) -> &str {
        self.reveal.visible()
    }

    pub fn is_typing(&self) -> bool {
        self.handle.is_some()
    }
}
