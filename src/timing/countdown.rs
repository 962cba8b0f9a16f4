//! Brew countdown
//!
//! [`Countdown`] is the bare counter. [`BrewTimer`] pairs it with the one
//! repeating timer that drives it, so a restart can never leave two
//! tickers decrementing the same counter.

use crate::timing::scheduler::{Scheduler, TimerEvent, TimerHandle};
use std::time::Duration;

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Still brewing, this many seconds left
    Remaining(u32),
    /// Reached zero on this tick
    Finished,
    /// Not running; the tick was ignored
    Idle,
}

/// Integer seconds counting down to zero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
        self.running = seconds > 0;
    }

    /// Decrement once. Reports `Finished` exactly once per start.
    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownTick::Finished
        } else {
            CountdownTick::Remaining(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Countdown owning at most one outstanding tick timer
#[derive(Debug, Default)]
pub struct BrewTimer {
    countdown: Countdown,
    handle: Option<TimerHandle>,
}

impl BrewTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `seconds`, cancelling any previous ticker first
    pub fn start<S: Scheduler>(&mut self, scheduler: &mut S, seconds: u32, period: Duration) {
        self.cancel(scheduler);
        self.countdown.start(seconds);
        self.handle = Some(scheduler.schedule_repeating(period, TimerEvent::CountdownTick));
        tracing::debug!(seconds, "countdown started");
    }

    /// Handle a tick from `handle`. Ticks from any other handle are stale
    /// and ignored. The ticker is cancelled when the count reaches zero.
    pub fn on_tick<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        handle: TimerHandle,
    ) -> CountdownTick {
        if self.handle != Some(handle) {
            tracing::debug!(handle = handle.id(), "stale countdown tick ignored");
            return CountdownTick::Idle;
        }
        let tick = self.countdown.tick();
        if matches!(tick, CountdownTick::Finished | CountdownTick::Idle) {
            self.cancel(scheduler);
        }
        tick
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }
}
