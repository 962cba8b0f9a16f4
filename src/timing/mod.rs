//! Timing module
//!
//! Scheduled timers, the brew countdown and the typed text reveal.

pub mod countdown;
pub mod reveal;
pub mod scheduler;

// Re-export commonly used types
pub use countdown::{BrewTimer, Countdown, CountdownTick};
pub use reveal::{Reveal, TypedReveal};
pub use scheduler::{
    ManualScheduler, Scheduler, TimerEvent, TimerFired, TimerHandle, TokioScheduler, MIN_PERIOD,
};
