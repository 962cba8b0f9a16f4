//! Timer scheduling
//!
//! Every deferred transition, countdown tick and reveal step is a
//! scheduled task with a handle. The controller only talks to the
//! [`Scheduler`] trait; [`TokioScheduler`] runs timers on the tokio
//! runtime and [`ManualScheduler`] runs them on a virtual clock.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Shortest period a repeating timer runs at
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle identifying one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What a timer means when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Startup delay over, show the name prompt
    Startup,
    /// One second of brewing elapsed
    CountdownTick,
    /// Serve pause over, ask for the reward
    ServeDelay,
    /// Reward pause over, start the next cycle
    Reset,
    /// Reveal one more character of the status message
    RevealStep,
}

/// A timer firing delivered back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub event: TimerEvent,
}

/// Schedules timer events
pub trait Scheduler {
    /// Fire `event` once after `delay`
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle;

    /// Fire `event` every `period` until cancelled
    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TimerHandle;

    /// Stop a timer. Cancelling a finished or unknown handle does nothing.
    fn cancel(&mut self, handle: TimerHandle);

    /// Number of timers that can still fire
    fn active_count(&self) -> usize;
}

/// Runs each timer as a tokio task that sends into an mpsc channel
pub struct TokioScheduler {
    tx: mpsc::Sender<TimerFired>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver the app loop drains
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<TimerFired>) {
        let (tx, rx) = mpsc::channel(buffer);
        (
            Self {
                tx,
                tasks: HashMap::new(),
                next_id: 0,
            },
            rx,
        )
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle(self.next_id)
    }

    fn prune(&mut self) {
        self.tasks.retain(|_, task| !task.is_finished());
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.prune();
        let handle = self.next_handle();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(TimerFired { handle, event }).await.is_err() {
                tracing::debug!(?event, "timer receiver dropped");
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        self.prune();
        let handle = self.next_handle();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(TimerFired { handle, event }).await.is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }

    fn active_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due: Duration,
    period: Option<Duration>,
    event: TimerEvent,
}

/// Deterministic scheduler driven by an explicit virtual clock
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<PendingTimer>,
    next_id: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Pop the earliest timer due at or before `until`, moving the clock
    /// to its deadline. Repeating timers are re-armed. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerFired> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle))
            .map(|(i, _)| i)?;

        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        if let Some(period) = timer.period {
            self.pending.push(PendingTimer {
                due: timer.due + period,
                ..timer.clone()
            });
        }
        Some(TimerFired {
            handle: timer.handle,
            event: timer.event,
        })
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Fire everything due within `by`, without a controller in the loop
    pub fn advance(&mut self, by: Duration) -> Vec<TimerFired> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(until) {
            fired.push(f);
        }
        self.set_now(until);
        fired
    }

    fn push(
        &mut self,
        delay: Duration,
        period: Option<Duration>,
        event: TimerEvent,
    ) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(PendingTimer {
            handle,
            due: self.now + delay,
            period,
            event,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.push(delay, None, event)
    }

    fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        self.push(period, Some(period), event)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|t| t.handle != handle);
    }

    fn active_count(&self) -> usize {
        self.pending.len()
    }
}
