//! Tick scheduling.
//!
//! The driver only asks for "a repeating tick every N" and cancels it again.
//! How ticks are produced is up to the scheduler: `IntervalScheduler` follows
//! the wall clock and is polled from the GUI frame loop, `ManualScheduler`
//! lets tests fire ticks by hand.

use std::time::{Duration, Instant};

/// Identifies one scheduled repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

pub trait TickScheduler {
    /// Starts a repeating timer.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Stops a timer; it will never fire again. Unknown ids are ignored.
    fn cancel(&mut self, timer: TimerId);

    /// Number of timers currently able to fire.
    fn active_timers(&self) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct ArmedTimer {
    id: TimerId,
    interval: Duration,
    next_due: Instant,
}

/// Wall-clock scheduler polled by the caller.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    timers: Vec<ArmedTimer>,
    next_id: u64,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer whose first tick is due one interval after `now`.
    pub fn schedule_repeating_at(&mut self, now: Instant, interval: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(ArmedTimer {
            id,
            interval,
            next_due: now + interval,
        });
        id
    }

    /// Returns the earliest timer due at `now` and re-arms it.
    ///
    /// A timer that fell behind fires once and is re-armed relative to `now`,
    /// so a stalled frame loop never causes a burst of ticks.
    pub fn poll(&mut self, now: Instant) -> Option<TimerId> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due <= now)
            .min_by_key(|t| t.next_due)?;

        timer.next_due += timer.interval;
        if timer.next_due <= now {
            timer.next_due = now + timer.interval;
        }
        Some(timer.id)
    }

    /// Time until the next timer is due, `None` when nothing is armed.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.next_due.saturating_duration_since(now))
            .min()
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        self.schedule_repeating_at(Instant::now(), interval)
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|t| t.id != timer);
    }

    fn active_timers(&self) -> usize {
        self.timers.len()
    }
}

/// Deterministic scheduler for tests and headless playback.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    active: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
    next_id: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently scheduled timer that is still active.
    pub fn current(&self) -> Option<TimerId> {
        self.active.last().map(|(id, _)| *id)
    }

    pub fn interval_of(&self, timer: TimerId) -> Option<Duration> {
        self.active.iter().find(|(id, _)| *id == timer).map(|(_, d)| *d)
    }

    pub fn is_active(&self, timer: TimerId) -> bool {
        self.active.iter().any(|(id, _)| *id == timer)
    }

    /// Every timer cancelled so far, in cancellation order.
    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.active.push((id, interval));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        let before = self.active.len();
        self.active.retain(|(id, _)| *id != timer);
        if self.active.len() != before {
            self.cancelled.push(timer);
        }
    }

    fn active_timers(&self) -> usize {
        self.active.len()
    }
}
