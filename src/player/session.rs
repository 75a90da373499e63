//! Playback session: one trace store, one driver, one scheduler.

use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::model::Trace;
use crate::player::driver::{PlaybackPhase, StepDriver, TickOutcome};
use crate::player::error::PlaybackError;
use crate::player::scheduler::{IntervalScheduler, TickScheduler, TimerId};
use crate::player::store::TraceStore;
use crate::surface::PlaybackSurface;

/// Owns everything a single playback needs.
///
/// All mutation goes through `&mut self`, so loads, starts and ticks are
/// serialized by construction. Loading always cancels the driver before the
/// new trace is installed.
#[derive(Debug)]
pub struct PlaybackSession<S: TickScheduler> {
    store: TraceStore,
    driver: StepDriver,
    scheduler: S,
}

impl<S: TickScheduler + Default> Default for PlaybackSession<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: TickScheduler> PlaybackSession<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            store: TraceStore::new(),
            driver: StepDriver::default(),
            scheduler,
        }
    }

    pub fn with_interval(scheduler: S, interval: Duration) -> Self {
        Self {
            store: TraceStore::new(),
            driver: StepDriver::new(interval),
            scheduler,
        }
    }

    /// Stops any playback, then installs `trace` with the cursor at 0.
    pub fn load(&mut self, trace: Trace) {
        self.driver.cancel(&mut self.scheduler);
        tracing::info!(steps = trace.step_count(), "trace loaded");
        self.store.load(trace);
    }

    /// Starts playback of the loaded trace from the first step.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if !self.store.is_loaded() {
            return Err(PlaybackError::NoTrace);
        }
        self.driver.start(&mut self.store, &mut self.scheduler);
        Ok(())
    }

    pub fn load_and_start(&mut self, trace: Trace) {
        self.load(trace);
        self.driver.start(&mut self.store, &mut self.scheduler);
    }

    /// Replays the current trace from the beginning.
    pub fn restart(&mut self) -> Result<(), PlaybackError> {
        self.start()
    }

    /// Stops playback, keeping the trace loaded.
    pub fn stop(&mut self) {
        self.driver.cancel(&mut self.scheduler);
    }

    /// Stops playback and forgets the trace.
    pub fn unload(&mut self) {
        self.driver.cancel(&mut self.scheduler);
        self.store.clear();
    }

    /// Routes a tick from the scheduler into the driver.
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        surface: &mut dyn PlaybackSurface,
    ) -> Result<TickOutcome, PlaybackError> {
        self.driver.tick(timer, &mut self.store, surface, &mut self.scheduler)
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.driver.set_interval(interval);
    }

    pub fn interval(&self) -> Duration {
        self.driver.interval()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.driver.phase()
    }

    pub fn is_running(&self) -> bool {
        self.driver.phase() == PlaybackPhase::Running
    }

    pub fn cursor(&self) -> usize {
        self.store.cursor()
    }

    pub fn step_count(&self) -> usize {
        self.store.step_count()
    }

    pub fn trace(&self) -> Option<&Arc<Trace>> {
        self.store.trace()
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.driver.timer()
    }

    pub fn rendered_ticks(&self) -> usize {
        self.driver.rendered_ticks()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl PlaybackSession<IntervalScheduler> {
    /// Delivers at most one due tick. Returns `None` when nothing was due.
    pub fn poll(
        &mut self,
        now: Instant,
        surface: &mut dyn PlaybackSurface,
    ) -> Option<Result<TickOutcome, PlaybackError>> {
        let timer = self.scheduler.poll(now)?;
        Some(self.on_timer(timer, surface))
    }

    /// How long the caller may sleep before the next tick is due.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }
}
