//! Step driver: the playback state machine.
//!
//! ```text
//!   Idle ──start──▶ Running ──last tick──▶ Completed
//!    ▲                 │  └──render error──▶ Faulted
//!    └──cancel/load────┘
//! ```
//! `start` from any state begins a fresh run at cursor 0.

use std::sync::Arc;
use std::time::Duration;
use crate::model::Trace;
use crate::player::error::PlaybackError;
use crate::player::scheduler::{TickScheduler, TimerId};
use crate::player::store::{StepLookup, TraceStore};
use crate::scene::{state_scene, statistics_view, timeline_scene};
use crate::surface::PlaybackSurface;

/// Default wall-clock time between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Nothing playing; no timer alive
    Idle,
    /// Timer alive, cursor advancing
    Running,
    /// Every step shown and statistics rendered
    Completed,
    /// A render failure stopped the run
    Faulted,
}

impl PlaybackPhase {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackPhase::Idle => "Idle",
            PlaybackPhase::Running => "Playing",
            PlaybackPhase::Completed => "Completed",
            PlaybackPhase::Faulted => "Stopped (error)",
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Step at this index was drawn and the cursor advanced past it
    Rendered { step: usize },
    /// History exhausted; statistics shown and timer cancelled
    Completed,
    /// Tick came from a timer this driver no longer owns; nothing happened
    Stale,
}

#[derive(Debug)]
pub struct StepDriver {
    phase: PlaybackPhase,
    timer: Option<TimerId>,
    interval: Duration,
    /// Store generation the current run was started against
    generation: u64,
    rendered_ticks: usize,
}

impl Default for StepDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl StepDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            timer: None,
            interval,
            generation: 0,
            rendered_ticks: 0,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes effect on the next `start`.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Steps drawn in the current run.
    pub fn rendered_ticks(&self) -> usize {
        self.rendered_ticks
    }

    /// Begins a fresh run: cancel any live timer, rewind, schedule one new timer.
    pub fn start<S: TickScheduler + ?Sized>(&mut self, store: &mut TraceStore, scheduler: &mut S) {
        self.release_timer(scheduler);
        store.rewind();

        self.generation = store.generation();
        self.rendered_ticks = 0;
        self.timer = Some(scheduler.schedule_repeating(self.interval));
        self.phase = PlaybackPhase::Running;

        tracing::info!(
            steps = store.step_count(),
            interval_ms = self.interval.as_millis() as u64,
            "playback started"
        );
    }

    /// Stops the run and returns to `Idle`.
    pub fn cancel<S: TickScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.release_timer(scheduler) {
            tracing::debug!("playback cancelled");
        }
        self.phase = PlaybackPhase::Idle;
    }

    fn release_timer<S: TickScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.timer.take() {
            Some(timer) => {
                scheduler.cancel(timer);
                true
            }
            None => false,
        }
    }

    /// Handles one tick from `timer`.
    pub fn tick<S: TickScheduler + ?Sized>(
        &mut self,
        timer: TimerId,
        store: &mut TraceStore,
        surface: &mut dyn PlaybackSurface,
        scheduler: &mut S,
    ) -> Result<TickOutcome, PlaybackError> {
        if self.phase != PlaybackPhase::Running || self.timer != Some(timer) {
            tracing::warn!(timer = timer.raw(), "ignoring tick from inactive timer");
            return Ok(TickOutcome::Stale);
        }

        let trace = match store.trace() {
            Some(trace) if store.generation() == self.generation => Arc::clone(trace),
            _ => {
                tracing::warn!("trace replaced under a running driver, stopping");
                self.cancel(scheduler);
                return Ok(TickOutcome::Stale);
            }
        };

        let cursor = store.cursor();
        if matches!(store.current_step(), StepLookup::Exhausted) {
            self.release_timer(scheduler);
            self.phase = PlaybackPhase::Completed;

            let view = statistics_view(&trace.statistics);
            if let Err(source) = surface.show_statistics(&view) {
                self.phase = PlaybackPhase::Faulted;
                return Err(PlaybackError::Statistics { source });
            }
            tracing::info!(steps = self.rendered_ticks, "playback completed");
            return Ok(TickOutcome::Completed);
        }

        if let Err(source) = render_step(&trace, cursor, surface) {
            tracing::warn!(step = cursor, error = %format!("{:#}", source), "render failed");
            self.release_timer(scheduler);
            self.phase = PlaybackPhase::Faulted;
            return Err(PlaybackError::Render { step: cursor, source });
        }
        store.advance();
        self.rendered_ticks += 1;
        tracing::debug!(step = cursor, time = trace.history[cursor].time, "step rendered");
        Ok(TickOutcome::Rendered { step: cursor })
    }
}

fn render_step(trace: &Trace, cursor: usize, surface: &mut dyn PlaybackSurface) -> anyhow::Result<()> {
    let step = &trace.history[cursor];
    surface.show_state(&state_scene(step)?)?;
    surface.show_timeline(&timeline_scene(&trace.history, cursor)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProcessSnapshot, Statistics, TimeStep};
    use crate::player::scheduler::ManualScheduler;
    use crate::surface::SceneBuffer;

    fn trace(colors: &[&str]) -> Trace {
        let history = colors
            .iter()
            .enumerate()
            .map(|(i, color)| TimeStep {
                time: i as u64,
                running: Some(ProcessSnapshot::new(1, *color)),
                queue: vec![],
            })
            .collect();
        Trace::new(history, Statistics::default())
    }

    fn setup(colors: &[&str]) -> (StepDriver, TraceStore, ManualScheduler, SceneBuffer) {
        let mut store = TraceStore::new();
        store.load(trace(colors));
        (StepDriver::default(), store, ManualScheduler::new(), SceneBuffer::new())
    }

    #[test]
    fn test_start_schedules_single_timer_at_interval() {
        let (mut driver, mut store, mut scheduler, _) = setup(&["#f00"]);
        driver.start(&mut store, &mut scheduler);

        assert_eq!(driver.phase(), PlaybackPhase::Running);
        assert_eq!(scheduler.active_timers(), 1);
        let timer = driver.timer().unwrap();
        assert_eq!(scheduler.interval_of(timer), Some(DEFAULT_TICK_INTERVAL));
    }

    #[test]
    fn test_n_render_ticks_then_completion() {
        let (mut driver, mut store, mut scheduler, mut surface) = setup(&["#f00", "#0f0", "#00f"]);
        driver.start(&mut store, &mut scheduler);
        let timer = driver.timer().unwrap();

        for expected in 0..3 {
            let outcome = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();
            assert_eq!(outcome, TickOutcome::Rendered { step: expected });
            assert_eq!(store.cursor(), expected + 1);
            assert!(surface.statistics().is_none());
        }

        let outcome = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();
        assert_eq!(outcome, TickOutcome::Completed);
        assert_eq!(driver.phase(), PlaybackPhase::Completed);
        assert_eq!(driver.rendered_ticks(), 3);
        assert_eq!(scheduler.active_timers(), 0);
        assert!(surface.statistics().is_some());

        // The cancelled timer cannot complete the run twice.
        let again = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();
        assert_eq!(again, TickOutcome::Stale);
    }

    #[test]
    fn test_restart_cancels_previous_timer() {
        let (mut driver, mut store, mut scheduler, mut surface) = setup(&["#f00", "#0f0"]);
        driver.start(&mut store, &mut scheduler);
        let old = driver.timer().unwrap();
        driver.tick(old, &mut store, &mut surface, &mut scheduler).unwrap();

        driver.start(&mut store, &mut scheduler);
        let new = driver.timer().unwrap();

        assert_ne!(old, new);
        assert_eq!(scheduler.active_timers(), 1);
        assert_eq!(scheduler.cancelled(), &[old]);
        assert_eq!(store.cursor(), 0);
        assert_eq!(
            driver.tick(old, &mut store, &mut surface, &mut scheduler).unwrap(),
            TickOutcome::Stale
        );
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_render_failure_cancels_timer() {
        let (mut driver, mut store, mut scheduler, mut surface) = setup(&["#f00", "bogus", "#00f"]);
        driver.start(&mut store, &mut scheduler);
        let timer = driver.timer().unwrap();

        driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();
        let err = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap_err();

        assert!(matches!(err, PlaybackError::Render { step: 1, .. }));
        assert_eq!(driver.phase(), PlaybackPhase::Faulted);
        assert_eq!(scheduler.active_timers(), 0);
        assert!(surface.statistics().is_none());
    }

    #[test]
    fn test_replaced_trace_stops_old_run() {
        let (mut driver, mut store, mut scheduler, mut surface) = setup(&["#f00", "#0f0"]);
        driver.start(&mut store, &mut scheduler);
        let timer = driver.timer().unwrap();

        store.load(trace(&["#00f"]));
        let outcome = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();

        assert_eq!(outcome, TickOutcome::Stale);
        assert_eq!(driver.phase(), PlaybackPhase::Idle);
        assert_eq!(scheduler.active_timers(), 0);
        assert!(surface.is_empty());
    }

    /// Draws steps but cannot show the results area.
    #[derive(Default)]
    struct NoResultsSurface {
        statistics_calls: usize,
    }

    impl PlaybackSurface for NoResultsSurface {
        fn show_state(&mut self, _scene: &crate::scene::StateScene) -> anyhow::Result<()> {
            Ok(())
        }

        fn show_timeline(&mut self, _scene: &crate::scene::TimelineScene) -> anyhow::Result<()> {
            Ok(())
        }

        fn show_statistics(&mut self, _view: &crate::scene::StatisticsView) -> anyhow::Result<()> {
            self.statistics_calls += 1;
            anyhow::bail!("results area gone")
        }

        fn clear(&mut self) {}
    }

    #[test]
    fn test_statistics_failure_faults_playback() {
        let (mut driver, mut store, mut scheduler, _) = setup(&["#f00"]);
        let mut surface = NoResultsSurface::default();
        driver.start(&mut store, &mut scheduler);
        let timer = driver.timer().unwrap();

        driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();
        let err = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap_err();

        assert!(matches!(err, PlaybackError::Statistics { .. }));
        assert!(err.to_string().contains("results area gone"));
        assert_eq!(driver.phase(), PlaybackPhase::Faulted);
        assert_eq!(scheduler.active_timers(), 0);
        assert_eq!(surface.statistics_calls, 1);

        let again = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();
        assert_eq!(again, TickOutcome::Stale);
        assert_eq!(surface.statistics_calls, 1);
    }

    #[test]
    fn test_empty_history_completes_on_first_tick() {
        let (mut driver, mut store, mut scheduler, mut surface) = setup(&[]);
        driver.start(&mut store, &mut scheduler);
        let timer = driver.timer().unwrap();

        let outcome = driver.tick(timer, &mut store, &mut surface, &mut scheduler).unwrap();
        assert_eq!(outcome, TickOutcome::Completed);
        assert_eq!(driver.rendered_ticks(), 0);
    }
}
