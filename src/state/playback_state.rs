//! Playback state: the session, what it has drawn, and where the trace came from.

use std::time::{Duration, Instant};
use rsched::player::PlaybackPhase;
use rsched::{IntervalScheduler, PlaybackSession, PlaybackSurface, SceneBuffer, TickOutcome, Trace};

/// State related to the playing trace.
///
/// Responsibilities:
/// - Owning the playback session and its wall-clock scheduler
/// - Retaining the latest scenes for painting
/// - Remembering the trace source and the last error to show
pub struct PlaybackState {
    session: PlaybackSession<IntervalScheduler>,
    scenes: SceneBuffer,
    /// Human-readable origin of the loaded trace
    source: Option<String>,
    /// Error shown in the header (fetch or render failure)
    error_message: Option<String>,
}

impl PlaybackState {
    pub fn new(interval: Duration) -> Self {
        Self {
            session: PlaybackSession::with_interval(IntervalScheduler::new(), interval),
            scenes: SceneBuffer::new(),
            source: None,
            error_message: None,
        }
    }

    // ===== Queries =====

    pub fn scenes(&self) -> &SceneBuffer {
        &self.scenes
    }

    pub fn session(&self) -> &PlaybackSession<IntervalScheduler> {
        &self.session
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.session.phase()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn has_trace(&self) -> bool {
        self.session.trace().is_some()
    }

    // ===== Mutations =====

    /// Replaces whatever was playing with `trace` and starts it from the first step.
    pub fn install(&mut self, trace: Trace, source: String) {
        self.scenes.clear();
        self.error_message = None;
        self.source = Some(source);
        self.session.load_and_start(trace);
    }

    /// Stops playback, clears every display area and shows `message`.
    pub fn fail(&mut self, message: String) {
        self.session.unload();
        self.scenes.clear();
        self.source = None;
        self.error_message = Some(message);
    }

    /// Replays the loaded trace from the first step.
    pub fn replay(&mut self) {
        match self.session.restart() {
            Ok(()) => {
                self.scenes.clear();
                self.error_message = None;
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.session.set_interval(interval);
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Delivers a due tick, if any. Returns how long until the next one.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        match self.session.poll(now, &mut self.scenes) {
            Some(Ok(TickOutcome::Completed)) => {
                tracing::debug!("statistics shown");
            }
            Some(Err(e)) => {
                self.error_message = Some(e.to_string());
            }
            Some(Ok(_)) | None => {}
        }
        self.session.time_until_next_tick(now)
    }
}
