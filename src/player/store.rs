//! Trace store: the loaded trace and the playback cursor.

use std::sync::Arc;
use crate::model::{TimeStep, Trace};

/// Result of looking up the step under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepLookup<'a> {
    Step(&'a TimeStep),
    /// Cursor is at or past the end of the history (or nothing is loaded)
    Exhausted,
}

/// Owns the current trace and cursor.
///
/// Loading replaces both wholesale and bumps the generation, so anything that
/// captured the previous generation can tell its trace is gone.
#[derive(Debug, Default)]
pub struct TraceStore {
    trace: Option<Arc<Trace>>,
    cursor: usize,
    generation: u64,
}

impl TraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new trace and resets the cursor to 0.
    pub fn load(&mut self, trace: Trace) {
        self.trace = Some(Arc::new(trace));
        self.cursor = 0;
        self.generation += 1;
    }

    /// Drops the loaded trace.
    pub fn clear(&mut self) {
        self.trace = None;
        self.cursor = 0;
        self.generation += 1;
    }

    pub fn trace(&self) -> Option<&Arc<Trace>> {
        self.trace.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.trace.is_some()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of steps in the loaded history, 0 if none.
    pub fn step_count(&self) -> usize {
        self.trace.as_ref().map(|t| t.step_count()).unwrap_or(0)
    }

    pub fn current_step(&self) -> StepLookup<'_> {
        match self.trace.as_ref().and_then(|t| t.history.get(self.cursor)) {
            Some(step) => StepLookup::Step(step),
            None => StepLookup::Exhausted,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.step_count()
    }

    /// Moves the cursor one step forward, saturating at the history length.
    pub fn advance(&mut self) {
        if self.cursor < self.step_count() {
            self.cursor += 1;
        }
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}
