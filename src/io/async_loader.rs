//! Asynchronous trace loading.
//!
//! Simulation requests and file reads run on a background thread so the GUI
//! keeps painting (and playing) while they block.

use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use eframe::egui;
use rsched::{Trace, TraceReader, VirtualTraceReader};
use crate::io::LoadingState;

/// Result of a completed trace loading operation.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        trace: Trace,
        /// Description of where the trace came from
        source: String,
    },
    /// Loading failed with an error
    Error(String),
    /// No result available (still loading or nothing started)
    None,
}

/// Manages asynchronous loading of traces.
///
/// Only the most recent load is ever reported. Starting a new load drops the
/// receiver of the previous one, so its result is discarded when it arrives.
pub struct AsyncLoader {
    loading_state: Arc<Mutex<LoadingState>>,
    loading_receiver: Option<Receiver<anyhow::Result<Trace>>>,
    pending_source: Option<String>,
    next_ticket: u64,
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
            pending_source: None,
            next_ticket: 0,
        }
    }

    fn state(&self) -> MutexGuard<'_, LoadingState> {
        self.loading_state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_loading(&self) -> bool {
        self.state().in_progress()
    }

    /// What the in-flight load is fetching, if anything.
    pub fn loading_description(&self) -> Option<String> {
        let state = self.state();
        state.in_progress().then(|| state.description.clone())
    }

    /// Starts reading `reader` on a background thread.
    ///
    /// Call `check_completion()` once per frame to pick up the result.
    pub fn start_load(&mut self, reader: Box<dyn TraceReader>, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let description = reader.describe();
        self.state().begin(ticket, description.clone());
        self.pending_source = Some(description.clone());

        tracing::info!(source = %description, ticket, "load started");

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = reader.read();
            if let Err(e) = &result {
                tracing::warn!(source = %description, error = %format!("{:#}", e), "load failed");
            }

            // The receiver is gone when a newer load superseded this one.
            let _ = sender.send(result);

            loading_state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .finish(ticket);

            ctx_handle.request_repaint();
        });
    }

    /// Abandons the in-flight load; its result will be ignored.
    pub fn cancel(&mut self) {
        if self.loading_receiver.take().is_some() {
            tracing::debug!("in-flight load abandoned");
        }
        self.pending_source = None;
        self.state().active = None;
    }

    /// Generates a demo trace synchronously, superseding any in-flight load.
    pub fn load_virtual_trace(&mut self) -> Result<(Trace, String), String> {
        self.cancel();
        let reader = VirtualTraceReader::new();
        reader
            .read()
            .map(|trace| (trace, reader.describe()))
            .map_err(|e| format!("{:#}", e))
    }

    /// Checks if background loading has completed and returns the result if available.
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        let source = self.pending_source.take().unwrap_or_default();
        match result {
            Ok(trace) => LoadResult::Success { trace, source },
            Err(e) => LoadResult::Error(format!("{:#}", e)),
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct FixedReader(Result<Trace, String>, Duration);

    impl TraceReader for FixedReader {
        fn read(&self) -> anyhow::Result<Trace> {
            thread::sleep(self.1);
            self.0.clone().map_err(anyhow::Error::msg)
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    fn wait_for(loader: &mut AsyncLoader) -> LoadResult {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match loader.check_completion() {
                LoadResult::None if Instant::now() < deadline => thread::sleep(Duration::from_millis(5)),
                other => return other,
            }
        }
    }

    #[test]
    fn test_async_loader_creation() {
        let loader = AsyncLoader::new();
        assert!(!loader.is_loading());
        assert!(loader.loading_description().is_none());
    }

    #[test]
    fn test_virtual_trace_loading() {
        let mut loader = AsyncLoader::new();
        let (trace, source) = loader.load_virtual_trace().unwrap();
        assert!(!trace.is_empty());
        assert!(source.contains("seed 42"));
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = AsyncLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }

    #[test]
    fn test_background_load_reports_success() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        loader.start_load(Box::new(FixedReader(Ok(Trace::default()), Duration::ZERO)), &ctx);

        match wait_for(&mut loader) {
            LoadResult::Success { source, .. } => assert_eq!(source, "fixed"),
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn test_background_load_reports_error() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        loader.start_load(Box::new(FixedReader(Err("connection refused".into()), Duration::ZERO)), &ctx);

        match wait_for(&mut loader) {
            LoadResult::Error(message) => assert!(message.contains("connection refused")),
            _ => panic!("expected error"),
        }
    }

    #[test]
    fn test_newer_load_supersedes_older() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        let slow = Trace::new(vec![rsched::TimeStep::idle(0)], Default::default());
        loader.start_load(Box::new(FixedReader(Ok(slow), Duration::from_millis(200))), &ctx);
        loader.start_load(Box::new(FixedReader(Ok(Trace::default()), Duration::ZERO)), &ctx);

        match wait_for(&mut loader) {
            LoadResult::Success { trace, .. } => assert!(trace.is_empty()),
            _ => panic!("expected success"),
        }
        // The slow result arrives later but has nowhere to go.
        thread::sleep(Duration::from_millis(300));
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }
}
