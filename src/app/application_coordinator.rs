//! Application-level coordination and workflow management.
//!
//! Turns panel interactions into loads, playback commands and error states.

use std::path::PathBuf;
use std::time::{Duration, Instant};
use rsched::{FileTraceReader, SimulationClient};
use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Validates the configured processes and submits them to the server.
    ///
    /// Invalid configurations never reach the network; the config panel shows
    /// why. The previous playback keeps running until the response arrives.
    pub fn simulate(state: &mut AppState, loader: &mut AsyncLoader, ctx: &egui::Context) {
        let Ok(request) = state.config.request() else {
            return;
        };

        let client = match SimulationClient::new(state.settings.server_url.clone(), state.settings.request_timeout()) {
            Ok(client) => client,
            Err(e) => {
                state.playback.fail(e.to_string());
                return;
            }
        };

        state.apply_settings();
        loader.start_load(Box::new(client.reader(request)), ctx);
    }

    /// Reads a trace file in the background.
    pub fn open_file(state: &mut AppState, loader: &mut AsyncLoader, path: PathBuf, ctx: &egui::Context) {
        state.apply_settings();
        loader.start_load(Box::new(FileTraceReader::new(path)), ctx);
    }

    /// Generates a demo trace and plays it immediately.
    pub fn open_demo_trace(state: &mut AppState, loader: &mut AsyncLoader) {
        state.apply_settings();
        match loader.load_virtual_trace() {
            Ok((trace, source)) => state.playback.install(trace, source),
            Err(e) => state.playback.fail(format!("Error generating demo trace: {}", e)),
        }
    }

    /// Checks for loading completion and applies results to application state.
    ///
    /// Called once per frame. Returns true if a load finished (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { trace, source } => {
                state.playback.install(trace, source);
                true
            }
            LoadResult::Error(message) => {
                state.playback.fail(format!("Error loading trace: {}", message));
                true
            }
            LoadResult::None => false,
        }
    }

    pub fn replay(state: &mut AppState) {
        state.apply_settings();
        state.playback.replay();
    }

    pub fn stop(state: &mut AppState) {
        state.playback.stop();
    }

    /// Advances playback if a tick is due. Returns when the next tick is due.
    pub fn poll_playback(state: &mut AppState, now: Instant) -> Option<Duration> {
        state.playback.poll(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsched::player::PlaybackPhase;

    #[test]
    fn test_invalid_config_sends_nothing() {
        let mut state = AppState::default();
        state.config.remove_row(0);
        let mut loader = AsyncLoader::new();

        ApplicationCoordinator::simulate(&mut state, &mut loader, &egui::Context::default());

        assert!(!loader.is_loading());
        assert!(state.config.error().is_some());
    }

    #[test]
    fn test_demo_trace_starts_playing() {
        let mut state = AppState::default();
        let mut loader = AsyncLoader::new();

        ApplicationCoordinator::open_demo_trace(&mut state, &mut loader);

        assert_eq!(state.playback.phase(), PlaybackPhase::Running);
        assert!(state.playback.source().is_some());
        let next = ApplicationCoordinator::poll_playback(&mut state, Instant::now() + Duration::from_secs(2));
        assert!(next.is_some());
        assert!(state.playback.scenes().state().is_some());
    }

    #[test]
    fn test_stop_and_replay() {
        let mut state = AppState::default();
        let mut loader = AsyncLoader::new();
        ApplicationCoordinator::open_demo_trace(&mut state, &mut loader);

        ApplicationCoordinator::stop(&mut state);
        assert_eq!(state.playback.phase(), PlaybackPhase::Idle);

        ApplicationCoordinator::replay(&mut state);
        assert_eq!(state.playback.phase(), PlaybackPhase::Running);
    }

    #[test]
    fn test_missing_file_shows_error() {
        let mut state = AppState::default();
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();
        ApplicationCoordinator::open_file(&mut state, &mut loader, PathBuf::from("/nonexistent/trace.json"), &ctx);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !ApplicationCoordinator::check_loading_completion(&mut state, &mut loader) {
            assert!(Instant::now() < deadline, "load never completed");
            std::thread::sleep(Duration::from_millis(5));
        }
        let message = state.playback.error_message().unwrap();
        assert!(message.starts_with("Error loading trace"));
        assert_eq!(state.playback.phase(), PlaybackPhase::Idle);
    }
}
