//! Centralized application state for the scheduling player.
//!
//! Composed of focused state components that each own one concern, so panels
//! can borrow the parts they need independently.

use crate::state::{ConfigState, PlaybackState, PlayerSettings, ThemeState};

/// Main application state composed of focused state components.
pub struct AppState {
    /// Playing trace, retained scenes, last error
    pub playback: PlaybackState,

    /// Process rows and policy being edited
    pub config: ConfigState,

    /// Server URL, tick interval, request timeout
    pub settings: PlayerSettings,

    pub theme: ThemeState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ThemeState::new(), ConfigState::default(), PlayerSettings::default())
    }
}

impl AppState {
    pub fn new(theme: ThemeState, config: ConfigState, settings: PlayerSettings) -> Self {
        Self {
            playback: PlaybackState::new(settings.tick_interval()),
            config,
            settings,
            theme,
        }
    }

    /// Pushes edited settings into the running session.
    ///
    /// A new interval applies from the next start or replay.
    pub fn apply_settings(&mut self) {
        self.playback.set_interval(self.settings.tick_interval());
    }
}
