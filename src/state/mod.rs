//! State management modules for the scheduling player.
//!
//! This module contains state-only logic (no UI concerns):
//! - Playback state (session, retained scenes, trace source, last error)
//! - Config state (process rows and scheduling policy being edited)
//! - Settings (server URL, tick interval, request timeout)
//! - Theme state (theme manager, current theme)

mod playback_state;
mod config_state;
mod settings_state;
mod theme_state;

pub use playback_state::PlaybackState;
pub use config_state::ConfigState;
pub use settings_state::{PlayerSettings, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS};
pub use theme_state::ThemeState;
