//! Player settings persisted between sessions.

use std::time::Duration;
use rsched::client::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER_URL};
use rsched::player::DEFAULT_TICK_INTERVAL;
use serde::{Deserialize, Serialize};

pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const MAX_TICK_INTERVAL_MS: u64 = 10_000;

/// Connection and cadence settings.
///
/// Missing fields in stored JSON take their defaults, so older saved
/// settings keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Base URL of the simulation server, without `/simulate`
    pub server_url: String,
    /// Wall-clock time between playback steps
    pub tick_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl PlayerSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Applies command-line overrides on top of stored values.
    pub fn with_overrides(mut self, server_url: Option<String>, interval_ms: Option<u64>) -> Self {
        if let Some(url) = server_url {
            self.server_url = url;
        }
        if let Some(ms) = interval_ms {
            self.tick_interval_ms = ms;
        }
        self
    }
}
