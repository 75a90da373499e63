//! Generic settings persistence coordination.
//!
//! Settings are stored in eframe's persistent storage as JSON strings. Values
//! that are missing or no longer deserialize fall back to defaults.

use rsched::{ProcessRow, SchedulingPolicy};
use serde::{Deserialize, Serialize};
use crate::app::AppState;
use crate::state::{ConfigState, PlayerSettings};

const PLAYER_SETTINGS_KEY: &str = "player_settings";
const PROCESS_ROWS_KEY: &str = "process_rows";
const POLICY_KEY: &str = "scheduling_policy";

/// Coordinates generic settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from persistent storage, or `T::default()` if absent or invalid.
    ///
    /// # Examples
    /// ```ignore
    /// let settings: PlayerSettings = SettingsCoordinator::load_setting(storage, "player_settings");
    /// ```
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Saves a setting to persistent storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => storage.set_string(key, json_str),
            Err(e) => tracing::warn!(key, error = %e, "failed to serialize setting"),
        }
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable stored setting");
                None
            }
        }
    }

    /// Restores player settings.
    pub fn load_player_settings(storage: Option<&dyn eframe::Storage>) -> PlayerSettings {
        Self::load_setting(storage, PLAYER_SETTINGS_KEY)
    }

    /// Restores the process rows and policy the user last edited.
    pub fn load_config(storage: Option<&dyn eframe::Storage>) -> ConfigState {
        let rows: Option<Vec<ProcessRow>> = Self::try_load_setting(storage, PROCESS_ROWS_KEY);
        let policy: SchedulingPolicy = Self::load_setting(storage, POLICY_KEY);
        match rows.filter(|rows| !rows.is_empty()) {
            Some(rows) => ConfigState::new(rows, policy),
            None => {
                let mut config = ConfigState::default();
                config.set_policy(policy);
                config
            }
        }
    }

    /// Saves everything that survives a restart except the theme.
    pub fn save_app_settings(storage: &mut dyn eframe::Storage, state: &AppState) {
        Self::save_setting(storage, PLAYER_SETTINGS_KEY, &state.settings);
        Self::save_setting(storage, PROCESS_ROWS_KEY, &state.config.rows());
        Self::save_setting(storage, POLICY_KEY, &state.config.policy());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_save_and_load_simple() {
        let mut storage = MockStorage::new();
        SettingsCoordinator::save_setting(&mut storage, "test_key", &42i32);

        let loaded: i32 = SettingsCoordinator::load_setting(Some(&storage), "test_key");
        assert_eq!(loaded, 42);
    }

    #[test]
    fn test_load_with_default() {
        let storage = MockStorage::new();
        let loaded: i32 = SettingsCoordinator::load_setting(Some(&storage), "missing_key");
        assert_eq!(loaded, 0);

        let none: i32 = SettingsCoordinator::load_setting(None, "missing_key");
        assert_eq!(none, 0);
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let mut storage = MockStorage::new();
        storage.data.insert(PLAYER_SETTINGS_KEY.to_string(), "{not json".to_string());

        let settings = SettingsCoordinator::load_player_settings(Some(&storage));
        assert_eq!(settings, PlayerSettings::default());
    }

    #[test]
    fn test_app_settings_round_trip() {
        let mut storage = MockStorage::new();
        let mut state = AppState::default();
        state.settings.server_url = "http://sim.local:9000".to_string();
        state.config.add_row();
        state.config.rows_mut()[1].priority = 4;
        state.config.set_policy(SchedulingPolicy::Preemptive);

        SettingsCoordinator::save_app_settings(&mut storage, &state);

        let settings = SettingsCoordinator::load_player_settings(Some(&storage));
        assert_eq!(settings.server_url, "http://sim.local:9000");

        let config = SettingsCoordinator::load_config(Some(&storage));
        assert_eq!(config.rows().len(), 2);
        assert_eq!(config.rows()[1].priority, 4);
        assert_eq!(config.policy(), SchedulingPolicy::Preemptive);
    }

    #[test]
    fn test_empty_stored_rows_use_default_row() {
        let mut storage = MockStorage::new();
        SettingsCoordinator::save_setting(&mut storage, PROCESS_ROWS_KEY, &Vec::<ProcessRow>::new());

        let config = SettingsCoordinator::load_config(Some(&storage));
        assert_eq!(config.rows().len(), 1);
    }
}
