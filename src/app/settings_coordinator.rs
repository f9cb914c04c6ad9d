//! Persistence of editor preferences.
//!
//! Preferences are stored as JSON strings in eframe's key/value storage. The
//! bubble configuration is stored whole, so tuning timings or margins in the
//! settings window survives a restart.

use serde::{Deserialize, Serialize};
use streetbubble::BubbleConfig;

pub const BUBBLE_CONFIG_KEY: &str = "bubble_config";
pub const SHOW_POLYGON_KEY: &str = "show_hover_polygon";

/// Loads and saves serializable preferences.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, falling back to `default` when it is missing or no
    /// longer parses.
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring stored setting {}: {}", key, e);
                None
            }
        }
    }

    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => storage.set_string(key, json_str),
            Err(e) => log::warn!("Failed to serialize setting {}: {}", key, e),
        }
    }

    /// Stored bubble configuration, or the built-in defaults.
    pub fn load_bubble_config(storage: Option<&dyn eframe::Storage>) -> BubbleConfig {
        Self::load_setting_or(storage, BUBBLE_CONFIG_KEY, BubbleConfig::default()).sanitized()
    }

    /// Writes every editor preference and flushes the storage.
    pub fn save_preferences(storage: &mut dyn eframe::Storage, config: &BubbleConfig, show_polygon: bool) {
        Self::save_setting(storage, BUBBLE_CONFIG_KEY, config);
        Self::save_setting(storage, SHOW_POLYGON_KEY, &show_polygon);
        storage.flush();
    }
}
