// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, including loading and saving
//! queue caps and default durations to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use feedback_core::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.toast_max_visible = Some(5);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.toast_max_visible, Some(5));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::adapter::ThemeMode;
use crate::diagnostics::BufferCapacity;
use crate::error::Result;
use crate::feedback::{MaxVisible, Position, QueueFamily};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "FeedbackCore";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<ThemeMode>,
    #[serde(default)]
    pub toast_max_visible: Option<usize>,
    #[serde(default)]
    pub alert_max_visible: Option<usize>,
    #[serde(default)]
    pub toast_duration_ms: Option<u64>,
    #[serde(default)]
    pub banner_duration_ms: Option<u64>,
    #[serde(default)]
    pub default_position: Option<Position>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Some(ThemeMode::System),
            toast_max_visible: Some(DEFAULT_TOAST_MAX_VISIBLE),
            alert_max_visible: Some(DEFAULT_ALERT_MAX_VISIBLE),
            toast_duration_ms: Some(DEFAULT_TOAST_DURATION_MS),
            banner_duration_ms: Some(DEFAULT_BANNER_DURATION_MS),
            default_position: Some(Position::default()),
            diagnostics_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        }
    }
}

impl Config {
    /// Returns the display cap for a queue family, clamped to the valid range.
    #[must_use]
    pub fn max_visible(&self, family: QueueFamily) -> MaxVisible {
        let raw = match family {
            QueueFamily::Toast => self.toast_max_visible.unwrap_or(DEFAULT_TOAST_MAX_VISIBLE),
            QueueFamily::Alert => self.alert_max_visible.unwrap_or(DEFAULT_ALERT_MAX_VISIBLE),
        };
        MaxVisible::new(raw)
    }

    /// Returns the auto-dismiss budget for success and info toasts.
    #[must_use]
    pub fn toast_duration(&self) -> Duration {
        let ms = self
            .toast_duration_ms
            .unwrap_or(DEFAULT_TOAST_DURATION_MS)
            .min(MAX_TOAST_DURATION_MS);
        Duration::from_millis(ms)
    }

    /// Returns the auto-dismiss budget for banners (zero means sticky).
    #[must_use]
    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_duration_ms.unwrap_or(DEFAULT_BANNER_DURATION_MS))
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.default_position.unwrap_or_default()
    }

    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }

    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        self.diagnostics_capacity
            .map_or_else(BufferCapacity::default, BufferCapacity::new)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_caps() {
        let config = Config {
            toast_max_visible: Some(5),
            default_position: Some(Position::BottomCenter),
            theme: Some(ThemeMode::Dark),
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "toast_max_visible = 2\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.max_visible(QueueFamily::Toast).value(), 2);
        assert_eq!(
            loaded.max_visible(QueueFamily::Alert).value(),
            DEFAULT_ALERT_MAX_VISIBLE
        );
        assert_eq!(loaded.position(), Position::TopRight);
    }

    #[test]
    fn caps_are_clamped() {
        let config = Config {
            toast_max_visible: Some(0),
            alert_max_visible: Some(99),
            ..Config::default()
        };
        assert_eq!(config.max_visible(QueueFamily::Toast).value(), MIN_MAX_VISIBLE);
        assert_eq!(config.max_visible(QueueFamily::Alert).value(), MAX_MAX_VISIBLE);
    }

    #[test]
    fn toast_duration_is_capped() {
        let config = Config {
            toast_duration_ms: Some(10 * MAX_TOAST_DURATION_MS),
            ..Config::default()
        };
        assert_eq!(
            config.toast_duration(),
            Duration::from_millis(MAX_TOAST_DURATION_MS)
        );
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
