//! TOML-based application configuration.
//!
//! User preferences only -- session, task, course, and note data never
//! touch disk. Stored at `~/.config/toast/config.toml` (or `toast-dev`
//! when `TOAST_ENV=dev`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Timer defaults applied when a session is started without explicit times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDefaults {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    /// Pre-filled focus text, empty by default.
    #[serde(default)]
    pub focus_label: String,
}

/// Output preferences for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit machine-readable JSON events instead of the countdown display.
    #[serde(default)]
    pub json_events: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML; every field has a default so a partial or
/// missing file still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerDefaults,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_focus_minutes() -> u32 {
    25
}

impl Default for TimerDefaults {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            focus_label: String::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { json_events: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerDefaults::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Returns `~/.config/toast[-dev]/` based on TOAST_ENV.
pub fn config_dir() -> PathBuf {
    let base = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");
    match std::env::var("TOAST_ENV").as_deref() {
        Ok("dev") => base.join("toast-dev"),
        _ => base.join("toast"),
    }
}

impl Config {
    pub fn path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from disk, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error only when a file exists but does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Persist to disk, creating the config directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let save_err = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_err(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| save_err(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_err(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timer.focus_minutes" => Some(self.timer.focus_minutes.to_string()),
            "timer.focus_label" => Some(self.timer.focus_label.clone()),
            "output.json_events" => Some(self.output.json_events.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-separated key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "timer.focus_minutes" => {
                self.timer.focus_minutes = value.parse().map_err(|_| {
                    invalid(format!("cannot parse '{value}' as a number of minutes"))
                })?;
            }
            "timer.focus_label" => self.timer.focus_label = value.to_string(),
            "output.json_events" => {
                self.output.json_events = value
                    .parse()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a bool")))?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.timer.focus_minutes, 25);
        assert!(!parsed.output.json_events);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str("[timer]\nfocus_minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.focus_minutes, 50);
        assert_eq!(parsed.timer.focus_label, "");
        assert!(!parsed.output.json_events);
    }

    #[test]
    fn load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.set("timer.focus_minutes", "40").unwrap();
        cfg.set("timer.focus_label", "deep work").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, cfg);
        assert_eq!(reloaded.get("timer.focus_label").unwrap(), "deep work");
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("timer.focus_minutes", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn garbled_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed { .. })
        ));
    }
}
