//! Engine configuration
//!
//! Loaded from `.ron` or `.json` by file extension:
//! - Missing fields take their defaults
//! - Values are validated before use
//! - A `ConfigSnapshot` summarises every load attempt, good or bad

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{BOSS_UNLOCK_MIN_LEVEL, DEFAULT_DAILY_QUEST_COUNT, RAID_UNLOCK_MIN_LEVEL};
use crate::error::ConfigError;
use crate::logging::TracingConfig;

/// Upper bound on dailies per refresh
pub const MAX_DAILY_QUEST_COUNT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Dailies generated per refresh
    pub daily_quest_count: usize,
    /// Minimum level before a weekly boss is added on refresh
    pub boss_min_level: u32,
    pub raid_min_level: u32,
    pub tracing: TracingConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            daily_quest_count: DEFAULT_DAILY_QUEST_COUNT,
            boss_min_level: BOSS_UNLOCK_MIN_LEVEL,
            raid_min_level: RAID_UNLOCK_MIN_LEVEL,
            tracing: TracingConfig::default(),
        }
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_quest_count == 0 || self.daily_quest_count > MAX_DAILY_QUEST_COUNT {
            return Err(ConfigError::Invalid(format!(
                "daily_quest_count must be within 1..={MAX_DAILY_QUEST_COUNT}, got {}",
                self.daily_quest_count
            )));
        }
        if self.raid_min_level < self.boss_min_level {
            return Err(ConfigError::Invalid(format!(
                "raid_min_level ({}) is below boss_min_level ({})",
                self.raid_min_level, self.boss_min_level
            )));
        }
        Ok(())
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Load, falling back to defaults on any failure. The snapshot records what happened.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigSnapshot) {
        let path = path.as_ref();
        let size_bytes = std::fs::metadata(path).map(|m| m.len() as usize).unwrap_or(0);
        let path_str = path.to_string_lossy().to_string();

        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path_str, "config loaded");
                let snapshot = ConfigSnapshot {
                    path: path_str,
                    size_bytes,
                    valid: true,
                    error: None,
                };
                (config, snapshot)
            }
            Err(e) => {
                tracing::warn!(path = %path_str, error = %e, "config rejected, using defaults");
                let snapshot = ConfigSnapshot {
                    path: path_str,
                    size_bytes,
                    valid: false,
                    error: Some(e.to_string()),
                };
                (Self::default(), snapshot)
            }
        }
    }
}

/// Outcome of one config load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub path: String,
    pub size_bytes: usize,
    pub valid: bool,
    pub error: Option<String>,
}

impl ConfigSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_with(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut temp = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(temp, "{body}").unwrap();
        temp
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = SystemConfig::default();
        assert_eq!(config.daily_quest_count, 5);
        assert_eq!(config.boss_min_level, 5);
        assert_eq!(config.raid_min_level, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_ron() {
        let temp = temp_with(
            ".ron",
            r#"(
                daily_quest_count: 3,
                tracing: (
                    default_level: Debug,
                    module_filters: [("hunter_core::system", Trace)],
                    show_timestamps: false,
                    show_thread_ids: false,
                    show_targets: true,
                    show_file_line: false,
                ),
            )"#,
        );
        let config = SystemConfig::load(temp.path()).unwrap();
        assert_eq!(config.daily_quest_count, 3);
        assert_eq!(config.boss_min_level, 5);
        assert_eq!(config.tracing.default_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_json_partial() {
        let temp = temp_with(".json", r#"{"boss_min_level": 8}"#);
        let config = SystemConfig::load(temp.path()).unwrap();
        assert_eq!(config.boss_min_level, 8);
        assert_eq!(config.daily_quest_count, 5);
    }

    #[test]
    fn test_rejects_out_of_range_count() {
        assert!(matches!(
            SystemConfig::from_json_str(r#"{"daily_quest_count": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SystemConfig::from_json_str(r#"{"daily_quest_count": 21}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(SystemConfig::from_json_str(r#"{"daily_quest_count": 20}"#).is_ok());
    }

    #[test]
    fn test_rejects_inverted_gates() {
        let result = SystemConfig::from_json_str(r#"{"boss_min_level": 30, "raid_min_level": 10}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp = temp_with(".toml", "daily_quest_count = 3");
        assert!(matches!(
            SystemConfig::load(temp.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn test_load_or_default_snapshots() {
        let good = temp_with(".json", r#"{"daily_quest_count": 7}"#);
        let (config, snapshot) = SystemConfig::load_or_default(good.path());
        assert_eq!(config.daily_quest_count, 7);
        assert!(snapshot.valid);
        assert!(snapshot.size_bytes > 0);
        assert_eq!(snapshot.path, good.path().to_string_lossy());

        let bad = temp_with(".json", "{invalid json");
        let (config, snapshot) = SystemConfig::load_or_default(bad.path());
        assert_eq!(config, SystemConfig::default());
        assert!(!snapshot.valid);
        assert!(snapshot.error.unwrap().contains("JSON"));

        let (_, missing) = SystemConfig::load_or_default("/nonexistent/hunter.ron");
        assert!(!missing.valid);
        assert_eq!(missing.path, "/nonexistent/hunter.ron");
        assert_eq!(missing.size_bytes, 0);
        assert!(missing.to_json().contains("\"valid\":false"));
    }
}
