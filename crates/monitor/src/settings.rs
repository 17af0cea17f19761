//! Monitor configuration
//!
//! One file feeds both the detection thresholds and the monitor's own
//! settings. Environment variables prefixed `DROWSINESS_` override it.

use std::path::{Path, PathBuf};

use alerting::AlertConfig;
use dms::{ConfigError, ThresholdConfig};
use serde::Deserialize;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "DROWSINESS_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Settings beyond the detection thresholds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitorSettings {
    /// Max tracing level: trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub alerting: AlertConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Fully validated startup configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub thresholds: ThresholdConfig,
    pub monitor: MonitorSettings,
}

impl Settings {
    /// Configuration file location, `config.json` unless overridden
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let sources = dms::config::load_settings(path)?;
        let monitor: MonitorSettings = sources.clone().try_deserialize()?;
        let thresholds = ThresholdConfig::from_settings(sources)?;

        Ok(Self {
            thresholds,
            monitor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_bundled_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.json");
        let settings = Settings::load(path).unwrap();

        assert_eq!(settings.thresholds.ear_threshold(), 0.25);
        assert_eq!(settings.thresholds.mar_threshold(), 0.6);
        assert_eq!(settings.thresholds.consecutive_frames_required(), 15);
        assert_eq!(settings.monitor.alerting.cooldown_seconds, 10);
    }

    #[test]
    fn test_optional_sections_default() {
        let dir = std::env::temp_dir().join(format!("monitor-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"EAR_threshold": 0.2, "MAR_threshold": 0.7}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.monitor.log_level, "info");
        assert_eq!(settings.monitor.alerting, AlertConfig::default());
        assert_eq!(
            settings.thresholds.consecutive_frames_required(),
            ThresholdConfig::DEFAULT_CONSECUTIVE_FRAMES
        );

        std::fs::write(&path, r#"{"EAR_threshold": 0.2}"#).unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::MissingField("MAR_threshold"))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
