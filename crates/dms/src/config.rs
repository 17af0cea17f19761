//! Drowsiness threshold configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::metrics::Metrics;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "DROWSINESS";

/// Thresholds as read from configuration sources, before validation.
///
/// Accepts both the `EAR_threshold` spelling used in existing config files
/// and the lowercase form produced by environment overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawThresholds {
    #[serde(default, alias = "EAR_threshold")]
    pub ear_threshold: Option<f64>,
    #[serde(default, alias = "MAR_threshold")]
    pub mar_threshold: Option<f64>,
    #[serde(default)]
    pub consecutive_frames_required: Option<i64>,
}

/// Immutable alert thresholds, validated once at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdConfig {
    ear_threshold: f64,
    mar_threshold: f64,
    consecutive_frames_required: u32,
}

impl ThresholdConfig {
    /// About half a second of sustained violation at 30 fps
    pub const DEFAULT_CONSECUTIVE_FRAMES: u32 = 15;

    pub fn new(
        ear_threshold: f64,
        mar_threshold: f64,
        consecutive_frames_required: u32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            ear_threshold: positive("EAR_threshold", ear_threshold)?,
            mar_threshold: positive("MAR_threshold", mar_threshold)?,
            consecutive_frames_required: frames(i64::from(consecutive_frames_required))?,
        })
    }

    /// Validate raw values. Thresholds are required; only the frame count
    /// falls back to a default.
    pub fn from_raw(raw: RawThresholds) -> Result<Self, ConfigError> {
        let ear = raw
            .ear_threshold
            .ok_or(ConfigError::MissingField("EAR_threshold"))?;
        let mar = raw
            .mar_threshold
            .ok_or(ConfigError::MissingField("MAR_threshold"))?;
        let required = match raw.consecutive_frames_required {
            Some(value) => frames(value)?,
            None => Self::DEFAULT_CONSECUTIVE_FRAMES,
        };

        Ok(Self {
            ear_threshold: positive("EAR_threshold", ear)?,
            mar_threshold: positive("MAR_threshold", mar)?,
            consecutive_frames_required: required,
        })
    }

    /// Build from already-assembled configuration sources
    pub fn from_settings(settings: config::Config) -> Result<Self, ConfigError> {
        Self::from_raw(settings.try_deserialize()?)
    }

    /// Load from a config file with `DROWSINESS_*` environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_settings(load_settings(path)?)?;
        info!(
            "Loaded thresholds: EAR < {}, MAR > {}, {} consecutive frames",
            config.ear_threshold, config.mar_threshold, config.consecutive_frames_required
        );
        Ok(config)
    }

    pub fn ear_threshold(&self) -> f64 {
        self.ear_threshold
    }

    pub fn mar_threshold(&self) -> f64 {
        self.mar_threshold
    }

    pub fn consecutive_frames_required(&self) -> u32 {
        self.consecutive_frames_required
    }

    /// Eyes closing or mouth opening past threshold. Either is enough.
    pub fn is_violating(&self, metrics: &Metrics) -> bool {
        metrics.ear < self.ear_threshold || metrics.mar > self.mar_threshold
    }
}

/// Assemble file and environment sources. Nested keys in the environment
/// use `__` as separator, e.g. `DROWSINESS_ALERTING__COOLDOWN_SECONDS`.
pub fn load_settings(path: impl AsRef<Path>) -> Result<config::Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_ref()).required(true))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(settings)
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}

fn frames(value: i64) -> Result<u32, ConfigError> {
    match u32::try_from(value) {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ConfigError::InvalidValue {
            field: "consecutive_frames_required",
            reason: format!("expected an integer >= 1, got {value}"),
        }),
    }
}
