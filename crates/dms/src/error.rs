//! DMS error types

use serde::Serialize;
use thiserror::Error;

use crate::landmarks::Region;

/// Per-frame metric failures.
///
/// Both variants are recoverable: the face is skipped for the current frame
/// and its tracked state is left as it was.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricError {
    /// A region (or the whole set) has the wrong number of points
    #[error("{region} expects {expected} landmarks, got {actual}")]
    InvalidLandmarkCount {
        region: Region,
        expected: usize,
        actual: usize,
    },

    /// Reference distance is zero or a coordinate is not finite
    #[error("Degenerate {region} geometry: reference distance is zero or coordinates are not finite")]
    DegenerateGeometry { region: Region },
}

/// Startup configuration failures. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required threshold not present in any source
    #[error("Missing required configuration field: {0}")]
    MissingField(&'static str),

    /// Field present but outside its allowed domain
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// File unreadable or not parseable
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
