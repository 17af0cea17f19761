//! Driver Monitoring System (DMS)
//!
//! Drowsiness detection from 68-point facial landmarks:
//! - Eye aspect ratio (eye closure)
//! - Mouth aspect ratio (yawning)
//! - Debounced AWAKE / WARNING / ALERT state per detected face
//!
//! Face detection and landmark prediction happen upstream; this crate only
//! consumes their output, one frame at a time, without I/O.

pub mod analysis;
pub mod config;
pub mod error;
pub mod landmarks;
pub mod machine;
pub mod metrics;
pub mod state;

pub use analysis::{FaceOutcome, FaceReport, FrameReport, LostFace};
pub use crate::config::{RawThresholds, ThresholdConfig};
pub use error::{ConfigError, MetricError};
pub use landmarks::{LandmarkSet, Point, Region};
pub use machine::{DrowsinessStateMachine, FaceId};
pub use metrics::{
    compute_ear, compute_frame_metrics, compute_landmark_metrics, compute_mar, FaceMetrics, Metrics,
};
pub use state::{AlertState, StateUpdate, TrackedFaceState};

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

/// DMS error types
#[derive(Error, Debug)]
pub enum DmsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metric computation failed: {0}")]
    Metric(#[from] MetricError),
}

/// Frame-level driver monitor.
///
/// Loops over every face detected in a frame, computes its metrics and
/// advances its alert state. Face identity is the position in the frame's
/// detection list.
#[derive(Debug, Clone)]
pub struct DrowsinessMonitor {
    machine: DrowsinessStateMachine,
    frames: u64,
}

impl DrowsinessMonitor {
    pub fn new(config: ThresholdConfig) -> Self {
        Self {
            machine: DrowsinessStateMachine::new(config),
            frames: 0,
        }
    }

    /// Create a monitor from a configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, DmsError> {
        Ok(Self::new(ThresholdConfig::load(path)?))
    }

    /// Analyze all faces detected in one frame.
    ///
    /// A face with unusable landmarks is reported as skipped and keeps its
    /// previous state. Faces tracked last frame but missing from this one
    /// are reset to AWAKE.
    pub fn process_frame(&mut self, faces: &[LandmarkSet]) -> FrameReport {
        self.frames += 1;

        let mut reports = Vec::with_capacity(faces.len());
        for (face_id, landmarks) in faces.iter().enumerate() {
            let outcome = match compute_landmark_metrics(landmarks) {
                Ok(metrics) => {
                    let update = self.machine.update(face_id, &metrics.metrics());
                    FaceOutcome::Observed { metrics, update }
                }
                Err(error) => {
                    warn!("Frame {}: skipping face {}: {}", self.frames, face_id, error);
                    FaceOutcome::Skipped { error }
                }
            };
            reports.push(FaceReport { face_id, outcome });
        }

        let lost = self
            .machine
            .retain_faces(faces.len())
            .into_iter()
            .map(|(face_id, update)| LostFace { face_id, update })
            .collect::<Vec<_>>();

        if !lost.is_empty() {
            debug!("Frame {}: {} face(s) no longer detected", self.frames, lost.len());
        }

        FrameReport {
            frame: self.frames,
            faces: reports,
            lost,
        }
    }

    /// Frames processed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn machine(&self) -> &DrowsinessStateMachine {
        &self.machine
    }

    pub fn config(&self) -> &ThresholdConfig {
        self.machine.config()
    }

    /// Reset driver state (on driver change)
    pub fn reset_state(&mut self) {
        self.machine.reset();
    }
}
