//! Per-frame analysis results

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::machine::FaceId;
use crate::metrics::FaceMetrics;
use crate::state::{AlertState, StateUpdate};

/// What happened to one detected face in a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FaceOutcome {
    /// Metrics computed and state advanced
    Observed {
        metrics: FaceMetrics,
        update: StateUpdate,
    },

    /// Landmarks unusable this frame; tracked state left unchanged
    Skipped { error: MetricError },
}

/// One entry per detected face, in detection order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceReport {
    pub face_id: FaceId,
    #[serde(flatten)]
    pub outcome: FaceOutcome,
}

impl FaceReport {
    pub fn update(&self) -> Option<&StateUpdate> {
        match &self.outcome {
            FaceOutcome::Observed { update, .. } => Some(update),
            FaceOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, FaceOutcome::Skipped { .. })
    }
}

/// A face tracked last frame that is not in this one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostFace {
    pub face_id: FaceId,
    pub update: StateUpdate,
}

/// Complete analysis of one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frame sequence number, starting at 1
    pub frame: u64,
    pub faces: Vec<FaceReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lost: Vec<LostFace>,
}

impl FrameReport {
    /// Every state change or level produced this frame, lost faces included
    pub fn updates(&self) -> impl Iterator<Item = (FaceId, &StateUpdate)> + '_ {
        self.faces
            .iter()
            .filter_map(|face| face.update().map(|update| (face.face_id, update)))
            .chain(self.lost.iter().map(|lost| (lost.face_id, &lost.update)))
    }

    /// Faces whose state just became ALERT
    pub fn entered_alert(&self) -> Vec<FaceId> {
        self.updates()
            .filter(|(_, update)| update.entered_alert())
            .map(|(face_id, _)| face_id)
            .collect()
    }

    /// Most severe state among observed faces
    pub fn highest_state(&self) -> AlertState {
        self.faces
            .iter()
            .filter_map(FaceReport::update)
            .map(|update| update.current)
            .max()
            .unwrap_or_default()
    }

    pub fn skipped(&self) -> usize {
        self.faces.iter().filter(|face| face.is_skipped()).count()
    }
}
