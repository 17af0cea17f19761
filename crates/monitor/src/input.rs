//! Frame input and report output records

use alerting::DrowsinessAlert;
use dms::{FrameReport, LandmarkSet};
use serde::{Deserialize, Serialize};

/// One line of input: every face the detector found in a frame
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    #[serde(default)]
    pub faces: Vec<LandmarkSet>,
}

/// One line of output
#[derive(Debug, Serialize)]
pub struct FrameOutput<'a> {
    #[serde(flatten)]
    pub report: &'a FrameReport,
    /// Alarms raised this frame
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alarms: Vec<DrowsinessAlert>,
}
