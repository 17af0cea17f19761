//! Debounced drowsiness state machine
//!
//! Tracks one [`TrackedFaceState`] per face identity and turns the per-frame
//! violation signal into AWAKE / WARNING / ALERT with hysteresis.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::ThresholdConfig;
use crate::metrics::Metrics;
use crate::state::{AlertState, StateUpdate, TrackedFaceState};

/// Face identity within the state machine.
///
/// The frame monitor assigns positional ids (index in the frame's detection
/// list). A caller with a spatial tracker can pass its own stable ids to
/// [`DrowsinessStateMachine::update`] instead.
pub type FaceId = usize;

/// Combined eye-closure / yawn alert state machine.
///
/// One counter per face counts frames where either EAR is below or MAR is
/// above its threshold.
#[derive(Debug, Clone)]
pub struct DrowsinessStateMachine {
    config: ThresholdConfig,
    faces: HashMap<FaceId, TrackedFaceState>,
}

impl DrowsinessStateMachine {
    pub fn new(config: ThresholdConfig) -> Self {
        Self {
            config,
            faces: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Feed one frame's metrics for a face, creating its state on first sight
    pub fn update(&mut self, face_id: FaceId, metrics: &Metrics) -> StateUpdate {
        let violating = self.config.is_violating(metrics);
        let required = self.config.consecutive_frames_required();
        let update = self
            .faces
            .entry(face_id)
            .or_default()
            .observe(violating, required);

        if update.entered_alert() {
            info!(
                "Face {} entered ALERT (EAR {:.3}, MAR {:.3})",
                face_id, metrics.ear, metrics.mar
            );
        } else if update.changed() {
            debug!(
                "Face {} {} -> {} (counter {}/{})",
                face_id,
                update.previous.as_str(),
                update.current.as_str(),
                update.counter,
                required
            );
        }

        update
    }

    /// Current state of a face, if tracked
    pub fn state(&self, face_id: FaceId) -> Option<&TrackedFaceState> {
        self.faces.get(&face_id)
    }

    /// Level of a face; untracked faces are AWAKE
    pub fn alert_state(&self, face_id: FaceId) -> AlertState {
        self.faces
            .get(&face_id)
            .map(TrackedFaceState::state)
            .unwrap_or_default()
    }

    /// Drop a face that is no longer detected. Its state reads as AWAKE from
    /// here on.
    pub fn forget(&mut self, face_id: FaceId) -> Option<StateUpdate> {
        self.faces.remove(&face_id).map(|mut face| {
            let update = face.reset();
            if update.changed() {
                debug!("Face {} lost while {}", face_id, update.previous.as_str());
            }
            update
        })
    }

    /// Forget every face whose positional id is not below `count`.
    /// Returns the resets in ascending id order.
    pub fn retain_faces(&mut self, count: usize) -> Vec<(FaceId, StateUpdate)> {
        let mut gone: Vec<FaceId> = self.faces.keys().copied().filter(|id| *id >= count).collect();
        gone.sort_unstable();

        gone.into_iter()
            .filter_map(|id| self.forget(id).map(|update| (id, update)))
            .collect()
    }

    pub fn tracked_faces(&self) -> usize {
        self.faces.len()
    }

    /// Drop all tracked state (driver change)
    pub fn reset(&mut self) {
        info!("Resetting {} tracked face(s)", self.faces.len());
        self.faces.clear();
    }
}
