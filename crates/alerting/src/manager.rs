//! Alert Manager Implementation

use dms::{FaceId, StateUpdate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Alert configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Minimum gap between two alarms for the same face (seconds)
    pub cooldown_seconds: u64,
    /// Maximum alarms per hour across all faces before throttling
    pub max_alerts_per_hour: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 10,
            max_alerts_per_hour: 60,
        }
    }
}

/// Alarm raised when a face enters ALERT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrowsinessAlert {
    pub face_id: FaceId,
    /// Consecutive violating frames at the time of the edge
    pub frames: u32,
    /// How many alarms this face has raised, this one included
    pub fire_count: usize,
}

/// Alarm history of one face
#[derive(Debug, Clone)]
pub struct AlertRecord {
    /// Last time an alarm fired for this face
    pub last_fired: Instant,
    /// Number of alarms fired
    pub fire_count: usize,
    /// Face still in ALERT
    pub active: bool,
    /// Whether the operator acknowledged the last alarm
    pub acknowledged: bool,
}

/// Edge-triggered alarm dispatcher.
///
/// Only the transition into ALERT raises an alarm; frames where ALERT is
/// merely held never do.
pub struct AlertManager {
    /// Configuration
    config: AlertConfig,
    /// Alarm records by face
    records: HashMap<FaceId, AlertRecord>,
    /// Alarms fired in current hour
    hourly_count: usize,
    /// Hour start time
    hour_start: Instant,
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: AlertConfig) -> Self {
        info!("Creating alert manager with config: {:?}", config);
        Self {
            config,
            records: HashMap::new(),
            hourly_count: 0,
            hour_start: Instant::now(),
        }
    }

    /// Inspect a face's state update and return an alarm if one should fire
    pub fn handle(&mut self, face_id: FaceId, update: &StateUpdate) -> Option<DrowsinessAlert> {
        if update.cleared_alert() {
            if let Some(record) = self.records.get_mut(&face_id) {
                record.active = false;
            }
            debug!("Face {} left ALERT", face_id);
            return None;
        }

        if !update.entered_alert() {
            return None;
        }

        if !self.should_fire(face_id) {
            // Still in ALERT even though no alarm went out
            if let Some(record) = self.records.get_mut(&face_id) {
                record.active = true;
            }
            return None;
        }

        let fire_count = self.record_fire(face_id);
        Some(DrowsinessAlert {
            face_id,
            frames: update.counter,
            fire_count,
        })
    }

    fn should_fire(&mut self, face_id: FaceId) -> bool {
        // Reset hourly counter if needed
        if self.hour_start.elapsed() > Duration::from_secs(3600) {
            self.hourly_count = 0;
            self.hour_start = Instant::now();
        }

        if self.hourly_count >= self.config.max_alerts_per_hour {
            warn!("Alarm for face {} throttled: max alerts per hour reached", face_id);
            return false;
        }

        if let Some(record) = self.records.get(&face_id) {
            let cooldown = Duration::from_secs(self.config.cooldown_seconds);
            if record.last_fired.elapsed() < cooldown {
                debug!("Alarm for face {} suppressed: in cooldown period", face_id);
                return false;
            }
        }

        true
    }

    fn record_fire(&mut self, face_id: FaceId) -> usize {
        self.hourly_count += 1;

        let record = self.records.entry(face_id).or_insert(AlertRecord {
            last_fired: Instant::now(),
            fire_count: 0,
            active: true,
            acknowledged: false,
        });

        record.last_fired = Instant::now();
        record.fire_count += 1;
        record.active = true;
        record.acknowledged = false;

        info!("Alarm recorded for face {} (count: {})", face_id, record.fire_count);
        record.fire_count
    }

    /// Acknowledge the latest alarm of a face
    pub fn acknowledge(&mut self, face_id: FaceId) -> bool {
        if let Some(record) = self.records.get_mut(&face_id) {
            record.acknowledged = true;
            info!("Alarm acknowledged for face {}", face_id);
            true
        } else {
            false
        }
    }

    /// Alarms fired so far for a face
    pub fn fire_count(&self, face_id: FaceId) -> usize {
        self.records.get(&face_id).map_or(0, |record| record.fire_count)
    }

    pub fn record(&self, face_id: FaceId) -> Option<&AlertRecord> {
        self.records.get(&face_id)
    }

    /// Faces currently in ALERT whose alarm has not been acknowledged
    pub fn pending(&self) -> Vec<FaceId> {
        let mut faces: Vec<FaceId> = self
            .records
            .iter()
            .filter(|(_, record)| record.active && !record.acknowledged)
            .map(|(face_id, _)| *face_id)
            .collect();
        faces.sort_unstable();
        faces
    }

    /// Get hourly alarm count
    pub fn hourly_count(&self) -> usize {
        self.hourly_count
    }

    /// Clear all alarm records
    pub fn clear(&mut self) {
        self.records.clear();
        self.hourly_count = 0;
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
