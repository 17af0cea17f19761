//! Alarm sinks

use thiserror::Error;
use tracing::warn;

use crate::manager::DrowsinessAlert;

/// Failure delivering an alarm
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Alarm output unavailable: {0}")]
    Unavailable(String),
}

/// Whatever happens when an alarm fires: sound, UI, log
pub trait AlertSink {
    fn notify(&mut self, alert: &DrowsinessAlert) -> Result<(), SinkError>;
}

/// Sink that reports alarms through tracing
#[derive(Debug, Default)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn notify(&mut self, alert: &DrowsinessAlert) -> Result<(), SinkError> {
        warn!(
            face_id = alert.face_id,
            frames = alert.frames,
            fire_count = alert.fire_count,
            "Drowsiness alarm"
        );
        Ok(())
    }
}

/// Collects alarms in memory
impl AlertSink for Vec<DrowsinessAlert> {
    fn notify(&mut self, alert: &DrowsinessAlert) -> Result<(), SinkError> {
        self.push(alert.clone());
        Ok(())
    }
}
