//! Alerting System
//!
//! Turns drowsiness state edges into alarm notifications, with per-face
//! cooldown and an hourly throttle.

mod manager;
mod sink;

pub use manager::{AlertConfig, AlertManager, AlertRecord, DrowsinessAlert};
pub use sink::{AlertSink, SinkError, TracingSink};
