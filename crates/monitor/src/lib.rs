//! Drowsiness Monitor
//!
//! Reads landmark frames as JSON lines, runs them through the DMS core and
//! writes one JSON report per frame. Alarms go to an [`AlertSink`].

pub mod input;
pub mod settings;

pub use input::{FrameInput, FrameOutput};
pub use settings::{MonitorSettings, Settings};

use alerting::{AlertManager, AlertSink};
use dms::DrowsinessMonitor;
use metrics::counter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, subscriber::SetGlobalDefaultError, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Totals for one run over an input stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    /// Lines that were not valid frame records
    pub rejected_lines: u64,
    pub skipped_faces: u64,
    pub alarms: u64,
}

/// Initialize logging
///
/// Logs go to stderr; stdout carries the report stream.
pub fn init_logging(level: &str) -> Result<(), SetGlobalDefaultError> {
    let max_level = level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Process frames until the input ends
pub async fn run<R, W, S>(
    input: R,
    mut output: W,
    monitor: &mut DrowsinessMonitor,
    alerts: &mut AlertManager,
    sink: &mut S,
) -> anyhow::Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: AlertSink,
{
    let mut summary = RunSummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let frame: FrameInput = match serde_json::from_str(line) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Rejected input line: {}", e);
                summary.rejected_lines += 1;
                counter!("dms_input_rejected_total").increment(1);
                continue;
            }
        };

        let report = monitor.process_frame(&frame.faces);
        summary.frames += 1;
        counter!("dms_frames_total").increment(1);

        let skipped = report.skipped() as u64;
        if skipped > 0 {
            summary.skipped_faces += skipped;
            counter!("dms_faces_skipped_total").increment(skipped);
        }

        let mut alarms = Vec::new();
        for (face_id, update) in report.updates() {
            if let Some(alarm) = alerts.handle(face_id, update) {
                if let Err(e) = sink.notify(&alarm) {
                    warn!("Failed to deliver alarm for face {}: {}", face_id, e);
                }
                summary.alarms += 1;
                counter!("dms_alarms_total").increment(1);
                alarms.push(alarm);
            }
        }

        debug!(
            "Frame {}: {} face(s), highest state {}",
            report.frame,
            report.faces.len(),
            report.highest_state().as_str()
        );

        let record = FrameOutput {
            report: &report,
            alarms,
        };
        let mut encoded = serde_json::to_vec(&record)?;
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
    }

    output.flush().await?;
    info!(
        "Input finished: {} frame(s), {} rejected line(s), {} alarm(s)",
        summary.frames, summary.rejected_lines, summary.alarms
    );
    Ok(summary)
}
