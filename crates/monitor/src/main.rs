//! Drowsiness Monitor - Main Entry Point

use alerting::{AlertManager, TracingSink};
use anyhow::Context;
use dms::DrowsinessMonitor;
use monitor::{init_logging, run, Settings};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = Settings::config_path();
    let settings = Settings::load(&path)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    init_logging(&settings.monitor.log_level)?;

    info!("=== Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Thresholds: EAR < {}, MAR > {}, {} consecutive frames",
        settings.thresholds.ear_threshold(),
        settings.thresholds.mar_threshold(),
        settings.thresholds.consecutive_frames_required()
    );

    let mut monitor = DrowsinessMonitor::new(settings.thresholds);
    let mut alerts = AlertManager::new(settings.monitor.alerting.clone());
    let mut sink = TracingSink;

    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    tokio::select! {
        summary = run(input, output, &mut monitor, &mut alerts, &mut sink) => {
            summary?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    info!("Processed {} frame(s)", monitor.frames());
    Ok(())
}
