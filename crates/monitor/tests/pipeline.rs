use alerting::{AlertConfig, AlertManager, DrowsinessAlert};
use dms::{DrowsinessMonitor, ThresholdConfig};
use monitor::{run, RunSummary};
use serde_json::{json, Value};

/// 68 `[x, y]` pairs; eyes 30 wide, inner mouth 60 wide
fn face(ear: f64, mar: f64) -> Value {
    let mut points: Vec<[f64; 2]> = (0..36)
        .map(|i| [100.0 + 4.0 * i as f64, 60.0 + (i % 9) as f64 * 5.0])
        .collect();

    for cx in [120.0, 180.0] {
        let d = ear * 15.0;
        points.extend([
            [cx - 15.0, 100.0],
            [cx - 5.0, 100.0 - d],
            [cx + 5.0, 100.0 - d],
            [cx + 15.0, 100.0],
            [cx + 5.0, 100.0 + d],
            [cx - 5.0, 100.0 + d],
        ]);
    }

    for i in 0..12 {
        let angle = i as f64 * std::f64::consts::TAU / 12.0;
        points.push([150.0 + 36.0 * angle.cos(), 170.0 + 18.0 * angle.sin()]);
    }
    let h = mar * 30.0;
    points.extend([
        [120.0, 170.0],
        [135.0, 170.0 - h],
        [150.0, 170.0 - h],
        [165.0, 170.0 - h],
        [180.0, 170.0],
        [165.0, 170.0 + h],
        [150.0, 170.0 + h],
        [135.0, 170.0 + h],
    ]);

    json!(points)
}

fn frame(faces: &[Value]) -> String {
    json!({ "faces": faces }).to_string()
}

async fn drive(
    lines: &[String],
    frames_required: u32,
) -> (RunSummary, Vec<Value>, Vec<DrowsinessAlert>) {
    let input = lines.join("\n");
    let mut output = Vec::new();
    let mut monitor =
        DrowsinessMonitor::new(ThresholdConfig::new(0.25, 0.6, frames_required).unwrap());
    let mut alerts = AlertManager::new(AlertConfig {
        cooldown_seconds: 0,
        ..Default::default()
    });
    let mut sink: Vec<DrowsinessAlert> = Vec::new();

    let summary = run(
        input.as_bytes(),
        &mut output,
        &mut monitor,
        &mut alerts,
        &mut sink,
    )
    .await
    .unwrap();

    let reports = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (summary, reports, sink)
}

#[tokio::test]
async fn test_alarm_on_sustained_closure() {
    let mut lines: Vec<String> = (0..3).map(|_| frame(&[face(0.2, 0.3)])).collect();
    lines.extend((0..2).map(|_| frame(&[face(0.3, 0.3)])));

    let (summary, reports, alarms) = drive(&lines, 3).await;

    let states: Vec<&str> = reports
        .iter()
        .map(|r| r["faces"][0]["update"]["current"].as_str().unwrap())
        .collect();
    assert_eq!(states, ["WARNING", "WARNING", "ALERT", "AWAKE", "AWAKE"]);

    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].face_id, 0);
    assert_eq!(reports[2]["alarms"][0]["frames"], 3);
    assert!(reports[3].get("alarms").is_none());

    assert_eq!(
        summary,
        RunSummary {
            frames: 5,
            rejected_lines: 0,
            skipped_faces: 0,
            alarms: 1,
        }
    );
}

#[tokio::test]
async fn test_bad_lines_and_faces_do_not_stop_the_loop() {
    let lines = vec![
        frame(&[face(0.1, 0.3)]),
        "not json".to_string(),
        String::new(),
        frame(&[json!([[0.0, 0.0], [1.0, 1.0]])]),
        frame(&[face(0.1, 0.3)]),
    ];

    let (summary, reports, alarms) = drive(&lines, 2).await;

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.rejected_lines, 1);
    assert_eq!(summary.skipped_faces, 1);
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[1]["faces"][0]["status"], "skipped");

    // The skipped frame left the streak intact
    assert_eq!(reports[2]["faces"][0]["update"]["current"], "ALERT");
    assert_eq!(alarms.len(), 1);
}

#[tokio::test]
async fn test_lost_face_clears_and_can_alarm_again() {
    let lines = vec![
        frame(&[face(0.3, 0.3), face(0.3, 0.9)]),
        frame(&[face(0.3, 0.3)]),
        frame(&[face(0.3, 0.3), face(0.3, 0.9)]),
    ];

    let (summary, reports, alarms) = drive(&lines, 1).await;

    assert_eq!(reports[1]["lost"][0]["face_id"], 1);
    assert_eq!(reports[1]["lost"][0]["update"]["current"], "AWAKE");
    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms[1].fire_count, 2);
    assert_eq!(summary.alarms, 2);
}

#[tokio::test]
async fn test_empty_input() {
    let (summary, reports, alarms) = drive(&[], 3).await;
    assert_eq!(summary, RunSummary::default());
    assert!(reports.is_empty());
    assert!(alarms.is_empty());
}
