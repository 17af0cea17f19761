//! Synthetic 68-point faces with controllable eye and mouth opening

use dms::{LandmarkSet, Point};

pub const EYE_WIDTH: f64 = 30.0;
pub const MOUTH_WIDTH: f64 = 60.0;

fn eye(cx: f64, cy: f64, half_open: f64) -> [Point; 6] {
    let half = EYE_WIDTH / 2.0;
    let third = EYE_WIDTH / 6.0;
    [
        Point::new(cx - half, cy),
        Point::new(cx - third, cy - half_open),
        Point::new(cx + third, cy - half_open),
        Point::new(cx + half, cy),
        Point::new(cx + third, cy + half_open),
        Point::new(cx - third, cy + half_open),
    ]
}

/// Face whose EAR is `ear` on both eyes and whose MAR is `mar`
pub fn face(ear: f64, mar: f64) -> LandmarkSet {
    face_at(0.0, 0.0, ear, mar)
}

/// Same as [`face`], offset in the frame
pub fn face_at(dx: f64, dy: f64, ear: f64, mar: f64) -> LandmarkSet {
    // Jaw, brows and nose: any distinct points
    let mut points: Vec<Point> = (0..36)
        .map(|i| Point::new(dx + 100.0 + 4.0 * i as f64, dy + 60.0 + (i % 9) as f64 * 5.0))
        .collect();

    // EAR = 2d / w for lids `d` off the corner line
    let eye_half_open = ear * EYE_WIDTH / 2.0;
    points.extend(eye(dx + 120.0, dy + 100.0, eye_half_open));
    points.extend(eye(dx + 180.0, dy + 100.0, eye_half_open));

    let (cx, cy) = (dx + 150.0, dy + 170.0);
    for i in 0..12 {
        let angle = i as f64 * std::f64::consts::TAU / 12.0;
        points.push(Point::new(cx + 36.0 * angle.cos(), cy + 18.0 * angle.sin()));
    }
    // MAR = 2h / W for inner lips `h` off the corner line
    let h = mar * MOUTH_WIDTH / 2.0;
    let half = MOUTH_WIDTH / 2.0;
    let quarter = MOUTH_WIDTH / 4.0;
    points.extend([
        Point::new(cx - half, cy),
        Point::new(cx - quarter, cy - h),
        Point::new(cx, cy - h),
        Point::new(cx + quarter, cy - h),
        Point::new(cx + half, cy),
        Point::new(cx + quarter, cy + h),
        Point::new(cx, cy + h),
        Point::new(cx - quarter, cy + h),
    ]);

    LandmarkSet::new(points)
}

/// Set with one point missing
pub fn truncated_face() -> LandmarkSet {
    let mut points = face(0.3, 0.2).points().to_vec();
    points.pop();
    LandmarkSet::new(points)
}
