//! Eye and mouth aspect ratios
//!
//! EAR (eye aspect ratio) drops toward zero as the lids close, MAR (mouth
//! aspect ratio) rises as the mouth opens. Both are ratios of distances and
//! so do not depend on the face's position, orientation or size in frame.

use serde::{Deserialize, Serialize};

use crate::error::MetricError;
use crate::landmarks::{expect_points, LandmarkSet, Point, Region};

/// Aspect-ratio pair for one face in one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean of left and right eye aspect ratio
    pub ear: f64,
    /// Inner-lip mouth aspect ratio
    pub mar: f64,
}

/// Per-eye breakdown alongside the combined metrics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceMetrics {
    pub left_ear: f64,
    pub right_ear: f64,
    pub ear: f64,
    pub mar: f64,
}

impl FaceMetrics {
    pub fn metrics(&self) -> Metrics {
        Metrics {
            ear: self.ear,
            mar: self.mar,
        }
    }
}

impl From<FaceMetrics> for Metrics {
    fn from(face: FaceMetrics) -> Self {
        face.metrics()
    }
}

/// Eye aspect ratio of one six-point eye contour.
///
/// `p0`/`p3` are the horizontal corners, `p1`/`p5` and `p2`/`p4` the
/// vertical lid pairs:
///
/// `EAR = (|p1 - p5| + |p2 - p4|) / (2 * |p0 - p3|)`
pub fn compute_ear(eye: &[Point]) -> Result<f64, MetricError> {
    eye_aspect_ratio(eye, Region::Eye)
}

/// Mouth aspect ratio over the 20-point mouth contour.
///
/// Uses the inner lip at offsets 12-19:
///
/// `MAR = (|m13 - m19| + |m14 - m18| + |m15 - m17|) / (3 * |m12 - m16|)`
pub fn compute_mar(mouth: &[Point]) -> Result<f64, MetricError> {
    expect_points(mouth, Region::Mouth)?;
    ensure_finite(mouth, Region::Mouth)?;

    let opening = mouth[13].distance(&mouth[19])
        + mouth[14].distance(&mouth[18])
        + mouth[15].distance(&mouth[17]);
    let width = mouth[12].distance(&mouth[16]);

    ratio(opening, 3.0 * width, Region::Mouth)
}

/// Combined metrics from the three regions of one face
pub fn compute_frame_metrics(
    left_eye: &[Point],
    right_eye: &[Point],
    mouth: &[Point],
) -> Result<Metrics, MetricError> {
    compute_regions(left_eye, right_eye, mouth).map(Metrics::from)
}

/// Slice the regions out of a full landmark set and compute its metrics
pub fn compute_landmark_metrics(landmarks: &LandmarkSet) -> Result<FaceMetrics, MetricError> {
    compute_regions(
        landmarks.left_eye()?,
        landmarks.right_eye()?,
        landmarks.mouth()?,
    )
}

fn compute_regions(
    left_eye: &[Point],
    right_eye: &[Point],
    mouth: &[Point],
) -> Result<FaceMetrics, MetricError> {
    let left_ear = eye_aspect_ratio(left_eye, Region::LeftEye)?;
    let right_ear = eye_aspect_ratio(right_eye, Region::RightEye)?;
    let mar = compute_mar(mouth)?;

    Ok(FaceMetrics {
        left_ear,
        right_ear,
        ear: (left_ear + right_ear) / 2.0,
        mar,
    })
}

fn eye_aspect_ratio(eye: &[Point], region: Region) -> Result<f64, MetricError> {
    expect_points(eye, region)?;
    ensure_finite(eye, region)?;

    let opening = eye[1].distance(&eye[5]) + eye[2].distance(&eye[4]);
    let width = eye[0].distance(&eye[3]);

    ratio(opening, 2.0 * width, region)
}

fn ensure_finite(points: &[Point], region: Region) -> Result<(), MetricError> {
    if points.iter().all(Point::is_finite) {
        Ok(())
    } else {
        Err(MetricError::DegenerateGeometry { region })
    }
}

fn ratio(numerator: f64, denominator: f64, region: Region) -> Result<f64, MetricError> {
    // Also rejects NaN
    if !(denominator > f64::EPSILON) {
        return Err(MetricError::DegenerateGeometry { region });
    }

    let value = numerator / denominator;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MetricError::DegenerateGeometry { region })
    }
}
