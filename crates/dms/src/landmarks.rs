//! 68-point facial landmark model
//!
//! Landmark sets arrive from an external predictor in the standard 68-point
//! anatomical ordering. Only the eye and mouth regions feed the metrics.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;

/// Number of points in a full landmark set
pub const LANDMARK_COUNT: usize = 68;

/// Points per eye contour
pub const EYE_POINTS: usize = 6;

/// Points in the outer + inner mouth contour
pub const MOUTH_POINTS: usize = 20;

/// Fixed index ranges into a 68-point set
pub mod region_indices {
    use std::ops::Range;

    /// Subject's right eye (image left on a frontal face)
    pub const RIGHT_EYE: Range<usize> = 36..42;
    pub const LEFT_EYE: Range<usize> = 42..48;
    /// Outer contour at offsets 0-11, inner contour at 12-19
    pub const MOUTH: Range<usize> = 48..68;
}

/// 2D landmark in detector coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Facial region a metric is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// A single eye contour of unspecified side
    Eye,
    LeftEye,
    RightEye,
    Mouth,
    /// The complete 68-point set
    Face,
}

impl Region {
    /// Expected point count for this region
    pub fn expected_points(&self) -> usize {
        match self {
            Region::Eye | Region::LeftEye | Region::RightEye => EYE_POINTS,
            Region::Mouth => MOUTH_POINTS,
            Region::Face => LANDMARK_COUNT,
        }
    }

    fn indices(&self) -> Option<Range<usize>> {
        match self {
            Region::LeftEye => Some(region_indices::LEFT_EYE),
            Region::RightEye => Some(region_indices::RIGHT_EYE),
            Region::Mouth => Some(region_indices::MOUTH),
            Region::Eye | Region::Face => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eye => "eye",
            Region::LeftEye => "left eye",
            Region::RightEye => "right eye",
            Region::Mouth => "mouth",
            Region::Face => "face",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a point slice has exactly the size `region` requires
pub(crate) fn expect_points(points: &[Point], region: Region) -> Result<(), MetricError> {
    let expected = region.expected_points();
    if points.len() != expected {
        return Err(MetricError::InvalidLandmarkCount {
            region,
            expected,
            actual: points.len(),
        });
    }
    Ok(())
}

/// Landmark set for one detected face in one frame.
///
/// Holds whatever the predictor produced; the 68-point contract is checked
/// when regions are extracted so that a malformed set surfaces as a
/// per-face error rather than a rejected frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Slice out one anatomical region
    pub fn region(&self, region: Region) -> Result<&[Point], MetricError> {
        expect_points(&self.points, Region::Face)?;
        match region.indices() {
            Some(range) => Ok(&self.points[range]),
            None => Ok(&self.points),
        }
    }

    pub fn left_eye(&self) -> Result<&[Point], MetricError> {
        self.region(Region::LeftEye)
    }

    pub fn right_eye(&self) -> Result<&[Point], MetricError> {
        self.region(Region::RightEye)
    }

    pub fn mouth(&self) -> Result<&[Point], MetricError> {
        self.region(Region::Mouth)
    }
}

impl From<Vec<Point>> for LandmarkSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
