//! Points and face bounding boxes.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle locating a detected face within its frame.
///
/// Lives in the same coordinate space as the parent image. It is only used
/// to map face-relative landmark points into one consistent frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Origin x.
    pub x: f64,
    /// Origin y.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// The unit box: de-normalization is the identity.
    pub const UNIT: BoundingBox = BoundingBox {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Map a face-relative point into the bounding box's coordinate frame.
    pub fn denormalize(&self, point: Point2D) -> Point2D {
        Point2D {
            x: self.x + point.x * self.width,
            y: self.y + point.y * self.height,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::UNIT
    }
}
