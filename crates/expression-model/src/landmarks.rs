//! Landmark regions and the per-face landmark bundle.
//!
//! A region is an ordered run of points describing one anatomical feature.
//! Order is significant: the first point, the last point, and the midpoint
//! index (`len / 2`) are used as anchors (eyebrow ends, mouth corners).

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point2D};

/// An ordered sequence of 2D points for one facial feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkRegion {
    points: Vec<Point2D>,
}

impl LandmarkRegion {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Build a region from `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self {
            points: pairs.iter().copied().map(Point2D::from).collect(),
        }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point2D> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point2D> {
        self.points.last().copied()
    }

    /// Point at index `len / 2`. For a lip ring starting at one mouth corner
    /// this is the opposite corner.
    pub fn midpoint(&self) -> Option<Point2D> {
        self.points.get(self.points.len() / 2).copied()
    }

    /// Mean y over all points, `None` when empty.
    pub fn mean_y(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(|p| p.y).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Copy of this region mapped through the bounding box.
    pub fn denormalized(&self, bbox: &BoundingBox) -> LandmarkRegion {
        LandmarkRegion {
            points: self.points.iter().map(|p| bbox.denormalize(*p)).collect(),
        }
    }
}

impl From<Vec<Point2D>> for LandmarkRegion {
    fn from(points: Vec<Point2D>) -> Self {
        Self::new(points)
    }
}

/// Identifies one of the regions in a [`LandmarkBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    LeftEyebrow,
    RightEyebrow,
    LeftEye,
    RightEye,
    OuterLips,
    InnerLips,
    Nose,
}

impl RegionKind {
    /// Regions the classifier needs before it will look at a face.
    pub const REQUIRED: [RegionKind; 7] = [
        RegionKind::LeftEyebrow,
        RegionKind::RightEyebrow,
        RegionKind::LeftEye,
        RegionKind::RightEye,
        RegionKind::OuterLips,
        RegionKind::InnerLips,
        RegionKind::Nose,
    ];
}

/// Landmark regions reported for one face.
///
/// Any region may be missing; the detector does not always resolve every
/// feature (occlusion, profile views).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkBundle {
    pub left_eyebrow: Option<LandmarkRegion>,
    pub right_eyebrow: Option<LandmarkRegion>,
    pub left_eye: Option<LandmarkRegion>,
    pub right_eye: Option<LandmarkRegion>,
    pub outer_lips: Option<LandmarkRegion>,
    pub inner_lips: Option<LandmarkRegion>,
    pub nose: Option<LandmarkRegion>,
}

impl LandmarkBundle {
    pub fn region(&self, kind: RegionKind) -> Option<&LandmarkRegion> {
        match kind {
            RegionKind::LeftEyebrow => self.left_eyebrow.as_ref(),
            RegionKind::RightEyebrow => self.right_eyebrow.as_ref(),
            RegionKind::LeftEye => self.left_eye.as_ref(),
            RegionKind::RightEye => self.right_eye.as_ref(),
            RegionKind::OuterLips => self.outer_lips.as_ref(),
            RegionKind::InnerLips => self.inner_lips.as_ref(),
            RegionKind::Nose => self.nose.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: RegionKind) -> &mut Option<LandmarkRegion> {
        match kind {
            RegionKind::LeftEyebrow => &mut self.left_eyebrow,
            RegionKind::RightEyebrow => &mut self.right_eyebrow,
            RegionKind::LeftEye => &mut self.left_eye,
            RegionKind::RightEye => &mut self.right_eye,
            RegionKind::OuterLips => &mut self.outer_lips,
            RegionKind::InnerLips => &mut self.inner_lips,
            RegionKind::Nose => &mut self.nose,
        }
    }

    /// Builder-style setter.
    pub fn with_region(mut self, kind: RegionKind, region: LandmarkRegion) -> Self {
        *self.slot_mut(kind) = Some(region);
        self
    }

    /// Remove a region, returning it.
    pub fn take_region(&mut self, kind: RegionKind) -> Option<LandmarkRegion> {
        self.slot_mut(kind).take()
    }

    /// A region counts as present only when it has at least one point.
    pub fn has_region(&self, kind: RegionKind) -> bool {
        self.region(kind).is_some_and(|r| !r.is_empty())
    }

    /// Required regions that are absent or empty, in declaration order.
    pub fn missing_regions(&self) -> Vec<RegionKind> {
        RegionKind::REQUIRED
            .into_iter()
            .filter(|kind| !self.has_region(*kind))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        RegionKind::REQUIRED.iter().all(|kind| self.has_region(*kind))
    }
}
