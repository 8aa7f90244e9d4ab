//! Geometric feature extraction.
//!
//! Every feature works on de-normalized points and degrades to 0.0 when the
//! regions it reads are too short, so a partially resolved face still
//! produces a full [`FeatureSet`].
//!
//! Mouth corners are the outer-lip ring's first point and its midpoint-index
//! point. Eyebrow index 0 is the inner end, the last index the outer end.

use facemoji_expression_model::{BoundingBox, LandmarkBundle, LandmarkRegion, RegionKind};
use serde::{Deserialize, Serialize};

/// Corner lift (in de-normalized units) that maps to a full smile.
pub const SMILE_NORMALIZER: f64 = 0.05;
/// Brow-to-eye gap of a relaxed face.
pub const BROW_RAISE_BASELINE: f64 = 0.04;
/// Gap beyond the baseline that maps to a full raise.
pub const BROW_RAISE_RANGE: f64 = 0.03;
/// Inner-to-outer eyebrow spacing ratio of a relaxed face.
pub const FURROW_BASELINE_RATIO: f64 = 0.4;
/// Ratio drop below the baseline that maps to a full furrow.
pub const FURROW_RANGE: f64 = 0.2;
/// Added to the outer eyebrow distance so coincident points cannot divide by zero.
pub const FURROW_EPSILON: f64 = 0.001;
/// Outer/inner lip offset that maps to a fully open mouth.
pub const MOUTH_OPEN_RANGE: f64 = 0.03;
/// Corner drop that maps to fully downturned corners.
pub const CORNER_DROP_RANGE: f64 = 0.02;

/// Scalar measurements for one face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// `-1.0..=1.0`; positive when the mouth corners sit above the inner lips.
    pub smile_score: f64,
    /// `0.0..=1.0`
    pub eyebrow_raise: f64,
    /// `0.0..=1.0`
    pub eyebrow_furrow: f64,
    /// `0.0..=1.0`
    pub mouth_openness: f64,
    /// `0.0..=1.0`
    pub mouth_corners_down: f64,
}

/// Compute all five features for a face.
///
/// Absent regions are treated as empty, which zeroes the features that
/// depend on them.
pub fn extract_features(landmarks: &LandmarkBundle, bbox: &BoundingBox) -> FeatureSet {
    let region = |kind: RegionKind| -> LandmarkRegion {
        landmarks
            .region(kind)
            .map(|r| r.denormalized(bbox))
            .unwrap_or_default()
    };

    let left_brow = region(RegionKind::LeftEyebrow);
    let right_brow = region(RegionKind::RightEyebrow);
    let left_eye = region(RegionKind::LeftEye);
    let right_eye = region(RegionKind::RightEye);
    let outer = region(RegionKind::OuterLips);
    let inner = region(RegionKind::InnerLips);

    FeatureSet {
        smile_score: smile_score(&outer, &inner),
        eyebrow_raise: eyebrow_raise(&left_brow, &right_brow, &left_eye, &right_eye),
        eyebrow_furrow: eyebrow_furrow(&left_brow, &right_brow),
        mouth_openness: mouth_openness(&outer, &inner),
        mouth_corners_down: mouth_corners_down(&outer),
    }
}

fn mouth_corners(outer: &LandmarkRegion) -> Option<(f64, f64)> {
    if outer.len() < 2 {
        return None;
    }
    Some((outer.first()?.y, outer.midpoint()?.y))
}

/// Average height of the two mouth corners above the inner-lip centre.
pub fn smile_score(outer: &LandmarkRegion, inner: &LandmarkRegion) -> f64 {
    if inner.len() < 2 {
        return 0.0;
    }
    let (Some((left, right)), Some(center)) = (mouth_corners(outer), inner.mean_y()) else {
        return 0.0;
    };

    let offset = ((left - center) + (right - center)) / 2.0;
    (offset / SMILE_NORMALIZER).clamp(-1.0, 1.0)
}

/// How far the brows sit from the eyes beyond the relaxed baseline.
pub fn eyebrow_raise(
    left_brow: &LandmarkRegion,
    right_brow: &LandmarkRegion,
    left_eye: &LandmarkRegion,
    right_eye: &LandmarkRegion,
) -> f64 {
    let (Some(lb), Some(rb), Some(le), Some(re)) = (
        left_brow.mean_y(),
        right_brow.mean_y(),
        left_eye.mean_y(),
        right_eye.mean_y(),
    ) else {
        return 0.0;
    };

    let gap = ((lb - le) + (rb - re)) / 2.0;
    let raise = (gap - BROW_RAISE_BASELINE).max(0.0);
    (raise / BROW_RAISE_RANGE).clamp(0.0, 1.0)
}

/// How much closer the inner brow ends are than a relaxed face's.
pub fn eyebrow_furrow(left_brow: &LandmarkRegion, right_brow: &LandmarkRegion) -> f64 {
    if left_brow.len() < 3 || right_brow.len() < 3 {
        return 0.0;
    }
    let (Some(li), Some(ri), Some(lo), Some(ro)) = (
        left_brow.first(),
        right_brow.first(),
        left_brow.last(),
        right_brow.last(),
    ) else {
        return 0.0;
    };

    let ratio = li.distance_to(&ri) / (lo.distance_to(&ro) + FURROW_EPSILON);
    furrow_from_ratio(ratio)
}

/// Map an inner/outer eyebrow spacing ratio onto the furrow scale.
/// Ratios at or above the baseline give 0.0.
pub fn furrow_from_ratio(ratio: f64) -> f64 {
    let furrow = (FURROW_BASELINE_RATIO - ratio).max(0.0);
    (furrow / FURROW_RANGE).clamp(0.0, 1.0)
}

/// Vertical separation between the outer and inner lip centres.
pub fn mouth_openness(outer: &LandmarkRegion, inner: &LandmarkRegion) -> f64 {
    let (Some(outer_y), Some(inner_y)) = (outer.mean_y(), inner.mean_y()) else {
        return 0.0;
    };
    ((outer_y - inner_y).abs() / MOUTH_OPEN_RANGE).clamp(0.0, 1.0)
}

/// Average of each corner's positive offset from the outer-lip mean.
pub fn mouth_corners_down(outer: &LandmarkRegion) -> f64 {
    let (Some((left, right)), Some(mean)) = (mouth_corners(outer), outer.mean_y()) else {
        return 0.0;
    };

    let drop = ((left - mean).max(0.0) + (right - mean).max(0.0)) / 2.0;
    (drop / CORNER_DROP_RANGE).clamp(0.0, 1.0)
}
