//! Threshold-based expression classification.
//!
//! # Decision rule
//!
//! Evaluated top to bottom; the first matching rule wins. Categories overlap
//! on raw features, so the order is part of the contract.
//!
//! | # | Condition                                   | Category  | Confidence                  |
//! |---|---------------------------------------------|-----------|-----------------------------|
//! | 1 | smile > 0.3 and furrow < 0.2                | Happy     | smile × 1.5                 |
//! | 2 | raise > 0.25 and openness > 0.15            | Surprised | (raise + openness) × 1.2    |
//! | 3 | furrow > 0.3                                | Angry     | furrow × 1.5                |
//! | 4 | corners_down > 0.2 and smile < 0.1          | Sad       | corners_down × 1.5          |
//! | 5 | otherwise                                   | Neutral   | 0.7                         |
//!
//! Confidences are capped at 1.0 and clamped again by [`ExpressionResult::new`].

use facemoji_expression_model::{
    BoundingBox, Category, ExpressionResult, LandmarkBundle, Outcome, RegionKind,
};
use serde::Serialize;
use tracing::debug;

use crate::features::{extract_features, FeatureSet};

/// Confidence reported when no rule matches.
pub const NEUTRAL_CONFIDENCE: f64 = 0.7;

/// Full classifier output, including how the result was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub result: ExpressionResult,
    pub outcome: Outcome,
    /// Features the decision was based on. `None` for the fallback path.
    pub features: Option<FeatureSet>,
    /// Required regions that were absent or empty.
    pub missing_regions: Vec<RegionKind>,
}

impl Classification {
    pub fn category(&self) -> Category {
        self.result.category()
    }

    pub fn confidence(&self) -> f64 {
        self.result.confidence()
    }
}

/// Classify one face.
///
/// A face missing any required region yields `(Neutral, 0.5)`.
pub fn classify(landmarks: &LandmarkBundle, bbox: &BoundingBox) -> ExpressionResult {
    classify_detailed(landmarks, bbox).result
}

/// Classify one face, reporting whether the fallback path was taken.
pub fn classify_detailed(landmarks: &LandmarkBundle, bbox: &BoundingBox) -> Classification {
    let missing_regions = landmarks.missing_regions();
    if !missing_regions.is_empty() {
        debug!(?missing_regions, "incomplete landmarks, using neutral fallback");
        return Classification {
            result: ExpressionResult::FALLBACK,
            outcome: Outcome::Fallback,
            features: None,
            missing_regions,
        };
    }

    let features = extract_features(landmarks, bbox);
    let result = decide(&features);
    debug!(
        category = %result.category(),
        confidence = result.confidence(),
        smile = features.smile_score,
        raise = features.eyebrow_raise,
        furrow = features.eyebrow_furrow,
        openness = features.mouth_openness,
        corners_down = features.mouth_corners_down,
        "classified face"
    );

    Classification {
        result,
        outcome: Outcome::Determined,
        features: Some(features),
        missing_regions,
    }
}

/// Apply the decision rule to a feature set.
pub fn decide(features: &FeatureSet) -> ExpressionResult {
    let FeatureSet {
        smile_score: smile,
        eyebrow_raise: raise,
        eyebrow_furrow: furrow,
        mouth_openness: openness,
        mouth_corners_down: corners_down,
    } = *features;

    let (category, confidence) = if smile > 0.3 && furrow < 0.2 {
        (Category::Happy, (smile * 1.5).min(1.0))
    } else if raise > 0.25 && openness > 0.15 {
        (Category::Surprised, ((raise + openness) * 1.2).min(1.0))
    } else if furrow > 0.3 {
        (Category::Angry, (furrow * 1.5).min(1.0))
    } else if corners_down > 0.2 && smile < 0.1 {
        (Category::Sad, (corners_down * 1.5).min(1.0))
    } else {
        (Category::Neutral, NEUTRAL_CONFIDENCE)
    };

    ExpressionResult::new(category, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facemoji_expression_model::LandmarkRegion;
    use proptest::prelude::*;

    #[derive(Clone, Copy)]
    enum Brows {
        Relaxed,
        Raised,
        Drawn,
        RaisedAndDrawn,
    }

    #[derive(Clone, Copy)]
    enum Mouth {
        Rest,
        Smile,
        Grin,
        Frown,
        Open,
    }

    fn region(pairs: &[(f64, f64)]) -> LandmarkRegion {
        LandmarkRegion::from_pairs(pairs)
    }

    fn face(brows: Brows, mouth: Mouth) -> LandmarkBundle {
        let (left_brow, right_brow) = match brows {
            Brows::Relaxed => (
                region(&[(0.40, 0.72), (0.35, 0.73), (0.30, 0.72)]),
                region(&[(0.60, 0.72), (0.65, 0.73), (0.70, 0.72)]),
            ),
            Brows::Raised => (
                region(&[(0.40, 0.74), (0.35, 0.75), (0.30, 0.74)]),
                region(&[(0.60, 0.74), (0.65, 0.75), (0.70, 0.74)]),
            ),
            Brows::Drawn => (
                region(&[(0.46, 0.71), (0.38, 0.73), (0.30, 0.72)]),
                region(&[(0.54, 0.71), (0.62, 0.73), (0.70, 0.72)]),
            ),
            Brows::RaisedAndDrawn => (
                region(&[(0.46, 0.74), (0.38, 0.76), (0.30, 0.75)]),
                region(&[(0.54, 0.74), (0.62, 0.76), (0.70, 0.75)]),
            ),
        };

        let (corner, upper, lower) = match mouth {
            Mouth::Rest => (0.30, [0.32, 0.325, 0.32], [0.28, 0.275, 0.28]),
            Mouth::Smile => (0.33, [0.32, 0.325, 0.32], [0.28, 0.275, 0.28]),
            Mouth::Grin => (0.34, [0.32, 0.325, 0.32], [0.28, 0.275, 0.28]),
            Mouth::Frown => (0.30, [0.305, 0.31, 0.305], [0.27, 0.26, 0.27]),
            Mouth::Open => (0.30, [0.33, 0.34, 0.33], [0.24, 0.23, 0.24]),
        };
        let outer = region(&[
            (0.40, corner),
            (0.44, upper[0]),
            (0.50, upper[1]),
            (0.56, upper[2]),
            (0.60, corner),
            (0.56, lower[0]),
            (0.50, lower[1]),
            (0.44, lower[2]),
        ]);

        LandmarkBundle::default()
            .with_region(RegionKind::LeftEyebrow, left_brow)
            .with_region(RegionKind::RightEyebrow, right_brow)
            .with_region(
                RegionKind::LeftEye,
                region(&[(0.30, 0.68), (0.35, 0.69), (0.40, 0.68), (0.35, 0.67)]),
            )
            .with_region(
                RegionKind::RightEye,
                region(&[(0.60, 0.68), (0.65, 0.69), (0.70, 0.68), (0.65, 0.67)]),
            )
            .with_region(RegionKind::OuterLips, outer)
            .with_region(
                RegionKind::InnerLips,
                region(&[(0.45, 0.30), (0.50, 0.305), (0.55, 0.30), (0.50, 0.295)]),
            )
            .with_region(
                RegionKind::Nose,
                region(&[(0.50, 0.60), (0.50, 0.50), (0.47, 0.45), (0.53, 0.45)]),
            )
    }

    fn features(
        smile: f64,
        raise: f64,
        furrow: f64,
        openness: f64,
        corners_down: f64,
    ) -> FeatureSet {
        FeatureSet {
            smile_score: smile,
            eyebrow_raise: raise,
            eyebrow_furrow: furrow,
            mouth_openness: openness,
            mouth_corners_down: corners_down,
        }
    }

    #[test]
    fn test_relaxed_face_is_neutral() {
        let result = classify(&face(Brows::Relaxed, Mouth::Rest), &BoundingBox::UNIT);
        assert_eq!(result.category(), Category::Neutral);
        assert_eq!(result.confidence(), NEUTRAL_CONFIDENCE);
    }

    #[test]
    fn test_smile_is_happy() {
        let result = classify(&face(Brows::Relaxed, Mouth::Smile), &BoundingBox::UNIT);
        assert_eq!(result.category(), Category::Happy);
        assert!((result.confidence() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_raised_brows_and_open_mouth_is_surprised() {
        let result = classify(&face(Brows::Raised, Mouth::Open), &BoundingBox::UNIT);
        assert_eq!(result.category(), Category::Surprised);
        assert_eq!(result.confidence(), 1.0);
    }

    #[test]
    fn test_drawn_brows_are_angry() {
        let result = classify(&face(Brows::Drawn, Mouth::Rest), &BoundingBox::UNIT);
        assert_eq!(result.category(), Category::Angry);
        assert_eq!(result.confidence(), 1.0);
    }

    #[test]
    fn test_drooping_lower_lip_is_sad() {
        let result = classify(&face(Brows::Relaxed, Mouth::Frown), &BoundingBox::UNIT);
        assert_eq!(result.category(), Category::Sad);
        assert!((result.confidence() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_happy_wins_over_surprised() {
        let bundle = face(Brows::Raised, Mouth::Smile);
        let detailed = classify_detailed(&bundle, &BoundingBox::UNIT);
        let f = detailed.features.unwrap();
        assert!(f.eyebrow_raise > 0.25 && f.mouth_openness > 0.15);
        assert_eq!(detailed.category(), Category::Happy);
    }

    #[test]
    fn test_surprised_wins_over_angry() {
        let detailed =
            classify_detailed(&face(Brows::RaisedAndDrawn, Mouth::Open), &BoundingBox::UNIT);
        assert!(detailed.features.unwrap().eyebrow_furrow > 0.3);
        assert_eq!(detailed.category(), Category::Surprised);
    }

    #[test]
    fn test_angry_wins_over_sad() {
        let detailed = classify_detailed(&face(Brows::Drawn, Mouth::Frown), &BoundingBox::UNIT);
        assert!(detailed.features.unwrap().mouth_corners_down > 0.2);
        assert_eq!(detailed.category(), Category::Angry);
    }

    #[test]
    fn test_happy_wins_over_downturned_corners() {
        // Corners lifted well above the outer-lip mean also read as
        // "corners down" under the literal formula.
        let detailed = classify_detailed(&face(Brows::Relaxed, Mouth::Grin), &BoundingBox::UNIT);
        let f = detailed.features.unwrap();
        assert!(f.smile_score > 0.3);
        assert!(f.mouth_corners_down > 0.2);
        assert!(f.eyebrow_furrow < 0.2);
        assert_eq!(detailed.category(), Category::Happy);
        assert_eq!(detailed.confidence(), 1.0);
    }

    #[test]
    fn test_decide_prefers_happy_when_sad_features_also_present() {
        let result = decide(&features(0.5, 0.0, 0.0, 0.0, 0.9));
        assert_eq!(result.category(), Category::Happy);
        assert!((result.confidence() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_decide_thresholds_are_strict() {
        assert_eq!(
            decide(&features(0.3, 0.0, 0.0, 0.0, 0.0)).category(),
            Category::Neutral
        );
        assert_eq!(
            decide(&features(0.0, 0.0, 0.3, 0.0, 0.0)).category(),
            Category::Neutral
        );
        assert_eq!(
            decide(&features(0.0, 0.25, 0.0, 0.5, 0.0)).category(),
            Category::Neutral
        );
        assert_eq!(
            decide(&features(0.1, 0.0, 0.0, 0.0, 0.5)).category(),
            Category::Neutral
        );
    }

    #[test]
    fn test_furrow_blocks_happy() {
        let result = decide(&features(0.8, 0.0, 0.35, 0.0, 0.0));
        assert_eq!(result.category(), Category::Angry);
        assert!((result.confidence() - 0.525).abs() < 1e-9);
    }

    #[test]
    fn test_missing_eyebrows_fall_back() {
        let mut bundle = face(Brows::Relaxed, Mouth::Smile);
        bundle.take_region(RegionKind::LeftEyebrow);

        let detailed = classify_detailed(&bundle, &BoundingBox::UNIT);
        assert_eq!(detailed.result, ExpressionResult::FALLBACK);
        assert_eq!(detailed.outcome, Outcome::Fallback);
        assert_eq!(detailed.missing_regions, vec![RegionKind::LeftEyebrow]);
        assert!(detailed.features.is_none());
    }

    #[test]
    fn test_empty_eyebrow_regions_fall_back() {
        let bundle = face(Brows::Relaxed, Mouth::Smile)
            .with_region(RegionKind::LeftEyebrow, LandmarkRegion::default())
            .with_region(RegionKind::RightEyebrow, LandmarkRegion::default());

        for _ in 0..3 {
            let result = classify(&bundle, &BoundingBox::UNIT);
            assert_eq!(result.category(), Category::Neutral);
            assert_eq!(result.confidence(), 0.5);
        }
    }

    #[test]
    fn test_missing_nose_falls_back() {
        let mut bundle = face(Brows::Drawn, Mouth::Rest);
        bundle.take_region(RegionKind::Nose);
        assert_eq!(
            classify_detailed(&bundle, &BoundingBox::UNIT).outcome,
            Outcome::Fallback
        );
    }

    #[test]
    fn test_short_eyebrows_zero_furrow_without_fallback() {
        let bundle = face(Brows::Drawn, Mouth::Rest)
            .with_region(
                RegionKind::LeftEyebrow,
                LandmarkRegion::from_pairs(&[(0.46, 0.71), (0.30, 0.72)]),
            )
            .with_region(
                RegionKind::RightEyebrow,
                LandmarkRegion::from_pairs(&[(0.54, 0.71), (0.70, 0.72)]),
            );

        let detailed = classify_detailed(&bundle, &BoundingBox::UNIT);
        assert_eq!(detailed.outcome, Outcome::Determined);
        assert_eq!(detailed.features.unwrap().eyebrow_furrow, 0.0);
        assert_eq!(detailed.category(), Category::Neutral);
    }

    #[test]
    fn test_translated_bounding_box_keeps_category() {
        let bundle = face(Brows::Relaxed, Mouth::Smile);
        let moved = BoundingBox::new(5.0, 7.0, 1.0, 1.0);
        assert_eq!(classify(&bundle, &moved).category(), Category::Happy);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let bundle = face(Brows::Raised, Mouth::Open);
        let first = classify_detailed(&bundle, &BoundingBox::UNIT);
        let second = classify_detailed(&bundle, &BoundingBox::UNIT);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_decision_confidence_in_unit_range(
            smile in -1.0f64..=1.0,
            raise in 0.0f64..=1.0,
            furrow in 0.0f64..=1.0,
            openness in 0.0f64..=1.0,
            corners_down in 0.0f64..=1.0,
        ) {
            let result = decide(&features(smile, raise, furrow, openness, corners_down));
            prop_assert!((0.0..=1.0).contains(&result.confidence()));
            prop_assert!(result.category().is_classifier_output());
        }

        #[test]
        fn prop_arbitrary_landmarks_never_escape_unit_range(
            points in proptest::collection::vec((-2.0f64..3.0, -2.0f64..3.0), 1..12),
            scale in 0.01f64..500.0,
        ) {
            let r = LandmarkRegion::from_pairs(&points);
            let bundle = RegionKind::REQUIRED
                .into_iter()
                .fold(LandmarkBundle::default(), |b, kind| b.with_region(kind, r.clone()));
            let bbox = BoundingBox::new(0.0, 0.0, scale, scale);
            let result = classify(&bundle, &bbox);
            prop_assert!((0.0..=1.0).contains(&result.confidence()));
        }
    }
}
