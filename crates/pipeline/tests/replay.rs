//! Replays the recorded session fixture through the pipeline.

use std::path::PathBuf;

use facemoji_common::clock::FrameThrottle;
use facemoji_expression_model::Category;
use facemoji_pipeline::{load_frames, FrameOutcome, FramePipeline, RecordingSink};
use facemoji_ranking::POOL_TABLE;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name)
}

fn replay(seed: u64) -> (FramePipeline, Vec<FrameOutcome>) {
    let frames = load_frames(&fixture("session.jsonl")).expect("fixture should parse");
    let mut pipeline = FramePipeline::new(FrameThrottle::from_millis(100), Some(seed));
    let outcomes = pipeline.replay(&frames);
    (pipeline, outcomes)
}

#[test]
fn session_detections_follow_the_recording() {
    let (pipeline, outcomes) = replay(1);
    assert_eq!(outcomes.len(), 14);

    let processed: Vec<(u64, Option<Category>)> = outcomes
        .iter()
        .filter(|o| !matches!(o, FrameOutcome::Throttled { .. }))
        .map(|o| (o.timestamp_ms(), o.detection().map(|d| d.classification.category())))
        .collect();
    assert_eq!(
        processed,
        vec![
            (0, Some(Category::Happy)),
            (120, None),
            (240, Some(Category::Sad)),
            (360, Some(Category::Neutral)),
            (480, Some(Category::Surprised)),
            (600, Some(Category::Angry)),
            (720, Some(Category::Neutral)),
        ]
    );

    let stats = pipeline.stats();
    assert_eq!(stats.frames_seen, 14);
    assert_eq!(stats.frames_throttled, 7);
    assert_eq!(stats.frames_no_face, 1);
    assert_eq!(stats.detections_fallback, 1);
    assert_eq!(stats.detections_determined, 5);
    assert!((stats.throttle_rate() - 50.0).abs() < 1e-9);
}

#[test]
fn fallback_frame_is_not_determinable() {
    let (_, outcomes) = replay(2);
    let fallback = outcomes
        .iter()
        .filter_map(FrameOutcome::detection)
        .find(|d| d.timestamp_ms == 360)
        .expect("frame at 360 ms is processed");
    assert!(!fallback.is_determinable());
    assert_eq!(fallback.classification.confidence(), 0.5);
}

#[test]
fn suggestions_come_from_the_category_pool() {
    let (_, outcomes) = replay(3);
    for detection in outcomes.iter().filter_map(FrameOutcome::detection) {
        let category = detection.classification.category();
        let mut allowed: Vec<&str> = POOL_TABLE.pool(category).unwrap().to_vec();
        if category == Category::Happy && detection.classification.confidence() >= 0.7 {
            allowed.extend_from_slice(POOL_TABLE.high_intensity());
        }
        assert!(!detection.suggestions.is_empty());
        for candidate in &detection.suggestions {
            assert!(allowed.contains(&candidate.symbol()));
        }
    }
}

#[test]
fn same_seed_replays_identically() {
    let (_, first) = replay(99);
    let (_, second) = replay(99);
    assert_eq!(first, second);
}

#[test]
fn top_pick_of_every_detection_reaches_the_sink() {
    let (pipeline, outcomes) = replay(4);
    let mut sink = RecordingSink::new();
    for detection in outcomes.iter().filter_map(FrameOutcome::detection) {
        pipeline.select(detection, 0, &mut sink).unwrap();
    }
    assert_eq!(sink.sent().len(), 6);
}
