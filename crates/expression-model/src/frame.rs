//! Per-frame detector output.
//!
//! Frame streams are stored as JSON Lines, one [`FrameInput`] per line:
//!
//! ```text
//! # recorded 2026-03-02 front camera
//! {"t":0,"faces":[{"bounding_box":{...},"landmarks":{...}}]}
//! {"t":33,"faces":[]}
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;
use crate::landmarks::LandmarkBundle;

/// One face as located by the external landmark detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub landmarks: LandmarkBundle,
}

impl DetectedFace {
    pub fn new(bounding_box: BoundingBox, landmarks: LandmarkBundle) -> Self {
        Self {
            bounding_box,
            landmarks,
        }
    }
}

/// Detector output for a single camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Milliseconds since the start of the stream.
    #[serde(rename = "t")]
    pub timestamp_ms: u64,

    /// Faces in detector order. Empty when no face was found.
    #[serde(default)]
    pub faces: Vec<DetectedFace>,
}

impl FrameInput {
    pub fn with_face(timestamp_ms: u64, face: DetectedFace) -> Self {
        Self {
            timestamp_ms,
            faces: vec![face],
        }
    }

    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            faces: Vec::new(),
        }
    }

    /// The face the pipeline classifies. Additional faces are ignored.
    pub fn primary_face(&self) -> Option<&DetectedFace> {
        self.faces.first()
    }
}

/// Parse frames from JSONL content, skipping blank and `#` comment lines.
pub fn parse_frames(jsonl: &str) -> Result<Vec<FrameInput>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[FrameInput]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{LandmarkRegion, RegionKind};

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let jsonl = "# header\n\n{\"t\":0}\n{\"t\":40,\"faces\":[]}\n";
        let frames = parse_frames(jsonl).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].timestamp_ms, 40);
        assert!(frames[0].primary_face().is_none());
    }

    #[test]
    fn test_primary_face_is_first() {
        let first = DetectedFace::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), Default::default());
        let second = DetectedFace::new(BoundingBox::new(50.0, 0.0, 10.0, 10.0), Default::default());
        let frame = FrameInput {
            timestamp_ms: 0,
            faces: vec![first.clone(), second],
        };
        assert_eq!(frame.primary_face(), Some(&first));
    }

    #[test]
    fn test_frame_jsonl_keeps_landmarks() {
        let landmarks = LandmarkBundle::default()
            .with_region(RegionKind::Nose, LandmarkRegion::from_pairs(&[(0.5, 0.5)]));
        let frames = vec![
            FrameInput::with_face(0, DetectedFace::new(BoundingBox::UNIT, landmarks)),
            FrameInput::empty(120),
        ];
        let jsonl = serialize_frames(&frames).unwrap();
        assert!(jsonl.lines().next().unwrap().starts_with("{\"t\":0"));
        assert_eq!(parse_frames(&jsonl).unwrap(), frames);
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        assert!(parse_frames("{\"t\":0}\n{\"t\":\"soon\"}\n").is_err());
    }
}
