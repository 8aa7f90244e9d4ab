//! The frame pipeline.
//!
//! For each frame the pipeline:
//! 1. Asks the [`FrameThrottle`] whether the frame may be processed
//! 2. Takes the primary face, reporting `NoFace` when there is none
//! 3. Classifies the face
//! 4. Ranks symbols for the classified expression
//!
//! The pipeline owns the ranking RNG. A configured seed makes a replayed
//! stream produce the same suggestions every run.

use std::path::Path;

use facemoji_classifier::{classify_detailed, Classification};
use facemoji_common::clock::{FrameThrottle, SessionClock, TimestampMs};
use facemoji_common::config::AppConfig;
use facemoji_common::error::{FacemojiError, FacemojiResult};
use facemoji_expression_model::{parse_frames, DetectedFace, FrameInput, Outcome, SymbolCandidate};
use facemoji_ranking::SymbolRanker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::sink::SelectionSink;

/// A classified face with its ranked suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub timestamp_ms: TimestampMs,
    pub classification: Classification,
    pub suggestions: Vec<SymbolCandidate>,
    pub ranking_outcome: Outcome,
}

impl Detection {
    /// False when the classifier fell back because landmarks were missing.
    pub fn is_determinable(&self) -> bool {
        !self.classification.outcome.is_fallback()
    }
}

/// What happened to one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameOutcome {
    /// Arrived too soon after the last processed frame.
    Throttled { timestamp_ms: TimestampMs },
    /// Processed, but the detector found no face.
    NoFace { timestamp_ms: TimestampMs },
    Detected(Detection),
}

impl FrameOutcome {
    pub fn timestamp_ms(&self) -> TimestampMs {
        match self {
            FrameOutcome::Throttled { timestamp_ms } | FrameOutcome::NoFace { timestamp_ms } => {
                *timestamp_ms
            }
            FrameOutcome::Detected(detection) => detection.timestamp_ms,
        }
    }

    pub fn detection(&self) -> Option<&Detection> {
        match self {
            FrameOutcome::Detected(detection) => Some(detection),
            _ => None,
        }
    }
}

/// Running counters for a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Frames handed to the pipeline.
    pub frames_seen: u64,

    /// Frames dropped by the throttle.
    pub frames_throttled: u64,

    /// Processed frames without a face.
    pub frames_no_face: u64,

    /// Faces classified through the missing-region fallback.
    pub detections_fallback: u64,

    /// Faces classified from their features.
    pub detections_determined: u64,
}

impl PipelineStats {
    pub fn detections(&self) -> u64 {
        self.detections_fallback + self.detections_determined
    }

    /// Throttled frames as a percentage of frames seen.
    pub fn throttle_rate(&self) -> f64 {
        if self.frames_seen == 0 {
            return 0.0;
        }
        self.frames_throttled as f64 / self.frames_seen as f64 * 100.0
    }
}

/// Drives frames through throttle, classifier, and ranker.
#[derive(Debug)]
pub struct FramePipeline {
    throttle: FrameThrottle,
    ranker: SymbolRanker,
    rng: StdRng,
    stats: PipelineStats,
}

impl FramePipeline {
    /// Create a pipeline. Without a seed the RNG is seeded from the OS.
    pub fn new(throttle: FrameThrottle, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            throttle,
            ranker: SymbolRanker::new(),
            rng,
            stats: PipelineStats::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            FrameThrottle::from_millis(config.pipeline.throttle_interval_ms),
            config.ranking.seed,
        )
    }

    /// Replace the ranker, e.g. to rank from a different pool table.
    pub fn with_ranker(mut self, ranker: SymbolRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// Process one frame.
    pub fn process(&mut self, frame: &FrameInput) -> FrameOutcome {
        let timestamp_ms = frame.timestamp_ms;
        self.stats.frames_seen += 1;

        if !self.throttle.try_accept(timestamp_ms) {
            self.stats.frames_throttled += 1;
            return FrameOutcome::Throttled { timestamp_ms };
        }

        let Some(face) = frame.primary_face() else {
            self.stats.frames_no_face += 1;
            debug!(timestamp_ms, "no face in frame");
            return FrameOutcome::NoFace { timestamp_ms };
        };

        if frame.faces.len() > 1 {
            debug!(
                timestamp_ms,
                faces = frame.faces.len(),
                "multiple faces, using the first"
            );
        }

        FrameOutcome::Detected(self.detect(timestamp_ms, face))
    }

    /// Stamp a live frame with the session clock and process it.
    pub fn process_live(
        &mut self,
        clock: &SessionClock,
        face: Option<&DetectedFace>,
    ) -> FrameOutcome {
        let frame = FrameInput {
            timestamp_ms: clock.elapsed_ms(),
            faces: face.cloned().into_iter().collect(),
        };
        self.process(&frame)
    }

    /// Process a recorded stream in order.
    pub fn replay(&mut self, frames: &[FrameInput]) -> Vec<FrameOutcome> {
        let outcomes: Vec<_> = frames.iter().map(|frame| self.process(frame)).collect();
        info!(
            frames = self.stats.frames_seen,
            detections = self.stats.detections(),
            throttled = self.stats.frames_throttled,
            "replay finished"
        );
        outcomes
    }

    /// Relay the candidate at `index` of a detection to a sink.
    pub fn select<S: SelectionSink + ?Sized>(
        &self,
        detection: &Detection,
        index: usize,
        sink: &mut S,
    ) -> FacemojiResult<()> {
        let candidate = detection.suggestions.get(index).ok_or_else(|| {
            FacemojiError::pipeline(format!(
                "suggestion {index} out of range ({} available)",
                detection.suggestions.len()
            ))
        })?;
        debug!(
            timestamp_ms = detection.timestamp_ms,
            symbol = candidate.symbol(),
            "relaying selection"
        );
        sink.send(candidate.symbol())
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Clear counters and throttle state. The RNG is not reseeded.
    pub fn reset(&mut self) {
        self.throttle.reset();
        self.stats = PipelineStats::default();
    }

    fn detect(&mut self, timestamp_ms: TimestampMs, face: &DetectedFace) -> Detection {
        let classification = classify_detailed(&face.landmarks, &face.bounding_box);
        match classification.outcome {
            Outcome::Determined => self.stats.detections_determined += 1,
            Outcome::Fallback => self.stats.detections_fallback += 1,
        }

        let ranking = self.ranker.rank(
            classification.category(),
            classification.confidence(),
            &mut self.rng,
        );

        debug!(
            timestamp_ms,
            category = %classification.category(),
            confidence = classification.confidence(),
            fallback = classification.outcome.is_fallback(),
            suggestions = ranking.candidates.len(),
            "frame classified"
        );

        Detection {
            timestamp_ms,
            classification,
            suggestions: ranking.candidates,
            ranking_outcome: ranking.outcome,
        }
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Read a JSON Lines frame stream from disk.
pub fn load_frames(path: &Path) -> FacemojiResult<Vec<FrameInput>> {
    if !path.exists() {
        return Err(FacemojiError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_frames(&content)
        .map_err(|e| FacemojiError::frame(format!("{}: {e}", path.display())))
}
