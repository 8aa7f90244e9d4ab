//! Facemoji Frame Pipeline
//!
//! Connects a landmark detector's per-frame output to the classifier and
//! the symbol ranker, and relays the user's pick to a [`SelectionSink`].
//! Frames closer together than the throttle interval are dropped before
//! classification.

pub mod pipeline;
pub mod sink;

pub use pipeline::{load_frames, Detection, FrameOutcome, FramePipeline, PipelineStats};
pub use sink::{RecordingSink, SelectionSink, WriterSink};
