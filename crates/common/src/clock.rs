//! Session timing and frame throttling.
//!
//! Frame timestamps are milliseconds relative to a session epoch. Live
//! callers stamp frames with [`SessionClock`]; replayed streams carry their
//! own timestamps. Either way [`FrameThrottle`] decides which frames reach
//! the classifier.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_THROTTLE_INTERVAL_MS;

/// Milliseconds since a session epoch.
pub type TimestampMs = u64;

/// A monotonic clock anchored at the start of a detection session.
#[derive(Debug, Clone)]
pub struct SessionClock {
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since the session started.
    pub fn elapsed_ms(&self) -> TimestampMs {
        self.epoch.elapsed().as_millis() as TimestampMs
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

/// Drops frames that arrive sooner than a fixed interval after the last
/// accepted frame.
///
/// Rejected frames do not move the reference point, so a steady 60 fps
/// stream against a 100 ms interval yields one accepted frame every
/// seventh frame rather than starving forever.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval_ms: u64,
    last_accepted_ms: Option<TimestampMs>,
}

impl FrameThrottle {
    /// Create a throttle with the given minimum spacing.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: interval.as_millis() as u64,
            last_accepted_ms: None,
        }
    }

    /// Create a throttle from a millisecond interval.
    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accepted_ms: None,
        }
    }

    /// Returns true and records the frame if it may be processed.
    /// The first frame is always accepted. Timestamps that go backwards are
    /// treated as too soon.
    pub fn try_accept(&mut self, now_ms: TimestampMs) -> bool {
        match self.last_accepted_ms {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms || now_ms < last => false,
            _ => {
                self.last_accepted_ms = Some(now_ms);
                true
            }
        }
    }

    /// Forget the last accepted frame.
    pub fn reset(&mut self) {
        self.last_accepted_ms = None;
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_accepted_ms(&self) -> Option<TimestampMs> {
        self.last_accepted_ms
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::from_millis(DEFAULT_THROTTLE_INTERVAL_MS)
    }
}
