//! Error types shared across Facemoji crates.
//!
//! The classifier and ranking engine never fail; these errors only arise at
//! the I/O edge (config files, frame streams, selection relays).

use std::path::PathBuf;

/// Top-level error type for Facemoji operations.
#[derive(Debug, thiserror::Error)]
pub enum FacemojiError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Frame error: {message}")]
    Frame { message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using FacemojiError.
pub type FacemojiResult<T> = Result<T, FacemojiError>;

impl FacemojiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn frame(msg: impl Into<String>) -> Self {
        Self::Frame {
            message: msg.into(),
        }
    }

    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline {
            message: msg.into(),
        }
    }
}
