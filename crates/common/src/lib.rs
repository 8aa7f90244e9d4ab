//! Facemoji Common Utilities
//!
//! Shared infrastructure for all Facemoji crates:
//! - Error types and result aliases
//! - Frame throttling and session timing
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
