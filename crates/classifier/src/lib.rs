//! Facemoji Expression Classifier
//!
//! Reduces one face's landmark regions to a single expression category:
//! - **Features:** Five scalar measurements of mouth and brow geometry
//! - **Decision:** Ordered threshold rules, first match wins
//!
//! This crate is pure computation with no I/O and no shared state. Every input,
//! including an incomplete face, yields a usable [`ExpressionResult`].
//!
//! [`ExpressionResult`]: facemoji_expression_model::ExpressionResult

pub mod classifier;
pub mod features;

pub use classifier::{classify, classify_detailed, decide, Classification};
pub use features::{extract_features, FeatureSet};
