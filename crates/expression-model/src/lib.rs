//! Facemoji Expression Model
//!
//! Defines the data contracts shared by the classifier, the ranking engine,
//! and the frame pipeline:
//! - **Geometry:** Points and face bounding boxes
//! - **Landmarks:** Ordered landmark regions grouped into a per-face bundle
//! - **Expression:** Categories, clamped confidences, and outcome tags
//! - **Symbols:** Ranked symbol candidates
//! - **Frames:** Per-frame detector output, readable from JSON Lines
//!
//! Landmark coordinates are normalized to `[0.0, 1.0]` relative to the face
//! bounding box and are de-normalized through [`BoundingBox::denormalize`].

pub mod expression;
pub mod frame;
pub mod geometry;
pub mod landmarks;
pub mod symbol;

pub use expression::*;
pub use frame::*;
pub use geometry::*;
pub use landmarks::*;
pub use symbol::*;
