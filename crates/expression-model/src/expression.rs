//! Expression categories and classification results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discrete emotional category.
///
/// The classifier produces only the first five variants. `Disgusted` and
/// `Fearful` exist because the symbol pool table carries entries for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Happy,
    Sad,
    Surprised,
    Angry,
    Neutral,
    Disgusted,
    Fearful,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Happy,
        Category::Sad,
        Category::Surprised,
        Category::Angry,
        Category::Neutral,
        Category::Disgusted,
        Category::Fearful,
    ];

    /// Whether the classifier's decision rule can ever yield this category.
    pub fn is_classifier_output(self) -> bool {
        !matches!(self, Category::Disgusted | Category::Fearful)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Happy => "happy",
            Category::Sad => "sad",
            Category::Surprised => "surprised",
            Category::Angry => "angry",
            Category::Neutral => "neutral",
            Category::Disgusted => "disgusted",
            Category::Fearful => "fearful",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown expression category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Clamp a confidence into `[0, 1]`. Non-finite values become 0.0, except
/// positive infinity which saturates to 1.0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Whether a result came from the nominal path or a defined default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Determined,
    Fallback,
}

impl Outcome {
    pub fn is_fallback(self) -> bool {
        self == Outcome::Fallback
    }
}

/// A category paired with a confidence that is always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawExpressionResult")]
pub struct ExpressionResult {
    category: Category,
    confidence: f64,
}

#[derive(Deserialize)]
struct RawExpressionResult {
    category: Category,
    confidence: f64,
}

impl From<RawExpressionResult> for ExpressionResult {
    fn from(raw: RawExpressionResult) -> Self {
        ExpressionResult::new(raw.category, raw.confidence)
    }
}

impl ExpressionResult {
    /// The result used when a face lacks a required landmark region.
    pub const FALLBACK: ExpressionResult = ExpressionResult {
        category: Category::Neutral,
        confidence: 0.5,
    };

    /// Build a result; the confidence is clamped into `[0, 1]`.
    pub fn new(category: Category, confidence: f64) -> Self {
        Self {
            category,
            confidence: clamp_confidence(confidence),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl fmt::Display for ExpressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.category, self.confidence)
    }
}
