//! Ranked symbol candidates.

use serde::{Deserialize, Serialize};

use crate::expression::clamp_confidence;

/// One expressive symbol (a single grapheme, usually an emoji) with the
/// ranking engine's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSymbolCandidate")]
pub struct SymbolCandidate {
    symbol: String,
    confidence: f64,
}

#[derive(Deserialize)]
struct RawSymbolCandidate {
    symbol: String,
    confidence: f64,
}

impl From<RawSymbolCandidate> for SymbolCandidate {
    fn from(raw: RawSymbolCandidate) -> Self {
        SymbolCandidate::new(raw.symbol, raw.confidence)
    }
}

impl SymbolCandidate {
    /// Build a candidate; the confidence is clamped into `[0, 1]`.
    pub fn new(symbol: impl Into<String>, confidence: f64) -> Self {
        Self {
            symbol: symbol.into(),
            confidence: clamp_confidence(confidence),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_clamps() {
        assert_eq!(SymbolCandidate::new("😀", 1.2).confidence(), 1.0);
        assert_eq!(SymbolCandidate::new("😀", -1.0).confidence(), 0.0);
    }

    #[test]
    fn test_candidate_json() {
        let candidate = SymbolCandidate::new("😮", 0.85);
        let json = serde_json::to_string(&candidate).unwrap();
        assert_eq!(json, r#"{"symbol":"😮","confidence":0.85}"#);
    }
}
