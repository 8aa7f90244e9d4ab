//! Position- and intensity-weighted symbol ranking.
//!
//! # Algorithm
//!
//! 1. **Select** the pool: the category's pool, or the high-intensity set
//!    plus the Happy pool when Happy is detected at confidence ≥ 0.7.
//! 2. **Shuffle** the pool uniformly with the caller's RNG.
//! 3. **Score** each symbol from its post-shuffle index `i`:
//!    - `position  = max(0.3, 1 − 0.15·i)`
//!    - `intensity = 1 − step·i`, where `step` is 0.2 / 0.1 / 0.05 for the
//!      high / medium / low confidence tier
//!    - `modifier  = clamp(intensity · (0.7 + 0.3·confidence), 0.5, 1.2)`
//!    - `score     = clamp(position · modifier, 0, 1)`
//! 4. **Sort** descending (stable) and keep the first three.

use facemoji_expression_model::{clamp_confidence, Category, Outcome, SymbolCandidate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::pools::{PoolTable, POOL_TABLE};

/// Maximum number of symbols returned.
pub const MAX_SUGGESTIONS: usize = 3;

/// Happy confidence at which the high-intensity set joins the pool.
pub const HIGH_INTENSITY_THRESHOLD: f64 = 0.7;

/// Lower bound of the medium tier.
pub const MEDIUM_INTENSITY_THRESHOLD: f64 = 0.4;

/// Flat confidence for symbols returned by the missing-pool fallback.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

const POSITION_STEP: f64 = 0.15;
const POSITION_FLOOR: f64 = 0.3;
const MODIFIER_MIN: f64 = 0.5;
const MODIFIER_MAX: f64 = 1.2;

/// Confidence band that controls how quickly scores fall off with position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityTier {
    High,
    Medium,
    Low,
}

impl IntensityTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_INTENSITY_THRESHOLD {
            IntensityTier::High
        } else if confidence >= MEDIUM_INTENSITY_THRESHOLD {
            IntensityTier::Medium
        } else {
            IntensityTier::Low
        }
    }

    /// Per-position decrease of the intensity factor.
    pub fn step(self) -> f64 {
        match self {
            IntensityTier::High => 0.2,
            IntensityTier::Medium => 0.1,
            IntensityTier::Low => 0.05,
        }
    }
}

/// Score for the symbol at `index` in a shuffled pool.
pub fn score_at(index: usize, confidence: f64) -> f64 {
    let i = index as f64;
    let position = (1.0 - i * POSITION_STEP).max(POSITION_FLOOR);
    let intensity = 1.0 - i * IntensityTier::from_confidence(confidence).step();
    let modifier = (intensity * (0.7 + confidence * 0.3)).clamp(MODIFIER_MIN, MODIFIER_MAX);
    (position * modifier).clamp(0.0, 1.0)
}

/// Result of one ranking call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    /// At most [`MAX_SUGGESTIONS`] candidates, non-increasing in confidence.
    pub candidates: Vec<SymbolCandidate>,
    pub outcome: Outcome,
    /// Whether the high-intensity set was mixed into the pool.
    pub high_intensity: bool,
    /// Number of symbols that were shuffled and scored.
    pub pool_size: usize,
}

/// Ranks symbols from a pool table.
///
/// Holds no mutable state; the RNG is supplied per call.
#[derive(Debug, Clone, Copy)]
pub struct SymbolRanker {
    table: &'static PoolTable,
}

impl SymbolRanker {
    /// A ranker over the production [`POOL_TABLE`].
    pub fn new() -> Self {
        Self { table: &POOL_TABLE }
    }

    /// A ranker over a custom table.
    pub fn with_table(table: &'static PoolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'static PoolTable {
        self.table
    }

    /// Top symbols using the thread-local RNG.
    pub fn top_symbols(&self, category: Category, confidence: f64) -> Vec<SymbolCandidate> {
        self.rank(category, confidence, &mut rand::thread_rng())
            .candidates
    }

    /// Top symbols using the given RNG.
    pub fn top_symbols_with<R: Rng + ?Sized>(
        &self,
        category: Category,
        confidence: f64,
        rng: &mut R,
    ) -> Vec<SymbolCandidate> {
        self.rank(category, confidence, rng).candidates
    }

    /// Rank symbols for an expression, reporting how the result was reached.
    pub fn rank<R: Rng + ?Sized>(
        &self,
        category: Category,
        confidence: f64,
        rng: &mut R,
    ) -> Ranking {
        let confidence = clamp_confidence(confidence);

        let Some(category_pool) = self.table.pool(category) else {
            warn!(%category, "no symbol pool registered, using neutral fallback");
            return self.fallback();
        };

        let high_intensity =
            category == Category::Happy && confidence >= HIGH_INTENSITY_THRESHOLD;

        let mut pool: Vec<&'static str> = if high_intensity {
            let mut union = self.table.high_intensity().to_vec();
            for symbol in category_pool {
                if !union.contains(symbol) {
                    union.push(*symbol);
                }
            }
            union
        } else {
            category_pool.to_vec()
        };
        pool.shuffle(rng);

        let mut candidates: Vec<SymbolCandidate> = pool
            .iter()
            .enumerate()
            .map(|(i, symbol)| SymbolCandidate::new(*symbol, score_at(i, confidence)))
            .collect();
        // `sort_by` is stable, so equal scores keep their shuffled order.
        candidates.sort_by(|a, b| b.confidence().total_cmp(&a.confidence()));
        candidates.truncate(MAX_SUGGESTIONS);

        debug!(
            %category,
            confidence,
            high_intensity,
            pool_size = pool.len(),
            top = candidates.first().map(SymbolCandidate::symbol),
            "ranked symbols"
        );

        Ranking {
            candidates,
            outcome: Outcome::Determined,
            high_intensity,
            pool_size: pool.len(),
        }
    }

    fn fallback(&self) -> Ranking {
        let candidates = self
            .table
            .pool(Category::Neutral)
            .unwrap_or_default()
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|symbol| SymbolCandidate::new(*symbol, FALLBACK_CONFIDENCE))
            .collect();

        Ranking {
            candidates,
            outcome: Outcome::Fallback,
            high_intensity: false,
            pool_size: 0,
        }
    }
}

impl Default for SymbolRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// Top symbols from the production table using the thread-local RNG.
pub fn top_symbols(category: Category, confidence: f64) -> Vec<SymbolCandidate> {
    SymbolRanker::new().top_symbols(category, confidence)
}
