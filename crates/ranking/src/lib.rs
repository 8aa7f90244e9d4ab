//! Facemoji Symbol Ranking
//!
//! Turns an `(category, confidence)` pair into a short list of emoji:
//! - **Pools:** A compiled-in table of candidate symbols per category
//! - **Ranking:** Shuffle, score by position and intensity, keep the top 3
//!
//! The shuffle is intentional: repeated detections of the same expression
//! should surface different symbols. Callers that need reproducible output
//! pass their own seeded RNG to [`SymbolRanker::rank`].

pub mod pools;
pub mod ranking;

pub use pools::{PoolTable, POOL_TABLE};
pub use ranking::{score_at, top_symbols, IntensityTier, Ranking, SymbolRanker};
