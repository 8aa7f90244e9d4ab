//! Rank symbols for a given expression.

use facemoji_expression_model::{clamp_confidence, Category};
use facemoji_ranking::{IntensityTier, Ranking, SymbolRanker};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Serialize)]
struct SuggestReport<'a> {
    category: Category,
    confidence: f64,
    tier: IntensityTier,
    seed: Option<u64>,
    #[serde(flatten)]
    ranking: &'a Ranking,
}

pub fn run(
    category: Category,
    confidence: f64,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    if confidence.is_nan() {
        anyhow::bail!("Confidence must be a number");
    }

    let ranker = SymbolRanker::new();
    let ranking = match seed {
        Some(seed) => ranker.rank(category, confidence, &mut StdRng::seed_from_u64(seed)),
        None => ranker.rank(category, confidence, &mut rand::thread_rng()),
    };

    let confidence = clamp_confidence(confidence);
    let tier = IntensityTier::from_confidence(confidence);

    if json {
        let report = SuggestReport {
            category,
            confidence,
            tier,
            seed,
            ranking: &ranking,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Suggestions for {category} ({confidence:.2}, {tier:?} intensity):");
    if ranking.high_intensity {
        println!("  (high-intensity symbols mixed in)");
    }
    if ranking.outcome.is_fallback() {
        println!("  (no pool for {category}; showing neutral fallback)");
    }
    for (i, candidate) in ranking.candidates.iter().enumerate() {
        println!(
            "  {}. {}  {:.3}",
            i + 1,
            candidate.symbol(),
            candidate.confidence()
        );
    }

    Ok(())
}
