//! Classify one detected face.

use std::path::PathBuf;

use facemoji_classifier::classify_detailed;
use facemoji_expression_model::DetectedFace;

pub fn run(file: PathBuf, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", file.display()))?;
    let face: DetectedFace = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid face JSON in {}: {e}", file.display()))?;

    let classification = classify_detailed(&face.landmarks, &face.bounding_box);

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!("Expression: {}", classification.result);
    println!("  Outcome: {:?}", classification.outcome);

    if !classification.missing_regions.is_empty() {
        println!("  Missing regions:");
        for region in &classification.missing_regions {
            println!("    - {region:?}");
        }
    }

    if let Some(f) = &classification.features {
        println!();
        println!("Features:");
        println!("  Smile score:        {:+.3}", f.smile_score);
        println!("  Eyebrow raise:      {:.3}", f.eyebrow_raise);
        println!("  Eyebrow furrow:     {:.3}", f.eyebrow_furrow);
        println!("  Mouth openness:     {:.3}", f.mouth_openness);
        println!("  Mouth corners down: {:.3}", f.mouth_corners_down);
    }

    Ok(())
}
