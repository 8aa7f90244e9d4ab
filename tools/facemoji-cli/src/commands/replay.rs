//! Replay a recorded frame stream through the pipeline.

use std::io::Write;
use std::path::PathBuf;

use facemoji_common::clock::FrameThrottle;
use facemoji_common::config::AppConfig;
use facemoji_pipeline::{load_frames, FrameOutcome, FramePipeline, WriterSink};

pub fn run(
    config: &AppConfig,
    file: PathBuf,
    seed: Option<u64>,
    interval_ms: Option<u64>,
    pick: bool,
    json: bool,
) -> anyhow::Result<()> {
    let interval_ms = interval_ms.unwrap_or(config.pipeline.throttle_interval_ms);
    if interval_ms == 0 {
        anyhow::bail!("--interval-ms must be greater than zero");
    }

    let frames = load_frames(&file)
        .map_err(|e| anyhow::anyhow!("Failed to load frames from {}: {e}", file.display()))?;
    tracing::info!(frames = frames.len(), interval_ms, "replaying {}", file.display());

    let mut pipeline = FramePipeline::new(
        FrameThrottle::from_millis(interval_ms),
        seed.or(config.ranking.seed),
    );
    let mut sink = WriterSink::new(std::io::stdout());

    for frame in &frames {
        let outcome = pipeline.process(frame);

        if json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            print_outcome(&outcome);
        }

        if pick {
            if let Some(detection) = outcome.detection() {
                if !detection.suggestions.is_empty() {
                    print!("    picked: ");
                    std::io::stdout().flush()?;
                    pipeline.select(detection, 0, &mut sink)?;
                }
            }
        }
    }

    if json {
        return Ok(());
    }

    let stats = pipeline.stats();
    println!();
    println!("Replay summary:");
    println!("  Frames:      {}", stats.frames_seen);
    println!(
        "  Throttled:   {} ({:.1}%)",
        stats.frames_throttled,
        stats.throttle_rate()
    );
    println!("  No face:     {}", stats.frames_no_face);
    println!("  Determined:  {}", stats.detections_determined);
    println!("  Fallback:    {}", stats.detections_fallback);

    Ok(())
}

fn print_outcome(outcome: &FrameOutcome) {
    match outcome {
        FrameOutcome::Throttled { timestamp_ms } => {
            println!("{timestamp_ms:>8} ms  throttled");
        }
        FrameOutcome::NoFace { timestamp_ms } => {
            println!("{timestamp_ms:>8} ms  no face");
        }
        FrameOutcome::Detected(detection) => {
            let symbols: Vec<&str> = detection.suggestions.iter().map(|c| c.symbol()).collect();
            let marker = if detection.is_determinable() {
                ""
            } else {
                "  [fallback]"
            };
            println!(
                "{:>8} ms  {}  {}{marker}",
                detection.timestamp_ms,
                detection.classification.result,
                symbols.join(" ")
            );
        }
    }
}
