//! Facemoji CLI: classify faces and suggest matching emoji.
//!
//! Usage:
//!   facemoji classify <FILE>                    Classify one detected face (JSON)
//!   facemoji suggest <CATEGORY> <CONFIDENCE>    Rank symbols for an expression
//!   facemoji replay <FILE>                      Run a JSONL frame stream through the pipeline
//!   facemoji pools                              Show the symbol pool table
//!   facemoji init-config                        Write the default configuration file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use facemoji_common::config::AppConfig;
use facemoji_expression_model::Category;

mod commands;

#[derive(Parser)]
#[command(
    name = "facemoji",
    about = "Facial expression classification and emoji suggestions",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $XDG_CONFIG_HOME/facemoji/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single detected face
    Classify {
        /// JSON file holding a bounding box and landmark regions
        file: PathBuf,

        /// Print the full classification as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank symbols for an expression
    Suggest {
        /// Expression category (happy, sad, surprised, angry, neutral, disgusted, fearful)
        category: Category,

        /// Classifier confidence in [0.0, 1.0]; out-of-range values are clamped
        #[arg(allow_hyphen_values = true)]
        confidence: f64,

        /// Shuffle seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a recorded frame stream
    Replay {
        /// JSON Lines file, one frame per line
        file: PathBuf,

        /// Shuffle seed for reproducible suggestions
        #[arg(long)]
        seed: Option<u64>,

        /// Minimum spacing between classified frames (milliseconds)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Relay the top suggestion of every detection to stdout
        #[arg(long)]
        pick: bool,

        /// Print one JSON object per frame instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the symbol pool table
    Pools,

    /// Write the default configuration file
    InitConfig {
        /// Output path (defaults to the standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match &cli.config {
        Some(path) => {
            let config = AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?;
            (config, None)
        }
        None => AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Err(e) = facemoji_common::logging::init_logging(&logging) {
        facemoji_common::logging::init_default_logging();
        tracing::warn!("Falling back to stderr logging: {e}");
    }
    if let Some(e) = config_error {
        tracing::warn!(
            "Ignoring config at {}, using defaults: {e}",
            facemoji_common::config::config_file_path().display()
        );
    }

    match cli.command {
        Commands::Classify { file, json } => commands::classify::run(file, json),
        Commands::Suggest {
            category,
            confidence,
            seed,
            json,
        } => commands::suggest::run(category, confidence, seed.or(config.ranking.seed), json),
        Commands::Replay {
            file,
            seed,
            interval_ms,
            pick,
            json,
        } => commands::replay::run(&config, file, seed, interval_ms, pick, json),
        Commands::Pools => commands::pools::run(),
        Commands::InitConfig { output, force } => commands::init_config::run(output, force),
    }
}
