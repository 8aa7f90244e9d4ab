//! Application configuration.
//!
//! The symbol pool table is deliberately absent here: it is a compiled-in
//! constant of `facemoji-ranking`, changeable only by releasing a new build.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FacemojiError, FacemojiResult};

/// Default minimum spacing between classified frames.
pub const DEFAULT_THROTTLE_INTERVAL_MS: u64 = 100;

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frame pipeline settings.
    pub pipeline: PipelineConfig,

    /// Symbol ranking settings.
    pub ranking: RankingConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Frame pipeline parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Frames arriving sooner than this after the last accepted frame are dropped.
    pub throttle_interval_ms: u64,
}

/// Symbol ranking parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Fixed shuffle seed. `None` draws from the thread-local RNG.
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "facemoji_pipeline=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: DEFAULT_THROTTLE_INTERVAL_MS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// See [`AppConfig::load_or_default`]. Callers log the returned error
    /// once their tracing subscriber is installed.
    pub fn load() -> (Self, Option<FacemojiError>) {
        Self::load_or_default(&config_file_path())
    }

    /// Load config from `path`. A missing file yields defaults with no error;
    /// a malformed or invalid file yields defaults plus the reason.
    pub fn load_or_default(path: &Path) -> (Self, Option<FacemojiError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load config from an explicit path. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> FacemojiResult<Self> {
        if !path.exists() {
            return Err(FacemojiError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> FacemojiResult<()> {
        if self.pipeline.throttle_interval_ms == 0 {
            return Err(FacemojiError::config(
                "pipeline.throttle_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> FacemojiResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("facemoji").join("config.json")
}
