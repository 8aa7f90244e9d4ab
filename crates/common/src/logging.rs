//! Logging and tracing initialization.
//!
//! Human-readable logs go to stderr so that CLI output on stdout stays
//! machine-parseable. When `LoggingConfig::file` is set, logs are appended
//! to that file instead.

use std::fs::OpenOptions;
use std::sync::Mutex;

use crate::config::LoggingConfig;
use crate::error::FacemojiResult;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. Only the first call in a
/// process installs a subscriber; later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) -> FacemojiResult<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match (&config.file, config.json) {
        (Some(path), json) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if json {
                tracing::subscriber::set_global_default(builder.json().finish()).ok();
            } else {
                tracing::subscriber::set_global_default(builder.finish()).ok();
            }
        }
        (None, true) => {
            let subscriber = builder.with_writer(std::io::stderr).json().finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (None, false) => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }

    Ok(())
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    // The default config has no log file, so initialization cannot fail.
    let _ = init_logging(&LoggingConfig::default());
}
