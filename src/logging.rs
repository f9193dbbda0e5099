//! Logging setup.
//!
//! Logs go to stderr for the one-shot commands. The TUI owns the terminal, so
//! it only logs when a log file is given.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

/// Where log lines should go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init_logging(target: LogTarget<'_>, level: &str) -> Result<(), AppError> {
    let default_filter = format!("inequality_report={level}");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(false),
            )
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
        }
    };

    // A subscriber may already be installed (e.g. by a test harness).
    if let Err(e) = result {
        eprintln!("Warning: logging not initialized: {e}");
    }

    tracing::debug!(level, "logging initialized");
    Ok(())
}
