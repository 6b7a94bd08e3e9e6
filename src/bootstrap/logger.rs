//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after runtime settings are resolved. The
//! failure boundary writes its categorized `<Category>: <message>` lines
//! through this subscriber, so the operational log is whatever sink is
//! configured here — stderr by default, or an append-mode file.

use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Initialise the global tracing subscriber.
///
/// `level` accepts `EnvFilter` directives, typically a plain level string
/// (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
///
/// If `prefer_level` is `true` (a CLI `-v` flag was given), `level` wins and
/// `RUST_LOG` is only a fallback. Otherwise `RUST_LOG` wins and `level` is
/// the fallback.
pub fn init(level: &str, prefer_level: bool, log_file: Option<&Path>) -> Result<(), AppError> {
    let from_level = EnvFilter::try_new(level);
    let from_env = EnvFilter::try_from_default_env();

    let filter = match (prefer_level, from_level, from_env) {
        // CLI-forced level wins; RUST_LOG only rescues an invalid value.
        (true, Ok(f), _) => f,
        (true, Err(_), Ok(f)) => f,
        // Default: RUST_LOG wins, configured level is the fallback.
        (false, _, Ok(f)) => f,
        (false, Ok(f), Err(_)) => f,
        (_, Err(e), Err(_)) => {
            return Err(AppError::Logger(format!("invalid log level '{level}': {e}")));
        }
    };

    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(open_log_file(path)?),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File, AppError> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AppError::Logger(format!("failed to open log file '{}': {e}", path.display()))
        })
}

/// Parse a log level string into a [`LevelFilter`], returning an error on
/// unrecognised values. Useful for validating config before initialising.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}
