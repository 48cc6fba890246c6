//! Tracing initialization.
//!
//! Reads the `WSP_LOG` environment variable for log levels
//! (e.g. `WSP_LOG=weekly_sales=debug`) and falls back to `weekly_sales=info`.
//!
//! The TUI owns the terminal while it runs, so it logs to a file or not at all;
//! one-shot commands log to stderr and keep stdout for results.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{AppError, EXIT_ARTIFACT};

pub const LOG_ENV: &str = "WSP_LOG";
const DEFAULT_FILTER: &str = "weekly_sales=info";

static INIT: Once = Once::new();

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr. Idempotent.
pub fn init_stderr() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter())
            .init();
    });
}

/// Append logs to `path`. Idempotent.
pub fn init_file(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AppError::new(
                EXIT_ARTIFACT,
                format!("Failed to open log file '{}': {e}", path.display()),
            )
        })?;

    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .with(filter())
            .init();
    });
    Ok(())
}
