// src/logging.rs
//! Logging macros and subscriber setup.
//!
//! All crate logging goes through `app_log!` so every event lands on the
//! `resume_tailor` target regardless of the module it was emitted from.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_TARGET: &str = "resume_tailor";
const DEFAULT_DIRECTIVE: &str = "resume_tailor=debug";

/// `app_log!(info, "Calling {}", url)`
#[macro_export]
macro_rules! app_log {
    (trace, $($arg:tt)+) => { ::tracing::trace!(target: $crate::logging::LOG_TARGET, $($arg)+) };
    (debug, $($arg:tt)+) => { ::tracing::debug!(target: $crate::logging::LOG_TARGET, $($arg)+) };
    (info, $($arg:tt)+) => { ::tracing::info!(target: $crate::logging::LOG_TARGET, $($arg)+) };
    (warn, $($arg:tt)+) => { ::tracing::warn!(target: $crate::logging::LOG_TARGET, $($arg)+) };
    (error, $($arg:tt)+) => { ::tracing::error!(target: $crate::logging::LOG_TARGET, $($arg)+) };
}

/// `app_span!("score", run_id = %id)`, always at info level
#[macro_export]
macro_rules! app_span {
    ($name:expr $(, $($fields:tt)*)?) => {
        ::tracing::info_span!(target: $crate::logging::LOG_TARGET, $name $(, $($fields)*)?)
    };
}

/// Install the global subscriber: JSON lines into `log_file` (truncated on
/// startup), filtered by `RUST_LOG` when set.
pub fn init_tracing(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))
        .context("Invalid log directive")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(false),
        )
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
