#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging utilities for the schemagen pipeline.
//!
//! Library crates emit `tracing` events; binaries call [`init`] once to install
//! a stderr subscriber. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The level or directive string could not be parsed.
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Offending filter
        filter: String,
        /// Parser message
        message: String,
    },
}

/// Build the filter for `level`, preferring `RUST_LOG` when it is set.
pub fn filter_for(level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    EnvFilter::try_new(&directive)
        .map_err(|e| LoggingError::InvalidFilter { filter: directive, message: e.to_string() })
}

/// Install a compact stderr subscriber at `level`.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init(level: &str) -> Result<(), LoggingError> {
    let filter = filter_for(level)?;
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .try_init();
    Ok(())
}

/// Emits a trace event with a module prefix.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module, "{}", msg);
}
