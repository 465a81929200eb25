//! Tracing subscriber set-up for the binary.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// The global subscriber could not be installed.
#[derive(Debug, Error)]
#[error("failed to initialise tracing: {0}")]
pub struct TelemetryError(String);

/// Builds the log filter from `RUST_LOG`, falling back to `default_level`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when neither source is a valid directive.
pub fn env_filter(default_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| TelemetryError(err.to_string()))
}

/// Installs the global `fmt` subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] for an invalid filter or when a subscriber is
/// already installed.
pub fn init_tracing(default_level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level)?)
        .with_target(false)
        .try_init()
        .map_err(|err| TelemetryError(err.to_string()))
}
