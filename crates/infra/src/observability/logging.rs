//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use weekender_domain::{LoggingConfig, Result, WeekenderError};

/// Filter from `RUST_LOG`, falling back to the configured level.
///
/// # Errors
/// Returns `WeekenderError::Config` if the configured level is not a valid
/// filter directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            WeekenderError::Config(format!("Invalid log level {:?}: {}", config.level, e))
        }),
    }
}

/// Install the global fmt subscriber, as JSON lines when configured.
///
/// Calling this again after a subscriber is installed is a no-op.
///
/// # Errors
/// Returns `WeekenderError::Config` if the level is invalid.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    match installed {
        Ok(()) => tracing::debug!(level = %config.level, json = config.json, "tracing initialised"),
        Err(_) => tracing::debug!("tracing subscriber already installed"),
    }
    Ok(())
}
