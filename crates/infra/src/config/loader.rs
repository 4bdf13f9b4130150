//! Configuration loader
//!
//! Loads engine configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Every loaded configuration is validated before it is returned.
//!
//! ## Environment Variables
//! - `WEEKENDER_TIME_ZONE`: IANA time zone name (required for env loading)
//! - `WEEKENDER_SNOOZE_MINUTES`: Snooze delay in minutes
//! - `WEEKENDER_MAX_EVENT_REMINDERS`: Cap on per-event reminders
//! - `WEEKENDER_ALL_DAY_REMINDER_HOUR`: Local hour for all-day plan reminders
//! - `WEEKENDER_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `WEEKENDER_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./weekender.json` or `./weekender.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use weekender_domain::{Config, LoggingConfig, NotificationConfig, Result, WeekenderError};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `WeekenderError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value is out of range
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Like [`load`], but falls back to defaults when no source is present.
///
/// Invalid configuration is still an error; only a missing one is defaulted.
///
/// # Errors
/// Returns `WeekenderError::Config` if a source exists but is invalid.
pub fn load_or_default() -> Result<Config> {
    if let Ok(config) = load_from_env() {
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `WEEKENDER_TIME_ZONE` must be present; every other variable falls back to
/// its default.
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `WeekenderError::Config` if the required variable is missing or a
/// value is invalid.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let time_zone = env_var("WEEKENDER_TIME_ZONE")?;
    let snooze_minutes = env_parse(
        "WEEKENDER_SNOOZE_MINUTES",
        defaults.notifications.snooze_minutes,
        "snooze minutes",
    )?;
    let max_event_reminders = env_parse(
        "WEEKENDER_MAX_EVENT_REMINDERS",
        defaults.notifications.max_event_reminders,
        "max event reminders",
    )?;
    let all_day_reminder_hour = env_parse(
        "WEEKENDER_ALL_DAY_REMINDER_HOUR",
        defaults.notifications.all_day_reminder_hour,
        "all-day reminder hour",
    )?;

    let level = std::env::var("WEEKENDER_LOG_LEVEL").unwrap_or(defaults.logging.level);
    let json = env_bool("WEEKENDER_LOG_JSON", defaults.logging.json);

    let config = Config {
        notifications: NotificationConfig {
            time_zone,
            snooze_minutes,
            max_event_reminders,
            all_day_reminder_hour,
        },
        logging: LoggingConfig { level, json },
    };
    config.notifications.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `WeekenderError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value is out of range
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WeekenderError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WeekenderError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(InfraError::from)?;
    let config = parse_config(&contents, &config_path)?;
    config.notifications.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `WeekenderError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| InfraError::from(e).into()),
        _ => Err(WeekenderError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./weekender.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_paths(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_paths(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_paths(base: &Path) -> Vec<PathBuf> {
    [
        "config.json",
        "config.toml",
        "weekender.json",
        "weekender.toml",
        "../config.json",
        "../config.toml",
        "../../config.json",
        "../../config.toml",
    ]
    .iter()
    .map(|name| base.join(name))
    .collect()
}

/// Get required environment variable
///
/// # Errors
/// Returns `WeekenderError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        WeekenderError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, using `default` when unset.
///
/// # Errors
/// Returns `WeekenderError::Config` if the variable is set but unparsable.
fn env_parse<T>(key: &str, default: T, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| WeekenderError::Config(format!("Invalid {}: {}", what, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
