//! Configuration management

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALL_DAY_REMINDER_HOUR, DEFAULT_MAX_EVENT_REMINDERS, DEFAULT_SNOOZE_MINUTES,
};
use crate::errors::{Result, WeekenderError};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reminder engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// IANA time zone the local calendar is evaluated in.
    pub time_zone: String,
    pub snooze_minutes: u32,
    pub max_event_reminders: usize,
    pub all_day_reminder_hour: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            time_zone: "UTC".to_string(),
            snooze_minutes: DEFAULT_SNOOZE_MINUTES,
            max_event_reminders: DEFAULT_MAX_EVENT_REMINDERS,
            all_day_reminder_hour: DEFAULT_ALL_DAY_REMINDER_HOUR,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

impl NotificationConfig {
    /// Resolve the configured time zone.
    ///
    /// # Errors
    /// Returns `WeekenderError::Config` for names `chrono-tz` does not know.
    pub fn tz(&self) -> Result<Tz> {
        self.time_zone.parse::<Tz>().map_err(|e| {
            WeekenderError::Config(format!("Unknown time zone {:?}: {}", self.time_zone, e))
        })
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns `WeekenderError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.snooze_minutes == 0 {
            return Err(WeekenderError::Config("snooze_minutes must be positive".into()));
        }
        if self.all_day_reminder_hour > 23 {
            return Err(WeekenderError::Config(format!(
                "all_day_reminder_hour must be 0-23, got {}",
                self.all_day_reminder_hour
            )));
        }
        Ok(())
    }
}
