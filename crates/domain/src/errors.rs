//! Error types used throughout the reminder engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Weekender
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WeekenderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notification store error: {0}")]
    Store(String),

    #[error("Permission error: {0}")]
    Permission(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WeekenderError {
    /// Stable label suitable for structured logging fields.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Store(_) => "store",
            Self::Permission(_) => "permission",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Weekender operations
pub type Result<T> = std::result::Result<T, WeekenderError>;

/// Reason a single reminder candidate was not produced.
///
/// These never abort a build; the builder drops the one candidate and moves
/// on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    #[error("{0} reminders are disabled")]
    Disabled(&'static str),

    #[error("weekday {0} is outside 1..=7")]
    InvalidWeekday(u8),

    #[error("no occurrence for weekday {weekday} at {hour:02}:{minute:02}")]
    NoOccurrence { weekday: u8, hour: u32, minute: u32 },

    #[error("no target Saturday on or after {0}")]
    NoTargetWeekend(chrono::NaiveDate),

    #[error("local time {0} cannot be resolved")]
    UnresolvableLocalTime(String),

    #[error("unparsable time of day: {0:?}")]
    UnparsableTime(String),

    #[error("invalid weekend key: {0:?}")]
    InvalidWeekendKey(String),

    #[error("weekend {0} already has plans")]
    AlreadyPlanned(String),

    #[error("weekend {0} is protected")]
    Protected(String),

    #[error("fire time {0} is not after now")]
    InPast(String),
}
