//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use serde_json::Error as JsonError;
use toml::de::Error as TomlError;
use weekender_domain::WeekenderError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub WeekenderError);

impl From<InfraError> for WeekenderError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<WeekenderError> for InfraError {
    fn from(value: WeekenderError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoWeekenderError {
    fn into_weekender(self) -> WeekenderError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → WeekenderError */
/* -------------------------------------------------------------------------- */

impl IntoWeekenderError for IoError {
    fn into_weekender(self) -> WeekenderError {
        match self.kind() {
            ErrorKind::NotFound => {
                WeekenderError::Config(format!("config file not found: {self}"))
            }
            ErrorKind::PermissionDenied => {
                WeekenderError::Config(format!("config file not readable: {self}"))
            }
            _ => WeekenderError::Config(format!("failed to read config file: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_weekender())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → WeekenderError */
/* -------------------------------------------------------------------------- */

impl IntoWeekenderError for JsonError {
    fn into_weekender(self) -> WeekenderError {
        WeekenderError::Config(format!(
            "Invalid JSON format at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_weekender())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → WeekenderError */
/* -------------------------------------------------------------------------- */

impl IntoWeekenderError for TomlError {
    fn into_weekender(self) -> WeekenderError {
        WeekenderError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(value.into_weekender())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
