//! Weekend plans as supplied by the plan store

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::{TIME_OF_DAY_FORMAT, WEEKEND_KEY_FORMAT};
use crate::impl_wire_name_conversions;

/// Identifies a weekend by the `yyyy-MM-dd` date of its Saturday.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekendKey(String);

impl WeekendKey {
    /// Wrap a raw key without validating it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Key for the weekend whose Saturday is `saturday`.
    pub fn from_saturday(saturday: NaiveDate) -> Self {
        Self(saturday.format(WEEKEND_KEY_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key back into its Saturday, if well formed.
    pub fn saturday(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, WEEKEND_KEY_FORMAT).ok()
    }
}

impl fmt::Display for WeekendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WeekendKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Set of weekends the user marked as protected (no plans wanted).
pub type ProtectionSet = BTreeSet<WeekendKey>;

/// A day a plan can occur on, relative to its weekend's Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekendDay {
    #[serde(rename = "fri")]
    Friday,
    #[serde(rename = "sat")]
    Saturday,
    #[serde(rename = "sun")]
    Sunday,
    #[serde(rename = "mon")]
    Monday,
}

impl_wire_name_conversions!(WeekendDay {
    Friday => "fri",
    Saturday => "sat",
    Sunday => "sun",
    Monday => "mon",
});

impl WeekendDay {
    /// Calendar date of this day for the weekend starting on `saturday`.
    pub fn date_for(self, saturday: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Friday => saturday.checked_sub_days(Days::new(1)),
            Self::Saturday => Some(saturday),
            Self::Sunday => saturday.checked_add_days(Days::new(1)),
            Self::Monday => saturday.checked_add_days(Days::new(2)),
        }
    }
}

/// Lifecycle state of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Planned,
    Completed,
    Cancelled,
}

impl_wire_name_conversions!(PlanStatus {
    Planned => "planned",
    Completed => "completed",
    Cancelled => "cancelled",
});

/// A single plan on a weekend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub id: String,
    pub title: String,
    pub weekend_key: WeekendKey,
    pub days: BTreeSet<WeekendDay>,
    /// `HH:mm`, ignored for all-day plans.
    pub start_time: String,
    /// `HH:mm`, ignored for all-day plans.
    pub end_time: String,
    pub is_all_day: bool,
    pub status: PlanStatus,
}

impl PlannedItem {
    pub fn is_planned(&self) -> bool {
        self.status == PlanStatus::Planned
    }

    /// Parsed start time, `None` when the string is not `HH:mm`.
    pub fn parsed_start_time(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.start_time)
    }
}

/// Parse an `HH:mm` time-of-day string.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_OF_DAY_FORMAT).ok()
}
