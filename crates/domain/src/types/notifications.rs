//! Notification request shapes shared by the engine and the store adapters

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ACTION_ADD_PLAN, ACTION_OPEN_WEEKEND, ACTION_SNOOZE, CATEGORY_EVENT_REMINDER,
    CATEGORY_MONDAY_RECAP, CATEGORY_PLANNING_NUDGE, CATEGORY_SUNDAY_WRAP_UP,
    CATEGORY_WEEKLY_SUMMARY, IDENTIFIER_PREFIX,
};

/// Reminder categories the engine schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    WeeklySummary,
    PlanningNudge,
    SundayWrapUp,
    MondayRecap,
    EventReminder,
}

impl NotificationCategory {
    pub const ALL: [Self; 5] = [
        Self::WeeklySummary,
        Self::PlanningNudge,
        Self::SundayWrapUp,
        Self::MondayRecap,
        Self::EventReminder,
    ];

    /// Category tag stored on the notification content.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::WeeklySummary => CATEGORY_WEEKLY_SUMMARY,
            Self::PlanningNudge => CATEGORY_PLANNING_NUDGE,
            Self::SundayWrapUp => CATEGORY_SUNDAY_WRAP_UP,
            Self::MondayRecap => CATEGORY_MONDAY_RECAP,
            Self::EventReminder => CATEGORY_EVENT_REMINDER,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.tag() == tag)
    }

    /// Action identifiers offered on notifications of this category.
    pub fn action_identifiers(&self) -> Vec<&'static str> {
        match self {
            Self::WeeklySummary | Self::SundayWrapUp | Self::MondayRecap => {
                vec![ACTION_OPEN_WEEKEND]
            }
            Self::PlanningNudge => vec![ACTION_ADD_PLAN, ACTION_SNOOZE],
            Self::EventReminder => vec![ACTION_OPEN_WEEKEND, ACTION_SNOOZE],
        }
    }
}

/// Category + actions registration handed to the store at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCategoryRegistration {
    pub identifier: String,
    pub actions: Vec<String>,
}

impl From<NotificationCategory> for NotificationCategoryRegistration {
    fn from(category: NotificationCategory) -> Self {
        Self {
            identifier: category.tag().to_string(),
            actions: category.action_identifiers().into_iter().map(str::to_string).collect(),
        }
    }
}

/// One-shot calendar trigger. Unset components match any value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarTrigger {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub repeats: bool,
}

impl CalendarTrigger {
    /// Exact, non-repeating trigger for the local wall time of `at`.
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            year: Some(at.year()),
            month: Some(at.month()),
            day: Some(at.day()),
            hour: Some(at.hour()),
            minute: Some(at.minute()),
            second: None,
            repeats: false,
        }
    }
}

/// When a notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationTrigger {
    Calendar(CalendarTrigger),
    /// Relative trigger, only used for snooze.
    TimeInterval { seconds: u64, repeats: bool },
}

impl NotificationTrigger {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Calendar(_) => "calendar",
            Self::TimeInterval { .. } => "time_interval",
        }
    }

    pub const fn repeats(&self) -> bool {
        match self {
            Self::Calendar(trigger) => trigger.repeats,
            Self::TimeInterval { repeats, .. } => *repeats,
        }
    }
}

/// Visible content plus routing payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub category_identifier: String,
    pub payload: BTreeMap<String, String>,
}

/// A notification in the shape the store accepts and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub identifier: String,
    pub content: NotificationContent,
    pub trigger: Option<NotificationTrigger>,
}

impl NotificationRequest {
    /// Whether this engine owns the notification.
    pub fn is_app_managed(&self) -> bool {
        is_app_managed_identifier(&self.identifier)
    }

    /// Whether the request was re-installed by a snooze response.
    pub fn is_snoozed(&self) -> bool {
        matches!(self.trigger, Some(NotificationTrigger::TimeInterval { .. }))
    }
}

/// Identifier check shared by requests and bare identifiers.
pub fn is_app_managed_identifier(identifier: &str) -> bool {
    identifier
        .strip_prefix(IDENTIFIER_PREFIX)
        .is_some_and(|rest| rest.starts_with('.'))
}

/// A notification that has fired and is visible to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveredNotification {
    pub request: NotificationRequest,
    pub delivered_at: DateTime<Utc>,
}

/// A reminder the builder proposes to schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderCandidate {
    pub identifier: String,
    pub category: NotificationCategory,
    pub title: String,
    pub body: String,
    pub payload: BTreeMap<String, String>,
    pub trigger: NotificationTrigger,
    pub fire_at: DateTime<Utc>,
}

impl ReminderCandidate {
    /// Convert into the store's request shape.
    pub fn to_request(&self) -> NotificationRequest {
        NotificationRequest {
            identifier: self.identifier.clone(),
            content: NotificationContent {
                title: self.title.clone(),
                subtitle: String::new(),
                body: self.body.clone(),
                category_identifier: self.category.tag().to_string(),
                payload: self.payload.clone(),
            },
            trigger: Some(self.trigger),
        }
    }
}

/// What the user did with a delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseAction {
    /// Plain tap on the notification body.
    Default,
    Open,
    AddPlan,
    Snooze,
    Dismiss,
}

impl ResponseAction {
    /// Map an action identifier reported by the platform.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            ACTION_OPEN_WEEKEND => Self::Open,
            ACTION_ADD_PLAN => Self::AddPlan,
            ACTION_SNOOZE => Self::Snooze,
            "com.apple.UNNotificationDismissActionIdentifier" | "DISMISS" => Self::Dismiss,
            _ => Self::Default,
        }
    }
}

/// Inbound notification response forwarded by the hosting shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub request: NotificationRequest,
    pub action: ResponseAction,
}
