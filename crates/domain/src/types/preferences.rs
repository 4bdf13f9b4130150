//! Reminder preferences supplied by the preferences store on every call

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Map a 1-based weekday number (1 = Sunday ... 7 = Saturday) to a
/// [`Weekday`].
pub const fn weekday_from_number(number: u8) -> Option<Weekday> {
    match number {
        1 => Some(Weekday::Sun),
        2 => Some(Weekday::Mon),
        3 => Some(Weekday::Tue),
        4 => Some(Weekday::Wed),
        5 => Some(Weekday::Thu),
        6 => Some(Weekday::Fri),
        7 => Some(Weekday::Sat),
        _ => None,
    }
}

/// A reminder that fires weekly at a user-chosen weekday and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReminderPreference {
    pub enabled: bool,
    /// 1 = Sunday ... 7 = Saturday
    pub weekday: u8,
    pub hour: u32,
    pub minute: u32,
}

/// Per-event reminder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReminderPreference {
    pub enabled: bool,
    /// Minutes before the event's start time.
    pub lead_minutes: u32,
}

/// A reminder with a fixed schedule that can only be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleReminderPreference {
    pub enabled: bool,
}

/// Snapshot of every reminder toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderPreferences {
    pub weekly_summary: WeeklyReminderPreference,
    pub planning_nudge: WeeklyReminderPreference,
    pub event_reminders: EventReminderPreference,
    pub sunday_wrap_up: ToggleReminderPreference,
    pub monday_recap: ToggleReminderPreference,
}

impl Default for ReminderPreferences {
    fn default() -> Self {
        Self {
            weekly_summary: WeeklyReminderPreference {
                enabled: true,
                weekday: 6,
                hour: 18,
                minute: 0,
            },
            planning_nudge: WeeklyReminderPreference {
                enabled: true,
                weekday: 4,
                hour: 19,
                minute: 0,
            },
            event_reminders: EventReminderPreference { enabled: true, lead_minutes: 60 },
            sunday_wrap_up: ToggleReminderPreference { enabled: true },
            monday_recap: ToggleReminderPreference { enabled: true },
        }
    }
}

impl ReminderPreferences {
    /// Preferences with every category switched off.
    pub fn all_disabled() -> Self {
        let mut prefs = Self::default();
        prefs.weekly_summary.enabled = false;
        prefs.planning_nudge.enabled = false;
        prefs.event_reminders.enabled = false;
        prefs.sunday_wrap_up.enabled = false;
        prefs.monday_recap.enabled = false;
        prefs
    }
}
