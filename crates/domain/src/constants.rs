//! Application constants
//!
//! Centralized location for the identifier namespace and the fixed reminder
//! schedule. Identifiers are a durable contract: installed notifications are
//! matched by them across app launches.

// Identifier namespace
pub const IDENTIFIER_PREFIX: &str = "weekender.reminder";
pub const WEEKLY_SUMMARY_ID: &str = "weekender.reminder.weekly-summary";
pub const PLANNING_NUDGE_ID: &str = "weekender.reminder.planning-nudge";
pub const SUNDAY_WRAP_UP_ID: &str = "weekender.reminder.sunday-wrap-up";
pub const MONDAY_RECAP_ID: &str = "weekender.reminder.monday-recap";
pub const EVENT_REMINDER_PREFIX: &str = "weekender.reminder.event";

// Category tags
pub const CATEGORY_WEEKLY_SUMMARY: &str = "WEEKLY_SUMMARY";
pub const CATEGORY_PLANNING_NUDGE: &str = "PLANNING_NUDGE";
pub const CATEGORY_SUNDAY_WRAP_UP: &str = "SUNDAY_WRAP_UP";
pub const CATEGORY_MONDAY_RECAP: &str = "MONDAY_RECAP";
pub const CATEGORY_EVENT_REMINDER: &str = "EVENT_REMINDER";

// Response action identifiers
pub const ACTION_OPEN_WEEKEND: &str = "OPEN_WEEKEND";
pub const ACTION_ADD_PLAN: &str = "ADD_PLAN";
pub const ACTION_SNOOZE: &str = "SNOOZE";

// Payload keys
pub const PAYLOAD_ROUTE: &str = "route";
pub const PAYLOAD_WEEKEND_KEY: &str = "weekendKey";
pub const PAYLOAD_EVENT_ID: &str = "eventId";
pub const PAYLOAD_DAY: &str = "day";
pub const ROUTE_OPEN_WEEKEND: &str = "openWeekend";
pub const ROUTE_ADD_PLAN: &str = "addPlan";

// Fixed schedule
pub const SUNDAY_WRAP_UP_HOUR: u32 = 19;
pub const MONDAY_RECAP_HOUR: u32 = 9;
pub const DEFAULT_ALL_DAY_REMINDER_HOUR: u32 = 9;
pub const DEFAULT_MAX_EVENT_REMINDERS: usize = 40;
pub const DEFAULT_SNOOZE_MINUTES: u32 = 30;

// Formats
pub const WEEKEND_KEY_FORMAT: &str = "%Y-%m-%d";
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";
