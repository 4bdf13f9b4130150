//! Domain types and models

pub mod notifications;
pub mod permission;
pub mod plans;
pub mod preferences;
pub mod routes;

pub use notifications::{
    is_app_managed_identifier, CalendarTrigger, DeliveredNotification, NotificationCategory,
    NotificationCategoryRegistration, NotificationContent, NotificationRequest,
    NotificationResponse, NotificationTrigger, ReminderCandidate, ResponseAction,
};
pub use permission::PermissionState;
pub use plans::{parse_time_of_day, PlanStatus, PlannedItem, ProtectionSet, WeekendDay, WeekendKey};
pub use preferences::{
    weekday_from_number, EventReminderPreference, ReminderPreferences, ToggleReminderPreference,
    WeeklyReminderPreference,
};
pub use routes::RouteAction;
