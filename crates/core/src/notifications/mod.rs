//! Reminder scheduling: candidate building, reconciliation and permissions

pub mod candidates;
pub mod occurrence;
pub mod permission;
pub mod ports;
pub mod reconciler;
pub mod service;
pub mod signature;

pub use candidates::{
    event_identifier, CandidateBuilderConfig, ReminderCandidateBuilder, ReminderInputs,
    WeekendTally,
};
pub use occurrence::{local_instant, next_saturday, next_target_weekday, next_weekday_occurrence};
pub use permission::PermissionGate;
pub use ports::NotificationCenter;
pub use reconciler::{ReconcileReport, ScheduleReconciler};
pub use service::ReminderScheduler;
pub use signature::{signature, trigger_descriptor};
