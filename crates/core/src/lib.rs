//! # Weekender Core
//!
//! Pure reminder-scheduling logic - no platform dependencies.
//!
//! This crate contains:
//! - Occurrence math and reminder candidate building
//! - Reconciliation of the desired schedule against the notification store
//! - Permission gating and deferred route delivery
//! - Port interfaces (traits) for the notification store and route executor
//!
//! ## Architecture Principles
//! - Only depends on `weekender-domain`
//! - No OS notification, timer or UI code
//! - All external effects via traits
//! - Pure, testable business logic

pub mod notifications;
pub mod routing;

pub use notifications::{
    CandidateBuilderConfig, NotificationCenter, PermissionGate, ReconcileReport,
    ReminderCandidateBuilder, ReminderInputs, ReminderScheduler, ScheduleReconciler,
};
pub use routing::{RouteBuffer, RouteExecutor, RouteHandler, RouteTask};
