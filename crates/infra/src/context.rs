//! Reminder context - dependency injection container
//!
//! Wires configuration, the notification store, the route executor and the
//! scheduler together so a host only has to supply its data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;
use weekender_core::{
    CandidateBuilderConfig, NotificationCenter, ReconcileReport, ReminderInputs,
    ReminderScheduler,
};
use weekender_domain::{Config, PlannedItem, ProtectionSet, ReminderPreferences, Result};

use crate::notifications::InMemoryNotificationCenter;
use crate::routing::TokioRouteExecutor;

/// Holds the scheduler and the configuration it was built from.
pub struct ReminderContext {
    pub config: Config,
    pub scheduler: Arc<ReminderScheduler>,
    time_zone: Tz,
}

impl ReminderContext {
    /// Build a context around `center`.
    ///
    /// Must be called inside a tokio runtime; route handlers run on a worker
    /// task spawned here.
    ///
    /// # Errors
    /// Returns `WeekenderError::Config` for invalid configuration and
    /// `WeekenderError::Internal` outside a runtime.
    pub fn new(config: Config, center: Arc<dyn NotificationCenter>) -> Result<Self> {
        config.notifications.validate()?;
        let time_zone = config.notifications.tz()?;
        let executor = Arc::new(TokioRouteExecutor::new()?);

        let scheduler = ReminderScheduler::new(
            center,
            executor,
            CandidateBuilderConfig::from(&config.notifications),
            config.notifications.snooze_minutes,
        );

        info!(time_zone = %time_zone, "reminder context initialised");
        Ok(Self { config, scheduler: Arc::new(scheduler), time_zone })
    }

    /// Build a context backed by an [`InMemoryNotificationCenter`] in the
    /// configured zone; the store is returned for inspection.
    ///
    /// # Errors
    /// See [`ReminderContext::new`].
    pub fn in_memory(config: Config) -> Result<(Self, Arc<InMemoryNotificationCenter>)> {
        let center = Arc::new(InMemoryNotificationCenter::new(config.notifications.tz()?));
        let context = Self::new(config, center.clone())?;
        Ok((context, center))
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Current instant in the configured zone.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.time_zone)
    }

    /// Reschedule against the current time in the configured zone.
    pub async fn reschedule_now(
        &self,
        events: &[PlannedItem],
        protections: &ProtectionSet,
        preferences: &ReminderPreferences,
        session_is_active: bool,
    ) -> ReconcileReport {
        let inputs =
            ReminderInputs { events, protections, preferences, session_is_active, now: self.now() };
        self.scheduler.reschedule(&inputs).await
    }
}
