//! In-memory notification center
//!
//! Behaves like the platform store the engine targets: identifiers are
//! unique, adding an existing identifier replaces it, and removals ignore
//! unknown identifiers. [`InMemoryNotificationCenter::deliver_due`] moves
//! requests whose trigger has passed into the delivered list, which lets a
//! host simulate time passing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use tracing::{debug, info};
use weekender_core::notifications::local_instant;
use weekender_core::NotificationCenter;
use weekender_domain::{
    CalendarTrigger, DeliveredNotification, NotificationCategoryRegistration, NotificationRequest,
    NotificationTrigger, PermissionState, Result,
};

#[derive(Debug, Clone)]
struct PendingEntry {
    request: NotificationRequest,
    /// `None` when the trigger does not pin a single instant.
    fires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct CenterState {
    pending: BTreeMap<String, PendingEntry>,
    delivered: Vec<DeliveredNotification>,
    categories: Vec<NotificationCategoryRegistration>,
    permission: PermissionState,
}

/// Notification store held entirely in memory.
#[derive(Debug)]
pub struct InMemoryNotificationCenter {
    state: Mutex<CenterState>,
    time_zone: Tz,
    /// Outcome of the next authorization prompt while undetermined.
    grant_on_request: bool,
}

impl InMemoryNotificationCenter {
    /// Create a store that evaluates calendar triggers in `time_zone`.
    pub fn new(time_zone: Tz) -> Self {
        Self { state: Mutex::new(CenterState::default()), time_zone, grant_on_request: true }
    }

    /// Start with the given permission state.
    pub fn with_permission(self, permission: PermissionState) -> Self {
        self.state.lock().permission = permission;
        self
    }

    /// Decide what the simulated permission prompt answers.
    pub fn with_grant_on_request(mut self, grant: bool) -> Self {
        self.grant_on_request = grant;
        self
    }

    /// Change the permission state, as if the user toggled it in settings.
    pub fn set_permission(&self, permission: PermissionState) {
        self.state.lock().permission = permission;
    }

    pub fn pending_identifiers(&self) -> Vec<String> {
        self.state.lock().pending.keys().cloned().collect()
    }

    pub fn delivered_identifiers(&self) -> Vec<String> {
        self.state
            .lock()
            .delivered
            .iter()
            .map(|notification| notification.request.identifier.clone())
            .collect()
    }

    pub fn categories(&self) -> Vec<NotificationCategoryRegistration> {
        self.state.lock().categories.clone()
    }

    /// Instant at which a pending request will fire, if it is known.
    pub fn fire_time(&self, identifier: &str) -> Option<DateTime<Utc>> {
        self.state.lock().pending.get(identifier).and_then(|entry| entry.fires_at)
    }

    /// Deliver every pending request that fires at or before `now`.
    ///
    /// Returns the identifiers delivered, earliest first.
    pub fn deliver_due(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut state = self.state.lock();

        let mut due: Vec<(DateTime<Utc>, String)> = state
            .pending
            .iter()
            .filter_map(|(id, entry)| {
                entry.fires_at.filter(|at| *at <= now).map(|at| (at, id.clone()))
            })
            .collect();
        due.sort();

        let mut delivered = Vec::with_capacity(due.len());
        for (fired_at, identifier) in due {
            if let Some(entry) = state.pending.remove(&identifier) {
                state.delivered.retain(|existing| existing.request.identifier != identifier);
                state
                    .delivered
                    .push(DeliveredNotification { request: entry.request, delivered_at: fired_at });
                delivered.push(identifier);
            }
        }

        if !delivered.is_empty() {
            info!(count = delivered.len(), "notifications delivered");
        }
        delivered
    }

    fn fire_instant(
        &self,
        trigger: Option<&NotificationTrigger>,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        match trigger? {
            NotificationTrigger::TimeInterval { seconds, .. } => {
                let seconds = i64::try_from(*seconds).ok()?;
                now.checked_add_signed(Duration::try_seconds(seconds)?)
            }
            NotificationTrigger::Calendar(calendar) => self.calendar_instant(calendar),
        }
    }

    fn calendar_instant(&self, calendar: &CalendarTrigger) -> Option<DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(calendar.year?, calendar.month?, calendar.day?)?;
        let time = NaiveTime::from_hms_opt(
            calendar.hour.unwrap_or(0),
            calendar.minute.unwrap_or(0),
            calendar.second.unwrap_or(0),
        )?;
        local_instant(&self.time_zone, date, time).map(|at| at.with_timezone(&Utc))
    }
}

#[async_trait]
impl NotificationCenter for InMemoryNotificationCenter {
    async fn pending_requests(&self) -> Result<Vec<NotificationRequest>> {
        Ok(self.state.lock().pending.values().map(|entry| entry.request.clone()).collect())
    }

    async fn delivered_notifications(&self) -> Result<Vec<DeliveredNotification>> {
        Ok(self.state.lock().delivered.clone())
    }

    async fn add_request(&self, request: NotificationRequest) -> Result<()> {
        let fires_at = self.fire_instant(request.trigger.as_ref(), Utc::now());
        debug!(identifier = %request.identifier, fires_at = ?fires_at, "request added");
        self.state
            .lock()
            .pending
            .insert(request.identifier.clone(), PendingEntry { request, fires_at });
        Ok(())
    }

    async fn remove_pending_requests(&self, identifiers: &[String]) -> Result<()> {
        let mut state = self.state.lock();
        for identifier in identifiers {
            state.pending.remove(identifier);
        }
        Ok(())
    }

    async fn remove_delivered_notifications(&self, identifiers: &[String]) -> Result<()> {
        self.state
            .lock()
            .delivered
            .retain(|notification| !identifiers.contains(&notification.request.identifier));
        Ok(())
    }

    async fn request_authorization(&self) -> Result<bool> {
        let mut state = self.state.lock();
        if state.permission == PermissionState::NotDetermined {
            state.permission = if self.grant_on_request {
                PermissionState::Authorized
            } else {
                PermissionState::Denied
            };
            info!(permission = %state.permission, "authorization prompt answered");
        }
        Ok(state.permission.can_deliver_notifications())
    }

    async fn authorization_status(&self) -> Result<PermissionState> {
        Ok(self.state.lock().permission)
    }

    async fn set_categories(&self, categories: Vec<NotificationCategoryRegistration>) -> Result<()> {
        self.state.lock().categories = categories;
        Ok(())
    }
}
