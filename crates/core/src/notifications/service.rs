//! Reminder scheduler - the engine's entry point
//!
//! Ties the permission gate, candidate builder, reconciler and route buffer
//! together behind the operations the hosting shell calls.

use std::sync::Arc;

use chrono::TimeZone;
use tracing::{debug, info, instrument, warn};
use weekender_domain::{
    NotificationCategory, NotificationCategoryRegistration, NotificationRequest,
    NotificationResponse, NotificationTrigger, PermissionState, ResponseAction, Result,
    RouteAction,
};

use super::candidates::{CandidateBuilderConfig, ReminderCandidateBuilder, ReminderInputs};
use super::permission::PermissionGate;
use super::ports::NotificationCenter;
use super::reconciler::{ReconcileReport, ScheduleReconciler};
use crate::routing::{RouteBuffer, RouteExecutor, RouteHandler};

/// Notification engine facade.
pub struct ReminderScheduler {
    center: Arc<dyn NotificationCenter>,
    gate: PermissionGate,
    builder: ReminderCandidateBuilder,
    reconciler: ScheduleReconciler,
    routes: RouteBuffer,
    snooze_seconds: u64,
}

impl ReminderScheduler {
    pub fn new(
        center: Arc<dyn NotificationCenter>,
        executor: Arc<dyn RouteExecutor>,
        builder_config: CandidateBuilderConfig,
        snooze_minutes: u32,
    ) -> Self {
        Self {
            gate: PermissionGate::new(Arc::clone(&center)),
            reconciler: ScheduleReconciler::new(Arc::clone(&center)),
            builder: ReminderCandidateBuilder::new(builder_config),
            routes: RouteBuffer::new(executor),
            snooze_seconds: u64::from(snooze_minutes) * 60,
            center,
        }
    }

    /// Bring the installed reminders in line with the current inputs.
    ///
    /// Without permission or an active session every app-managed reminder is
    /// removed, delivered ones included.
    #[instrument(skip_all, fields(session_active = inputs.session_is_active, events = inputs.events.len()))]
    pub async fn reschedule<Z: TimeZone>(&self, inputs: &ReminderInputs<'_, Z>) -> ReconcileReport {
        let permission = self.gate.authorization_status().await;
        if !permission.can_deliver_notifications() || !inputs.session_is_active {
            info!(%permission, session_active = inputs.session_is_active, "clearing reminders");
            return self.reconciler.clear_all().await;
        }

        let desired: Vec<NotificationRequest> =
            self.builder.build(inputs).iter().map(|candidate| candidate.to_request()).collect();
        debug!(count = desired.len(), "reminder candidates built");
        self.reconciler.reconcile(desired).await
    }

    pub async fn authorization_status(&self) -> PermissionState {
        self.gate.authorization_status().await
    }

    pub async fn request_authorization(&self) -> PermissionState {
        self.gate.request_authorization().await
    }

    /// Install the category and action registrations for every reminder kind.
    pub async fn register_categories(&self) -> Result<()> {
        let registrations: Vec<NotificationCategoryRegistration> =
            NotificationCategory::ALL.into_iter().map(Into::into).collect();
        self.center.set_categories(registrations).await
    }

    /// React to the user acting on a delivered notification.
    ///
    /// Returns the route emitted, if any.
    #[instrument(skip_all, fields(identifier = %response.request.identifier, action = ?response.action))]
    pub async fn handle_response(&self, response: NotificationResponse) -> Option<RouteAction> {
        let NotificationResponse { request, action } = response;
        if !request.is_app_managed() {
            debug!("ignoring response for unmanaged notification");
            return None;
        }

        self.remove_delivered(&request.identifier).await;

        match action {
            ResponseAction::Snooze => {
                self.snooze(request).await;
                None
            }
            ResponseAction::Dismiss => None,
            ResponseAction::Default | ResponseAction::Open | ResponseAction::AddPlan => {
                let Some(decoded) = RouteAction::from_payload(&request.content.payload) else {
                    debug!("notification carries no route");
                    return None;
                };
                let route = match action {
                    ResponseAction::Open => RouteAction::OpenWeekend(decoded.weekend_key().clone()),
                    ResponseAction::AddPlan => RouteAction::AddPlan(decoded.weekend_key().clone()),
                    _ => decoded,
                };
                self.routes.emit(route.clone());
                Some(route)
            }
        }
    }

    /// Register the UI navigation handler, flushing buffered routes.
    pub fn set_route_handler(&self, handler: RouteHandler) {
        self.routes.set_handler(handler);
    }

    pub fn route_buffer(&self) -> &RouteBuffer {
        &self.routes
    }

    async fn snooze(&self, mut request: NotificationRequest) {
        request.trigger =
            Some(NotificationTrigger::TimeInterval { seconds: self.snooze_seconds, repeats: false });
        let identifier = request.identifier.clone();
        match self.center.add_request(request).await {
            Ok(()) => info!(%identifier, seconds = self.snooze_seconds, "reminder snoozed"),
            Err(err) => warn!(%identifier, error = %err, "failed to snooze reminder"),
        }
    }

    async fn remove_delivered(&self, identifier: &str) {
        let ids = [identifier.to_string()];
        if let Err(err) = self.center.remove_delivered_notifications(&ids).await {
            warn!(%identifier, error = %err, "failed to remove delivered reminder");
        }
    }
}
