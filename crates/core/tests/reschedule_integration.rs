//! Integration tests for `ReminderScheduler` against an in-memory store.

mod support;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use support::executor::{recording_handler, ManualExecutor};
use support::fixtures::{monday_morning, planned};
use support::notification_center::MockNotificationCenter;
use weekender_core::notifications::event_identifier;
use weekender_core::{CandidateBuilderConfig, ReminderInputs, ReminderScheduler};
use weekender_domain::constants::{
    MONDAY_RECAP_ID, PLANNING_NUDGE_ID, SUNDAY_WRAP_UP_ID, WEEKLY_SUMMARY_ID,
};
use weekender_domain::{
    NotificationContent, NotificationRequest, NotificationResponse, NotificationTrigger,
    PermissionState, PlannedItem, ProtectionSet, ReminderPreferences, ResponseAction, RouteAction,
    WeekendDay, WeekendKey,
};

struct Harness {
    center: MockNotificationCenter,
    executor: Arc<ManualExecutor>,
    scheduler: ReminderScheduler,
}

fn harness() -> Harness {
    let center = MockNotificationCenter::authorized();
    let executor = Arc::new(ManualExecutor::default());
    let scheduler = ReminderScheduler::new(
        Arc::new(center.clone()),
        executor.clone(),
        CandidateBuilderConfig::default(),
        30,
    );
    Harness { center, executor, scheduler }
}

fn foreign_request(identifier: &str) -> NotificationRequest {
    NotificationRequest {
        identifier: identifier.to_string(),
        content: NotificationContent {
            title: "Alarm".to_string(),
            subtitle: String::new(),
            body: "Not ours".to_string(),
            category_identifier: "OTHER".to_string(),
            payload: BTreeMap::new(),
        },
        trigger: None,
    }
}

async fn reschedule(
    harness: &Harness,
    events: &[PlannedItem],
    session_is_active: bool,
) -> weekender_core::ReconcileReport {
    reschedule_at(harness, events, session_is_active, monday_morning()).await
}

async fn reschedule_at(
    harness: &Harness,
    events: &[PlannedItem],
    session_is_active: bool,
    now: DateTime<Utc>,
) -> weekender_core::ReconcileReport {
    let protections = ProtectionSet::new();
    let preferences = ReminderPreferences::default();
    let inputs = ReminderInputs {
        events,
        protections: &protections,
        preferences: &preferences,
        session_is_active,
        now,
    };
    harness.scheduler.reschedule(&inputs).await
}

fn hike() -> PlannedItem {
    planned("hike", "2024-01-06", &[WeekendDay::Saturday], "10:00")
}

#[tokio::test]
async fn installs_expected_reminders() {
    let h = harness();
    let report = reschedule(&h, &[hike()], true).await;

    let mut expected = vec![
        WEEKLY_SUMMARY_ID.to_string(),
        SUNDAY_WRAP_UP_ID.to_string(),
        MONDAY_RECAP_ID.to_string(),
        event_identifier("hike", WeekendDay::Saturday),
    ];
    expected.sort();
    assert_eq!(h.center.pending_ids(), expected);
    assert_eq!(report.installed, 4);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn empty_weekend_gets_a_planning_nudge() {
    let h = harness();
    reschedule(&h, &[], true).await;

    let nudge = h.center.pending_request(PLANNING_NUDGE_ID).expect("nudge installed");
    assert_eq!(
        RouteAction::from_payload(&nudge.content.payload),
        Some(RouteAction::AddPlan(WeekendKey::new("2024-01-06")))
    );
}

#[tokio::test]
async fn second_reschedule_with_same_inputs_mutates_nothing() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    h.center.reset_counters();

    let report = reschedule(&h, &[hike()], true).await;
    assert_eq!(h.center.mutations(), 0);
    assert_eq!(report.mutations(), 0);
    assert_eq!(report.unchanged, 4);
}

#[tokio::test]
async fn edited_event_overwrites_only_its_reminder() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    h.center.reset_counters();

    let mut edited = hike();
    edited.start_time = "14:00".to_string();
    let report = reschedule(&h, &[edited], true).await;

    assert_eq!(report.installed, 1);
    assert_eq!(report.cancelled, 0);
    assert_eq!(h.center.adds(), 1);
    let id = event_identifier("hike", WeekendDay::Saturday);
    let installed = h.center.pending_request(&id).expect("event reminder");
    assert!(installed.content.body.contains("14:00"));
}

#[tokio::test]
async fn removed_event_is_cancelled() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;

    let report = reschedule(&h, &[], true).await;
    let id = event_identifier("hike", WeekendDay::Saturday);
    assert!(h.center.pending_request(&id).is_none());
    assert_eq!(report.cancelled, 1);
    // The weekend became empty, so the nudge appears.
    assert!(h.center.pending_request(PLANNING_NUDGE_ID).is_some());
}

#[tokio::test]
async fn inactive_session_clears_managed_notifications_only() {
    let h = harness();
    h.center.seed_pending(foreign_request("com.other.app.alarm"));
    h.center.seed_delivered(foreign_request("com.other.app.delivered"));
    reschedule(&h, &[hike()], true).await;
    h.center.seed_delivered(foreign_request(WEEKLY_SUMMARY_ID));

    let report = reschedule(&h, &[hike()], false).await;

    assert_eq!(h.center.pending_ids(), vec!["com.other.app.alarm".to_string()]);
    assert_eq!(h.center.delivered_ids(), vec!["com.other.app.delivered".to_string()]);
    assert_eq!(report.cancelled, 4);
    assert_eq!(report.cleared_delivered, 1);
}

#[tokio::test]
async fn denied_permission_clears_everything() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    h.center.set_permission(PermissionState::Denied);

    reschedule(&h, &[hike()], true).await;
    assert!(h.center.pending_ids().is_empty());
}

#[tokio::test]
async fn unreadable_store_installs_everything() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    h.center.reset_counters();
    h.center.fail_reads(true);

    let report = reschedule(&h, &[hike()], true).await;
    assert_eq!(report.installed, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(h.center.pending_ids().len(), 4);
}

#[tokio::test]
async fn failed_installs_do_not_abort_and_heal_later() {
    let h = harness();
    h.center.fail_adds(true);

    let report = reschedule(&h, &[hike()], true).await;
    assert_eq!(report.installed, 0);
    assert_eq!(report.failed, 4);
    assert_eq!(h.center.adds(), 4);

    h.center.fail_adds(false);
    let report = reschedule(&h, &[hike()], true).await;
    assert_eq!(report.installed, 4);
    assert_eq!(h.center.pending_ids().len(), 4);
}

#[tokio::test]
async fn permission_status_falls_back_to_last_known() {
    let h = harness();
    assert_eq!(h.scheduler.authorization_status().await, PermissionState::Authorized);

    h.center.fail_status(true);
    assert_eq!(h.scheduler.authorization_status().await, PermissionState::Authorized);
}

#[tokio::test]
async fn request_authorization_reports_resulting_status() {
    let h = harness();
    h.center.set_permission(PermissionState::NotDetermined);
    h.center.grant_on_request(true);
    assert_eq!(h.scheduler.request_authorization().await, PermissionState::Authorized);

    let denied = harness();
    denied.center.set_permission(PermissionState::NotDetermined);
    assert_eq!(denied.scheduler.request_authorization().await, PermissionState::Denied);
}

#[tokio::test]
async fn register_categories_installs_every_category() {
    let h = harness();
    h.scheduler.register_categories().await.unwrap();

    let categories = h.center.categories();
    assert_eq!(categories.len(), 5);
    let nudge = categories.iter().find(|c| c.identifier == "PLANNING_NUDGE").unwrap();
    assert_eq!(nudge.actions, vec!["ADD_PLAN".to_string(), "SNOOZE".to_string()]);
}

#[tokio::test]
async fn snooze_reinstalls_with_relative_trigger() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    let id = event_identifier("hike", WeekendDay::Saturday);
    let request = h.center.pending_request(&id).unwrap();
    h.center.seed_delivered(request.clone());

    let route = h
        .scheduler
        .handle_response(NotificationResponse { request, action: ResponseAction::Snooze })
        .await;

    assert_eq!(route, None);
    assert!(h.center.delivered_ids().is_empty());
    let snoozed = h.center.pending_request(&id).unwrap();
    assert_eq!(
        snoozed.trigger,
        Some(NotificationTrigger::TimeInterval { seconds: 1800, repeats: false })
    );
}

async fn snooze(harness: &Harness, identifier: &str) {
    let request = harness.center.pending_request(identifier).unwrap();
    harness
        .scheduler
        .handle_response(NotificationResponse { request, action: ResponseAction::Snooze })
        .await;
}

#[tokio::test]
async fn snoozed_reminder_survives_reschedule_after_its_fire_time() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    let id = event_identifier("hike", WeekendDay::Saturday);
    snooze(&h, &id).await;
    h.center.reset_counters();

    // The original fire time has passed, so the reminder is no longer desired.
    let later = Utc.with_ymd_and_hms(2024, 1, 6, 9, 2, 0).unwrap();
    let report = reschedule_at(&h, &[hike()], true, later).await;

    let snoozed = h.center.pending_request(&id).expect("snoozed reminder still pending");
    assert_eq!(
        snoozed.trigger,
        Some(NotificationTrigger::TimeInterval { seconds: 1800, repeats: false })
    );
    assert_eq!(report.snoozed, 1);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn snoozed_reminder_is_not_overwritten_by_its_calendar_version() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    let id = event_identifier("hike", WeekendDay::Saturday);
    snooze(&h, &id).await;
    h.center.reset_counters();

    let report = reschedule(&h, &[hike()], true).await;

    assert!(h.center.pending_request(&id).unwrap().is_snoozed());
    assert_eq!(report.installed, 0);
    assert_eq!(h.center.adds(), 0);
}

#[tokio::test]
async fn sign_out_clears_snoozed_reminders() {
    let h = harness();
    reschedule(&h, &[hike()], true).await;
    let id = event_identifier("hike", WeekendDay::Saturday);
    snooze(&h, &id).await;

    reschedule(&h, &[hike()], false).await;
    assert!(h.center.pending_request(&id).is_none());
}

#[tokio::test]
async fn tap_emits_route_once_handler_is_registered() {
    let h = harness();
    reschedule(&h, &[], true).await;
    let nudge = h.center.pending_request(PLANNING_NUDGE_ID).unwrap();
    let summary = h.center.pending_request(WEEKLY_SUMMARY_ID).unwrap();

    let first = h
        .scheduler
        .handle_response(NotificationResponse { request: nudge, action: ResponseAction::Default })
        .await;
    let second = h
        .scheduler
        .handle_response(NotificationResponse { request: summary, action: ResponseAction::AddPlan })
        .await;
    let saturday = WeekendKey::new("2024-01-06");
    assert_eq!(first, Some(RouteAction::AddPlan(saturday.clone())));
    assert_eq!(second, Some(RouteAction::AddPlan(saturday.clone())));
    assert_eq!(h.scheduler.route_buffer().pending_len(), 2);

    let (handler, seen) = recording_handler();
    h.scheduler.set_route_handler(handler);
    h.executor.run_all();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![RouteAction::AddPlan(saturday.clone()), RouteAction::AddPlan(saturday)]
    );
}

#[tokio::test]
async fn dismiss_and_unmanaged_responses_emit_nothing() {
    let h = harness();
    reschedule(&h, &[], true).await;
    let summary = h.center.pending_request(WEEKLY_SUMMARY_ID).unwrap();
    h.center.seed_delivered(summary.clone());

    let dismissed = h
        .scheduler
        .handle_response(NotificationResponse { request: summary, action: ResponseAction::Dismiss })
        .await;
    assert_eq!(dismissed, None);
    assert!(h.center.delivered_ids().is_empty());

    h.center.reset_counters();
    let foreign = h
        .scheduler
        .handle_response(NotificationResponse {
            request: foreign_request("com.other.app.alarm"),
            action: ResponseAction::Default,
        })
        .await;
    assert_eq!(foreign, None);
    assert_eq!(h.center.mutations(), 0);
    assert_eq!(h.scheduler.route_buffer().pending_len(), 0);
}
