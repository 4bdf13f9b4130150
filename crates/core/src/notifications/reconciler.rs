//! Schedule reconciler - minimal diff between desired and installed
//! notifications
//!
//! Every call re-reads the store, so overlapping reconciliations are safe:
//! redundant installs are skipped by signature and the last reader wins.
//! Store mutation failures are logged and counted but never retried; the next
//! reschedule trigger heals them.
//!
//! A pending request carrying an interval trigger was snoozed by the user. It
//! is left in place until it fires, even when its reminder is no longer
//! desired or would now be built with a calendar trigger. Only a full clear
//! removes it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};
use weekender_domain::NotificationRequest;

use super::ports::NotificationCenter;
use super::signature::signature;

/// What a reconciliation did to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Requests added or overwritten.
    pub installed: usize,
    /// Desired requests already installed with identical content.
    pub unchanged: usize,
    /// Pending requests cancelled.
    pub cancelled: usize,
    /// Snoozed requests left in place.
    pub snoozed: usize,
    /// Delivered notifications removed (full clear only).
    pub cleared_delivered: usize,
    /// Store calls that failed.
    pub failed: usize,
}

impl ReconcileReport {
    /// Number of store mutations attempted.
    pub const fn mutations(&self) -> usize {
        self.installed + self.cancelled + self.cleared_delivered
    }
}

/// Applies the desired notification set to the store with minimal writes.
pub struct ScheduleReconciler {
    center: Arc<dyn NotificationCenter>,
}

impl ScheduleReconciler {
    pub fn new(center: Arc<dyn NotificationCenter>) -> Self {
        Self { center }
    }

    /// Make the app-managed pending set equal to `desired`.
    ///
    /// Later duplicates in `desired` win over earlier ones with the same
    /// identifier.
    pub async fn reconcile(&self, desired: Vec<NotificationRequest>) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let Installed { signatures: existing, snoozed } = self.installed(&mut report).await;

        let desired: BTreeMap<String, NotificationRequest> = desired
            .into_iter()
            .filter(|request| {
                let managed = request.is_app_managed();
                if !managed {
                    warn!(identifier = %request.identifier, "refusing to install unmanaged identifier");
                }
                managed
            })
            .map(|request| (request.identifier.clone(), request))
            .collect();

        let stale: Vec<String> =
            existing.keys().filter(|id| !desired.contains_key(*id)).cloned().collect();
        if !stale.is_empty() {
            match self.center.remove_pending_requests(&stale).await {
                Ok(()) => report.cancelled += stale.len(),
                Err(err) => {
                    report.failed += 1;
                    warn!(error = %err, count = stale.len(), "failed to cancel stale reminders");
                }
            }
        }

        for (identifier, request) in desired {
            if snoozed.contains(&identifier) {
                debug!(%identifier, "snoozed reminder left in place");
                continue;
            }
            if existing.get(&identifier).is_some_and(|current| *current == signature(&request)) {
                report.unchanged += 1;
                continue;
            }
            match self.center.add_request(request).await {
                Ok(()) => {
                    debug!(%identifier, "reminder installed");
                    report.installed += 1;
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(%identifier, error = %err, "failed to install reminder");
                }
            }
        }

        report.snoozed = snoozed.len();
        info!(
            installed = report.installed,
            unchanged = report.unchanged,
            cancelled = report.cancelled,
            snoozed = report.snoozed,
            failed = report.failed,
            "reminder schedule reconciled"
        );
        report
    }

    /// Cancel every app-managed pending request and remove every app-managed
    /// delivered notification.
    pub async fn clear_all(&self) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let Installed { signatures, snoozed } = self.installed(&mut report).await;
        let pending: Vec<String> = signatures.into_keys().chain(snoozed).collect();
        if !pending.is_empty() {
            match self.center.remove_pending_requests(&pending).await {
                Ok(()) => report.cancelled += pending.len(),
                Err(err) => {
                    report.failed += 1;
                    warn!(error = %err, "failed to cancel pending reminders");
                }
            }
        }

        match self.center.delivered_notifications().await {
            Ok(delivered) => {
                let ids: Vec<String> = delivered
                    .into_iter()
                    .filter(|notification| notification.request.is_app_managed())
                    .map(|notification| notification.request.identifier)
                    .collect();
                if !ids.is_empty() {
                    match self.center.remove_delivered_notifications(&ids).await {
                        Ok(()) => report.cleared_delivered += ids.len(),
                        Err(err) => {
                            report.failed += 1;
                            warn!(error = %err, "failed to remove delivered reminders");
                        }
                    }
                }
            }
            Err(err) => {
                report.failed += 1;
                warn!(error = %err, "failed to read delivered notifications");
            }
        }

        info!(
            cancelled = report.cancelled,
            cleared_delivered = report.cleared_delivered,
            failed = report.failed,
            "reminder schedule cleared"
        );
        report
    }

    /// App-managed pending requests, split into snoozed identifiers and
    /// signatures of the rest. A failed read degrades to an empty set.
    async fn installed(&self, report: &mut ReconcileReport) -> Installed {
        let mut installed = Installed::default();
        match self.center.pending_requests().await {
            Ok(pending) => {
                for request in pending.into_iter().filter(NotificationRequest::is_app_managed) {
                    if request.is_snoozed() {
                        installed.snoozed.insert(request.identifier);
                    } else {
                        let digest = signature(&request);
                        installed.signatures.insert(request.identifier, digest);
                    }
                }
            }
            Err(err) => {
                report.failed += 1;
                warn!(error = %err, "failed to read pending notifications; installing everything");
            }
        }
        installed
    }
}

#[derive(Default)]
struct Installed {
    signatures: HashMap<String, String>,
    snoozed: HashSet<String>,
}
