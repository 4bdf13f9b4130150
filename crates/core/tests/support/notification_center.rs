use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use weekender_core::NotificationCenter;
use weekender_domain::{
    DeliveredNotification, NotificationCategoryRegistration, NotificationRequest,
    PermissionState, Result as DomainResult, WeekenderError,
};

/// In-memory mock for `NotificationCenter`.
///
/// Mirrors the platform store: adding an existing identifier replaces it,
/// removals ignore unknown identifiers. Every mutating call is counted and
/// each operation family can be made to fail on demand.
#[derive(Default, Clone)]
pub struct MockNotificationCenter {
    inner: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    pending: Mutex<Vec<NotificationRequest>>,
    delivered: Mutex<Vec<DeliveredNotification>>,
    categories: Mutex<Vec<NotificationCategoryRegistration>>,
    permission: Mutex<PermissionState>,
    grant_on_request: AtomicBool,

    adds: AtomicUsize,
    pending_removals: AtomicUsize,
    delivered_removals: AtomicUsize,

    fail_reads: AtomicBool,
    fail_adds: AtomicBool,
    fail_removals: AtomicBool,
    fail_status: AtomicBool,
}

impl MockNotificationCenter {
    /// Store that has already been granted permission.
    pub fn authorized() -> Self {
        let center = Self::default();
        center.set_permission(PermissionState::Authorized);
        center
    }

    pub fn set_permission(&self, state: PermissionState) {
        *self.inner.permission.lock().unwrap() = state;
    }

    pub fn grant_on_request(&self, grant: bool) {
        self.inner.grant_on_request.store(grant, Ordering::SeqCst);
    }

    /// Seed a pending request without counting it as an add.
    pub fn seed_pending(&self, request: NotificationRequest) {
        self.inner.pending.lock().unwrap().push(request);
    }

    /// Seed a delivered notification.
    pub fn seed_delivered(&self, request: NotificationRequest) {
        let delivered_at = Utc.with_ymd_and_hms(2024, 1, 5, 18, 0, 0).unwrap();
        self.inner.delivered.lock().unwrap().push(DeliveredNotification { request, delivered_at });
    }

    pub fn pending(&self) -> Vec<NotificationRequest> {
        self.inner.pending.lock().unwrap().clone()
    }

    pub fn pending_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> =
            self.pending().into_iter().map(|request| request.identifier).collect();
        ids.sort();
        ids
    }

    pub fn pending_request(&self, identifier: &str) -> Option<NotificationRequest> {
        self.pending().into_iter().find(|request| request.identifier == identifier)
    }

    pub fn delivered_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .inner
            .delivered
            .lock()
            .unwrap()
            .iter()
            .map(|notification| notification.request.identifier.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn categories(&self) -> Vec<NotificationCategoryRegistration> {
        self.inner.categories.lock().unwrap().clone()
    }

    pub fn adds(&self) -> usize {
        self.inner.adds.load(Ordering::SeqCst)
    }

    pub fn pending_removals(&self) -> usize {
        self.inner.pending_removals.load(Ordering::SeqCst)
    }

    pub fn delivered_removals(&self) -> usize {
        self.inner.delivered_removals.load(Ordering::SeqCst)
    }

    /// Total mutating calls made so far.
    pub fn mutations(&self) -> usize {
        self.adds() + self.pending_removals() + self.delivered_removals()
    }

    pub fn reset_counters(&self) {
        self.inner.adds.store(0, Ordering::SeqCst);
        self.inner.pending_removals.store(0, Ordering::SeqCst);
        self.inner.delivered_removals.store(0, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_adds(&self, fail: bool) {
        self.inner.fail_adds.store(fail, Ordering::SeqCst);
    }

    pub fn fail_removals(&self, fail: bool) {
        self.inner.fail_removals.store(fail, Ordering::SeqCst);
    }

    pub fn fail_status(&self, fail: bool) {
        self.inner.fail_status.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, operation: &str) -> DomainResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(WeekenderError::Store(format!("{operation} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationCenter for MockNotificationCenter {
    async fn pending_requests(&self) -> DomainResult<Vec<NotificationRequest>> {
        Self::check(&self.inner.fail_reads, "pending read")?;
        Ok(self.pending())
    }

    async fn delivered_notifications(&self) -> DomainResult<Vec<DeliveredNotification>> {
        Self::check(&self.inner.fail_reads, "delivered read")?;
        Ok(self.inner.delivered.lock().unwrap().clone())
    }

    async fn add_request(&self, request: NotificationRequest) -> DomainResult<()> {
        self.inner.adds.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.inner.fail_adds, "add")?;
        let mut pending = self.inner.pending.lock().unwrap();
        pending.retain(|existing| existing.identifier != request.identifier);
        pending.push(request);
        Ok(())
    }

    async fn remove_pending_requests(&self, identifiers: &[String]) -> DomainResult<()> {
        self.inner.pending_removals.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.inner.fail_removals, "pending removal")?;
        self.inner
            .pending
            .lock()
            .unwrap()
            .retain(|request| !identifiers.contains(&request.identifier));
        Ok(())
    }

    async fn remove_delivered_notifications(&self, identifiers: &[String]) -> DomainResult<()> {
        self.inner.delivered_removals.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.inner.fail_removals, "delivered removal")?;
        self.inner
            .delivered
            .lock()
            .unwrap()
            .retain(|notification| !identifiers.contains(&notification.request.identifier));
        Ok(())
    }

    async fn request_authorization(&self) -> DomainResult<bool> {
        Self::check(&self.inner.fail_status, "authorization request")?;
        let granted = self.inner.grant_on_request.load(Ordering::SeqCst);
        let mut permission = self.inner.permission.lock().unwrap();
        if *permission == PermissionState::NotDetermined {
            *permission =
                if granted { PermissionState::Authorized } else { PermissionState::Denied };
        }
        Ok(permission.can_deliver_notifications())
    }

    async fn authorization_status(&self) -> DomainResult<PermissionState> {
        Self::check(&self.inner.fail_status, "authorization status")?;
        Ok(*self.inner.permission.lock().unwrap())
    }

    async fn set_categories(
        &self,
        categories: Vec<NotificationCategoryRegistration>,
    ) -> DomainResult<()> {
        *self.inner.categories.lock().unwrap() = categories;
        Ok(())
    }
}
