//! Permission gate over the store's authorization API

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};
use weekender_domain::PermissionState;

use super::ports::NotificationCenter;

/// Queries and requests notification authorization.
///
/// Failures never surface as errors: the gate falls back to the last status
/// it successfully observed.
pub struct PermissionGate {
    center: Arc<dyn NotificationCenter>,
    last_known: Mutex<PermissionState>,
}

impl PermissionGate {
    pub fn new(center: Arc<dyn NotificationCenter>) -> Self {
        Self { center, last_known: Mutex::new(PermissionState::default()) }
    }

    /// Current authorization, or the last known one if the query fails.
    pub async fn authorization_status(&self) -> PermissionState {
        match self.center.authorization_status().await {
            Ok(state) => {
                *self.last_known.lock() = state;
                state
            }
            Err(err) => {
                let fallback = *self.last_known.lock();
                warn!(error = %err, fallback = %fallback, "authorization status query failed");
                fallback
            }
        }
    }

    /// Ask for permission, then report the authoritative status.
    pub async fn request_authorization(&self) -> PermissionState {
        match self.center.request_authorization().await {
            Ok(granted) => debug!(granted, "authorization request finished"),
            Err(err) => warn!(error = %err, "authorization request failed"),
        }
        self.authorization_status().await
    }

    /// Last status observed without querying the store.
    pub fn last_known(&self) -> PermissionState {
        *self.last_known.lock()
    }
}
