//! Port interfaces for the OS notification store

use async_trait::async_trait;
use weekender_domain::{
    DeliveredNotification, NotificationCategoryRegistration, NotificationRequest,
    PermissionState, Result,
};

/// Capability interface over the platform notification center.
///
/// The store is shared with other parts of the host app and with other
/// apps' extensions, so implementations must report every notification they
/// hold. Filtering to this engine's namespace is the caller's job.
#[async_trait]
pub trait NotificationCenter: Send + Sync {
    /// All notifications installed but not yet fired.
    async fn pending_requests(&self) -> Result<Vec<NotificationRequest>>;

    /// All notifications that fired and are still visible.
    async fn delivered_notifications(&self) -> Result<Vec<DeliveredNotification>>;

    /// Install a request, replacing any pending request with the same
    /// identifier.
    async fn add_request(&self, request: NotificationRequest) -> Result<()>;

    /// Cancel pending requests by identifier. Unknown identifiers are ignored.
    async fn remove_pending_requests(&self, identifiers: &[String]) -> Result<()>;

    /// Remove delivered notifications by identifier. Unknown identifiers are
    /// ignored.
    async fn remove_delivered_notifications(&self, identifiers: &[String]) -> Result<()>;

    /// Ask the user for permission. Returns whether it was granted.
    async fn request_authorization(&self) -> Result<bool>;

    /// Current authorization status.
    async fn authorization_status(&self) -> Result<PermissionState>;

    /// Register categories and their response actions.
    async fn set_categories(&self, categories: Vec<NotificationCategoryRegistration>)
        -> Result<()>;
}
