//! Notification authorization state

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// App-level view of the OS notification authorization status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    #[default]
    NotDetermined,
    Denied,
    Authorized,
    Provisional,
    Ephemeral,
}

impl_wire_name_conversions!(PermissionState {
    NotDetermined => "not_determined",
    Denied => "denied",
    Authorized => "authorized",
    Provisional => "provisional",
    Ephemeral => "ephemeral",
});

impl PermissionState {
    /// Whether scheduled notifications would actually reach the user.
    pub const fn can_deliver_notifications(&self) -> bool {
        matches!(self, Self::Authorized | Self::Provisional | Self::Ephemeral)
    }
}
