//! Navigation actions produced by notification taps

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::plans::WeekendKey;
use crate::constants::{PAYLOAD_ROUTE, PAYLOAD_WEEKEND_KEY, ROUTE_ADD_PLAN, ROUTE_OPEN_WEEKEND};

/// Where the UI should navigate after a notification is opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "weekend_key", rename_all = "camelCase")]
pub enum RouteAction {
    OpenWeekend(WeekendKey),
    AddPlan(WeekendKey),
}

impl RouteAction {
    pub fn weekend_key(&self) -> &WeekendKey {
        match self {
            Self::OpenWeekend(key) | Self::AddPlan(key) => key,
        }
    }

    /// Payload entries that encode this route on a notification.
    pub fn to_payload(&self) -> BTreeMap<String, String> {
        let route = match self {
            Self::OpenWeekend(_) => ROUTE_OPEN_WEEKEND,
            Self::AddPlan(_) => ROUTE_ADD_PLAN,
        };
        BTreeMap::from([
            (PAYLOAD_ROUTE.to_string(), route.to_string()),
            (PAYLOAD_WEEKEND_KEY.to_string(), self.weekend_key().to_string()),
        ])
    }

    /// Decode a route from notification payload entries.
    pub fn from_payload(payload: &BTreeMap<String, String>) -> Option<Self> {
        let key = WeekendKey::new(payload.get(PAYLOAD_WEEKEND_KEY)?.as_str());
        match payload.get(PAYLOAD_ROUTE)?.as_str() {
            ROUTE_OPEN_WEEKEND => Some(Self::OpenWeekend(key)),
            ROUTE_ADD_PLAN => Some(Self::AddPlan(key)),
            _ => None,
        }
    }
}
