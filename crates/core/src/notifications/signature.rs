//! Content signatures for installed notifications
//!
//! Two requests with the same signature would look and fire identically, so
//! the reconciler can skip rewriting them. Every field is length-prefixed
//! before hashing so adjacent values cannot run together.

use weekender_domain::{NotificationRequest, NotificationTrigger};

/// Stand-in for calendar components that are not set.
const UNSET_COMPONENT: i64 = -1;

/// Stable BLAKE3 signature of a request's content and trigger, hex encoded.
pub fn signature(request: &NotificationRequest) -> String {
    let mut hasher = blake3::Hasher::new();
    let content = &request.content;

    write_field(&mut hasher, "identifier", &request.identifier);
    write_field(&mut hasher, "title", &content.title);
    write_field(&mut hasher, "subtitle", &content.subtitle);
    write_field(&mut hasher, "body", &content.body);
    write_field(&mut hasher, "category", &content.category_identifier);

    // BTreeMap iterates in key order.
    let payload = content
        .payload
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    write_field(&mut hasher, "payload", &payload);
    write_field(&mut hasher, "trigger", &trigger_descriptor(request.trigger.as_ref()));

    hex::encode(hasher.finalize().as_bytes())
}

/// Normalized, order-stable description of a trigger.
pub fn trigger_descriptor(trigger: Option<&NotificationTrigger>) -> String {
    let Some(trigger) = trigger else {
        return "none".to_string();
    };

    let detail = match trigger {
        NotificationTrigger::Calendar(calendar) => {
            let component = |value: Option<i64>| value.unwrap_or(UNSET_COMPONENT).to_string();
            [
                component(calendar.year.map(i64::from)),
                component(calendar.month.map(i64::from)),
                component(calendar.day.map(i64::from)),
                component(calendar.hour.map(i64::from)),
                component(calendar.minute.map(i64::from)),
                component(calendar.second.map(i64::from)),
            ]
            .join(":")
        }
        NotificationTrigger::TimeInterval { seconds, .. } => seconds.to_string(),
    };

    format!("{}|repeats={}|{}", trigger.kind(), trigger.repeats(), detail)
}

fn write_field(hasher: &mut blake3::Hasher, name: &str, value: &str) {
    for part in [name, value] {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
}
