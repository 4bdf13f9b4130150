use chrono::{DateTime, TimeZone, Utc};
use weekender_domain::{PlanStatus, PlannedItem, WeekendDay, WeekendKey};

/// Monday 2024-01-01 08:00 UTC. The upcoming weekend is 2024-01-06.
pub fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
}

pub fn planned(id: &str, weekend: &str, days: &[WeekendDay], start: &str) -> PlannedItem {
    PlannedItem {
        id: id.to_string(),
        title: format!("Plan {id}"),
        weekend_key: WeekendKey::new(weekend),
        days: days.iter().copied().collect(),
        start_time: start.to_string(),
        end_time: "23:00".to_string(),
        is_all_day: false,
        status: PlanStatus::Planned,
    }
}
