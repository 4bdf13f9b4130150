//! Reminder candidate builder
//!
//! Turns plans, protections and preferences into the set of reminders that
//! should be installed. Each candidate is built independently and returns a
//! `Result`; a failure (disabled category, unparsable time, no matching
//! occurrence) drops that one candidate and never the whole batch.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use tracing::debug;
use weekender_domain::constants::{
    EVENT_REMINDER_PREFIX, MONDAY_RECAP_HOUR, MONDAY_RECAP_ID, PAYLOAD_DAY, PAYLOAD_EVENT_ID,
    PLANNING_NUDGE_ID, SUNDAY_WRAP_UP_HOUR, SUNDAY_WRAP_UP_ID, WEEKLY_SUMMARY_ID,
};
use weekender_domain::{
    weekday_from_number, CalendarTrigger, CandidateError, NotificationCategory,
    NotificationConfig, NotificationTrigger, PlanStatus, PlannedItem, ProtectionSet,
    ReminderCandidate, ReminderPreferences, RouteAction, WeekendDay, WeekendKey,
    WeeklyReminderPreference,
};

use super::occurrence::{local_instant, next_saturday, next_weekday_occurrence};

/// Everything a single reschedule call knows about the user's world.
#[derive(Debug, Clone)]
pub struct ReminderInputs<'a, Z: TimeZone> {
    pub events: &'a [PlannedItem],
    pub protections: &'a ProtectionSet,
    pub preferences: &'a ReminderPreferences,
    pub session_is_active: bool,
    /// Reference instant; its time zone defines the local calendar.
    pub now: DateTime<Z>,
}

/// Tunables for the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateBuilderConfig {
    pub max_event_reminders: usize,
    pub all_day_reminder_hour: u32,
}

impl Default for CandidateBuilderConfig {
    fn default() -> Self {
        Self::from(&NotificationConfig::default())
    }
}

impl From<&NotificationConfig> for CandidateBuilderConfig {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            max_event_reminders: config.max_event_reminders,
            all_day_reminder_hour: config.all_day_reminder_hour,
        }
    }
}

/// Counts of a weekend's plans by lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendTally {
    pub planned: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl WeekendTally {
    pub fn for_weekend(events: &[PlannedItem], key: &WeekendKey) -> Self {
        events.iter().filter(|item| &item.weekend_key == key).fold(
            Self::default(),
            |mut tally, item| {
                match item.status {
                    PlanStatus::Planned => tally.planned += 1,
                    PlanStatus::Completed => tally.completed += 1,
                    PlanStatus::Cancelled => tally.cancelled += 1,
                }
                tally
            },
        )
    }

    pub const fn total(&self) -> usize {
        self.planned + self.completed + self.cancelled
    }
}

/// Identifier of the reminder for `event_id` on `day`.
pub fn event_identifier(event_id: &str, day: WeekendDay) -> String {
    format!("{EVENT_REMINDER_PREFIX}.{event_id}.{day}")
}

/// Builds reminder candidates for every category.
#[derive(Debug, Clone, Default)]
pub struct ReminderCandidateBuilder {
    config: CandidateBuilderConfig,
}

impl ReminderCandidateBuilder {
    pub fn new(config: CandidateBuilderConfig) -> Self {
        Self { config }
    }

    /// All candidates for this call: the four singleton categories in fixed
    /// order, then event reminders by fire time.
    ///
    /// An inactive session yields nothing.
    pub fn build<Z: TimeZone>(&self, inputs: &ReminderInputs<'_, Z>) -> Vec<ReminderCandidate> {
        if !inputs.session_is_active {
            debug!("session inactive; no reminder candidates");
            return Vec::new();
        }

        let singletons = [
            (NotificationCategory::WeeklySummary, self.weekly_summary(inputs)),
            (NotificationCategory::PlanningNudge, self.planning_nudge(inputs)),
            (NotificationCategory::SundayWrapUp, self.sunday_wrap_up(inputs)),
            (NotificationCategory::MondayRecap, self.monday_recap(inputs)),
        ];

        let mut candidates = Vec::new();
        for (category, result) in singletons {
            match result {
                Ok(candidate) => candidates.push(candidate),
                Err(reason) => {
                    debug!(category = category.tag(), %reason, "reminder candidate skipped");
                }
            }
        }

        candidates.extend(self.event_reminders(inputs));
        candidates
    }

    /// One summary of the upcoming weekend.
    pub fn weekly_summary<Z: TimeZone>(
        &self,
        inputs: &ReminderInputs<'_, Z>,
    ) -> Result<ReminderCandidate, CandidateError> {
        let pref = &inputs.preferences.weekly_summary;
        if !pref.enabled {
            return Err(CandidateError::Disabled("weekly summary"));
        }

        let (fire, saturday) = weekly_fire_and_target(pref, &inputs.now)?;
        let key = WeekendKey::from_saturday(saturday);
        let tally = WeekendTally::for_weekend(inputs.events, &key);
        let label = weekend_label(saturday);

        let body = if tally.planned > 0 {
            format!("Your weekend of {label} has {}.", plural(tally.planned, "plan", "plans"))
        } else if inputs.protections.contains(&key) {
            format!("Your weekend of {label} is protected. Enjoy the downtime.")
        } else {
            format!("Your weekend of {label} is still free. Tap to add a plan.")
        };

        Ok(candidate(
            WEEKLY_SUMMARY_ID.to_string(),
            NotificationCategory::WeeklySummary,
            "Your weekend at a glance".to_string(),
            body,
            RouteAction::OpenWeekend(key).to_payload(),
            &fire,
        ))
    }

    /// Nudge to plan something; only exists when the target weekend is
    /// empty and unprotected.
    pub fn planning_nudge<Z: TimeZone>(
        &self,
        inputs: &ReminderInputs<'_, Z>,
    ) -> Result<ReminderCandidate, CandidateError> {
        let pref = &inputs.preferences.planning_nudge;
        if !pref.enabled {
            return Err(CandidateError::Disabled("planning nudge"));
        }

        let (fire, saturday) = weekly_fire_and_target(pref, &inputs.now)?;
        let key = WeekendKey::from_saturday(saturday);
        if WeekendTally::for_weekend(inputs.events, &key).planned > 0 {
            return Err(CandidateError::AlreadyPlanned(key.to_string()));
        }
        if inputs.protections.contains(&key) {
            return Err(CandidateError::Protected(key.to_string()));
        }

        Ok(candidate(
            PLANNING_NUDGE_ID.to_string(),
            NotificationCategory::PlanningNudge,
            "Plan your weekend".to_string(),
            format!(
                "Nothing planned for the weekend of {} yet. Tap to add a plan.",
                weekend_label(saturday)
            ),
            RouteAction::AddPlan(key).to_payload(),
            &fire,
        ))
    }

    /// Sunday evening look back at the weekend that is ending.
    pub fn sunday_wrap_up<Z: TimeZone>(
        &self,
        inputs: &ReminderInputs<'_, Z>,
    ) -> Result<ReminderCandidate, CandidateError> {
        if !inputs.preferences.sunday_wrap_up.enabled {
            return Err(CandidateError::Disabled("sunday wrap-up"));
        }

        let (fire, key) =
            fixed_fire_and_weekend(Weekday::Sun, SUNDAY_WRAP_UP_HOUR, 1, &inputs.now)?;
        let tally = WeekendTally::for_weekend(inputs.events, &key);
        let body = if tally.total() == 0 {
            "Nothing was planned this weekend. Tap to look ahead.".to_string()
        } else {
            format!(
                "{} done, {} still open, {} cancelled. How did it go?",
                tally.completed, tally.planned, tally.cancelled
            )
        };

        Ok(candidate(
            SUNDAY_WRAP_UP_ID.to_string(),
            NotificationCategory::SundayWrapUp,
            "Weekend wrap-up".to_string(),
            body,
            RouteAction::OpenWeekend(key).to_payload(),
            &fire,
        ))
    }

    /// Monday morning recap of the weekend just gone.
    pub fn monday_recap<Z: TimeZone>(
        &self,
        inputs: &ReminderInputs<'_, Z>,
    ) -> Result<ReminderCandidate, CandidateError> {
        if !inputs.preferences.monday_recap.enabled {
            return Err(CandidateError::Disabled("monday recap"));
        }

        let (fire, key) = fixed_fire_and_weekend(Weekday::Mon, MONDAY_RECAP_HOUR, 2, &inputs.now)?;
        let tally = WeekendTally::for_weekend(inputs.events, &key);
        let body = if tally.total() == 0 {
            "No plans were logged last weekend.".to_string()
        } else {
            format!(
                "Last weekend: {} done, {} cancelled, {} left open.",
                tally.completed, tally.cancelled, tally.planned
            )
        };

        Ok(candidate(
            MONDAY_RECAP_ID.to_string(),
            NotificationCategory::MondayRecap,
            "Weekend recap".to_string(),
            body,
            RouteAction::OpenWeekend(key).to_payload(),
            &fire,
        ))
    }

    /// Per-day reminders for planned items, earliest first, capped.
    pub fn event_reminders<Z: TimeZone>(
        &self,
        inputs: &ReminderInputs<'_, Z>,
    ) -> Vec<ReminderCandidate> {
        let pref = inputs.preferences.event_reminders;
        if !pref.enabled {
            debug!(category = NotificationCategory::EventReminder.tag(), "event reminders disabled");
            return Vec::new();
        }

        let mut candidates: Vec<ReminderCandidate> = inputs
            .events
            .iter()
            .filter(|item| item.is_planned())
            .flat_map(|item| item.days.iter().map(move |day| (item, *day)))
            .filter_map(|(item, day)| {
                match self.event_reminder(item, day, pref.lead_minutes, &inputs.now) {
                    Ok(candidate) => Some(candidate),
                    Err(reason) => {
                        debug!(event_id = %item.id, day = %day, %reason, "event reminder skipped");
                        None
                    }
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.fire_at.cmp(&b.fire_at).then_with(|| a.identifier.cmp(&b.identifier))
        });
        let mut seen = HashSet::new();
        candidates.retain(|candidate| seen.insert(candidate.identifier.clone()));

        if candidates.len() > self.config.max_event_reminders {
            debug!(
                total = candidates.len(),
                kept = self.config.max_event_reminders,
                "event reminders capped"
            );
            candidates.truncate(self.config.max_event_reminders);
        }
        candidates
    }

    fn event_reminder<Z: TimeZone>(
        &self,
        item: &PlannedItem,
        day: WeekendDay,
        lead_minutes: u32,
        now: &DateTime<Z>,
    ) -> Result<ReminderCandidate, CandidateError> {
        let invalid_key = || CandidateError::InvalidWeekendKey(item.weekend_key.to_string());
        let saturday = item.weekend_key.saturday().ok_or_else(invalid_key)?;
        let date = day.date_for(saturday).ok_or_else(invalid_key)?;

        let (fire_time, body) = if item.is_all_day {
            let time = NaiveTime::from_hms_opt(self.config.all_day_reminder_hour, 0, 0)
                .ok_or_else(|| {
                    CandidateError::UnresolvableLocalTime(format!(
                        "{date} {:02}:00",
                        self.config.all_day_reminder_hour
                    ))
                })?;
            (time, format!("All day on {}.", date.format("%A")))
        } else {
            let start = item
                .parsed_start_time()
                .ok_or_else(|| CandidateError::UnparsableTime(item.start_time.clone()))?;
            (
                lead_time_before(start, lead_minutes),
                format!("Starts at {} on {}.", start.format("%H:%M"), date.format("%A")),
            )
        };

        let fire = local_instant(&now.timezone(), date, fire_time)
            .ok_or_else(|| CandidateError::UnresolvableLocalTime(format!("{date} {fire_time}")))?;
        if fire <= *now {
            return Err(CandidateError::InPast(fire.with_timezone(&Utc).to_rfc3339()));
        }

        let mut payload = RouteAction::OpenWeekend(item.weekend_key.clone()).to_payload();
        payload.insert(PAYLOAD_EVENT_ID.to_string(), item.id.clone());
        payload.insert(PAYLOAD_DAY.to_string(), day.to_string());

        let title = if item.title.trim().is_empty() {
            "Upcoming plan".to_string()
        } else {
            item.title.clone()
        };

        Ok(candidate(
            event_identifier(&item.id, day),
            NotificationCategory::EventReminder,
            title,
            body,
            payload,
            &fire,
        ))
    }
}

/// Subtract the lead time without crossing into the previous day.
fn lead_time_before(start: NaiveTime, lead_minutes: u32) -> NaiveTime {
    let start_minutes = start.num_seconds_from_midnight() / 60;
    let fire_minutes = start_minutes.saturating_sub(lead_minutes);
    NaiveTime::from_hms_opt(fire_minutes / 60, fire_minutes % 60, 0).unwrap_or_default()
}

fn weekly_fire_and_target<Z: TimeZone>(
    pref: &WeeklyReminderPreference,
    now: &DateTime<Z>,
) -> Result<(DateTime<Z>, NaiveDate), CandidateError> {
    let weekday =
        weekday_from_number(pref.weekday).ok_or(CandidateError::InvalidWeekday(pref.weekday))?;
    let fire = next_weekday_occurrence(weekday, pref.hour, pref.minute, now).ok_or(
        CandidateError::NoOccurrence { weekday: pref.weekday, hour: pref.hour, minute: pref.minute },
    )?;
    let fire_date = fire.date_naive();
    let saturday = next_saturday(fire_date).ok_or(CandidateError::NoTargetWeekend(fire_date))?;
    Ok((fire, saturday))
}

/// Fire instant for a fixed weekday/hour reminder and the weekend it looks
/// back on, `days_back` days before the fire date.
fn fixed_fire_and_weekend<Z: TimeZone>(
    weekday: Weekday,
    hour: u32,
    days_back: u64,
    now: &DateTime<Z>,
) -> Result<(DateTime<Z>, WeekendKey), CandidateError> {
    let weekday_number = weekday.number_from_sunday() as u8;
    let fire = next_weekday_occurrence(weekday, hour, 0, now).ok_or(
        CandidateError::NoOccurrence { weekday: weekday_number, hour, minute: 0 },
    )?;
    let fire_date = fire.date_naive();
    let saturday = fire_date
        .checked_sub_days(Days::new(days_back))
        .ok_or(CandidateError::NoTargetWeekend(fire_date))?;
    Ok((fire, WeekendKey::from_saturday(saturday)))
}

fn candidate<Z: TimeZone>(
    identifier: String,
    category: NotificationCategory,
    title: String,
    body: String,
    payload: BTreeMap<String, String>,
    fire: &DateTime<Z>,
) -> ReminderCandidate {
    ReminderCandidate {
        identifier,
        category,
        title,
        body,
        payload,
        trigger: NotificationTrigger::Calendar(CalendarTrigger::at(fire)),
        fire_at: fire.with_timezone(&Utc),
    }
}

fn weekend_label(saturday: NaiveDate) -> String {
    saturday.format("%b %-d").to_string()
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}
