//! Occurrence calculator - pure weekday/time arithmetic
//!
//! Every function here takes "now" explicitly so callers and tests control
//! the clock. Local wall times are resolved in the time zone of the supplied
//! instant:
//! - a repeated wall time (DST fall-back) resolves to its first instant
//! - a skipped wall time (DST spring-forward) resolves one hour later
//!
//! Scans only move forward from the reference point.

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Weekday,
};

/// Days scanned when looking for the next weekday/time match. Eight covers
/// the case where today matches the weekday but the time already passed.
const OCCURRENCE_SCAN_DAYS: u64 = 8;

/// Days scanned when looking for the next target weekday, inclusive.
const TARGET_SCAN_DAYS: u64 = 7;

/// First instant strictly after `after` falling on `weekday` at
/// `hour:minute:00` local time.
///
/// Returns `None` only when the request cannot be represented (hour or
/// minute out of range).
pub fn next_weekday_occurrence<Z: TimeZone>(
    weekday: Weekday,
    hour: u32,
    minute: u32,
    after: &DateTime<Z>,
) -> Option<DateTime<Z>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let tz = after.timezone();
    let start = after.date_naive();

    (0..OCCURRENCE_SCAN_DAYS)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .filter(|date| date.weekday() == weekday)
        .filter_map(|date| resolve_local(&tz, date.and_time(time)))
        .find(|candidate| candidate > after)
}

/// First date on or after `on_or_after` that falls on `weekday`.
///
/// Scans at most seven days, so `None` cannot happen for a valid calendar;
/// callers still treat it as a dropped candidate.
pub fn next_target_weekday(on_or_after: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    (0..TARGET_SCAN_DAYS)
        .filter_map(|offset| on_or_after.checked_add_days(Days::new(offset)))
        .find(|date| date.weekday() == weekday)
}

/// The weekend anchor: next Saturday on or after `on_or_after`.
pub fn next_saturday(on_or_after: NaiveDate) -> Option<NaiveDate> {
    next_target_weekday(on_or_after, Weekday::Sat)
}

/// Resolve a local wall time on `date` in `tz`.
pub fn local_instant<Z: TimeZone>(tz: &Z, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Z>> {
    resolve_local(tz, date.and_time(time))
}

fn resolve_local<Z: TimeZone>(tz: &Z, naive: NaiveDateTime) -> Option<DateTime<Z>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(first, _) => Some(first),
        LocalResult::None => tz.from_local_datetime(&(naive + Duration::hours(1))).earliest(),
    }
}
