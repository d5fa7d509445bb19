//! Calendar-day utilities.
//!
//! All comparisons work on the local calendar date of the timezone a
//! timestamp carries, never on elapsed hours.

use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, TimeZone};

/// Step used to search past a DST gap at midnight.
const GAP_STEP_MINUTES: i64 = 15;
const GAP_MAX_STEPS: i64 = 24 * 60 / GAP_STEP_MINUTES;

/// True if `a` and `b` fall on the same local calendar day.
///
/// `b` is viewed in `a`'s timezone, so two instants with different offsets
/// are compared on the same wall calendar.
pub fn same_calendar_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.date_naive() == b.with_timezone(&a.timezone()).date_naive()
}

/// The instant of local midnight strictly after `reference`.
///
/// If midnight does not exist on that day (DST gap), returns the first
/// existing instant after the gap. If midnight is ambiguous, returns the
/// earlier of the two instants. Returns `None` only at the end of the
/// representable date range.
pub fn start_of_next_local_day<Tz: TimeZone>(reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = reference.timezone();
    let midnight = reference.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)?;

    (0..GAP_MAX_STEPS).find_map(|step| {
        let candidate = midnight + Duration::minutes(step * GAP_STEP_MINUTES);
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(instant) => Some(instant),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => None,
        }
    })
}

/// Signed number of calendar days from `earlier` to `later`.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

/// The Sunday that starts `date`'s week.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset)))
}
