//! Streak rules.
//!
//! The client only reads streak counts; [`advance`] is the rule the session
//! service applies when a new session is recorded.

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::date_utils::{days_between, same_calendar_day};
use crate::error::{Result, StreakError};
use crate::types::{StreakRecord, StreakState};

/// True if the last session happened on the same local day as `now`.
pub fn studied_today<Tz: TimeZone>(last_session: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    same_calendar_day(last_session, now)
}

/// Build a [`StreakState`] from a persisted count, zeroing stale streaks.
///
/// A streak stays alive while the last study day is today or yesterday.
/// A last study day after `today` is kept as-is.
pub fn normalize(
    streak_count: i64,
    last_study_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<StreakState> {
    let count = u32::try_from(streak_count).map_err(|_| StreakError::InvalidCount(streak_count))?;

    let alive = last_study_date.is_some_and(|last| days_between(last, today) <= 1);

    Ok(StreakState {
        current_streak_count: if alive { count } else { 0 },
        last_study_date,
    })
}

/// Apply a session studied on `studied_on` to the previous streak record.
pub fn advance(previous: Option<&StreakRecord>, studied_on: NaiveDate) -> StreakRecord {
    let Some(prev) = previous else {
        return StreakRecord::first(studied_on);
    };

    let streak_count = match days_between(prev.last_studied_on, studied_on) {
        // Late-arriving session for a day already covered
        d if d <= 0 => return *prev,
        1 => prev.streak_count.saturating_add(1),
        _ => 1,
    };

    StreakRecord {
        streak_count,
        best_streak: prev.best_streak.max(streak_count),
        last_studied_on: studied_on,
    }
}
