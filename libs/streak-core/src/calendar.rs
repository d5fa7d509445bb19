//! Weekly streak calendar.
//!
//! The view covers exactly the current Sunday-first week. A streak that began
//! before this week's Sunday is only shown from Sunday onward.

use chrono::{Datelike, Days, NaiveDate};
use std::ops::RangeInclusive;

use crate::date_utils::week_start;
use crate::error::{Result, StreakError};
use crate::types::{CalendarDay, WEEKDAY_LABELS};

/// Indices of the current week covered by a streak ending today.
///
/// `None` when the streak is empty. Otherwise the range always ends at
/// `current_weekday` and never starts before index 0.
pub fn marked_range(
    current_streak_count: u32,
    current_weekday: usize,
) -> Option<RangeInclusive<usize>> {
    if current_streak_count == 0 {
        return None;
    }
    let visible = usize::try_from(current_streak_count)
        .unwrap_or(usize::MAX)
        .min(current_weekday + 1);
    Some(current_weekday + 1 - visible..=current_weekday)
}

/// The seven days of `today`'s week with streak flags applied.
pub fn week_view(current_streak_count: u32, today: NaiveDate) -> Result<Vec<CalendarDay>> {
    let current_weekday = today.weekday().num_days_from_sunday() as usize;
    let sunday = week_start(today).ok_or(StreakError::DateOutOfRange(today))?;
    let marked = marked_range(current_streak_count, current_weekday);

    WEEKDAY_LABELS
        .iter()
        .enumerate()
        .map(|(index, &weekday_label)| {
            let date = sunday
                .checked_add_days(Days::new(index as u64))
                .ok_or(StreakError::DateOutOfRange(today))?;
            let (is_in_streak, is_streak_start, is_streak_end) = match &marked {
                Some(range) => (
                    range.contains(&index),
                    index == *range.start(),
                    index == *range.end(),
                ),
                None => (false, false, false),
            };
            Ok(CalendarDay {
                date,
                date_number: date.day(),
                weekday_label,
                is_today: index == current_weekday,
                is_in_streak,
                is_streak_start,
                is_streak_end,
            })
        })
        .collect()
}
