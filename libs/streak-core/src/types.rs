//! Core types for streak tracking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single-letter weekday labels, Sunday first.
pub const WEEKDAY_LABELS: [char; 7] = ['S', 'M', 'T', 'W', 'T', 'F', 'S'];

/// A user's streak as seen by the client.
///
/// `current_streak_count` is 0 whenever `last_study_date` is absent or older
/// than yesterday. Build it through [`crate::streak::normalize`] to keep that
/// invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<NaiveDate>,
}

/// One cell of the weekly streak calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub date_number: u32,
    pub weekday_label: char,
    pub is_today: bool,
    pub is_in_streak: bool,
    pub is_streak_start: bool,
    pub is_streak_end: bool,
}

/// Persisted per-user streak, maintained when sessions are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub streak_count: u32,
    pub best_streak: u32,
    pub last_studied_on: NaiveDate,
}

impl StreakRecord {
    /// A fresh one-day streak.
    pub fn first(studied_on: NaiveDate) -> Self {
        Self {
            streak_count: 1,
            best_streak: 1,
            last_studied_on: studied_on,
        }
    }
}
