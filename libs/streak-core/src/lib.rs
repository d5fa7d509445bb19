//! Core streak library shared by the client engine and the session backend.
//!
//! Provides:
//! - Calendar-day date utilities (local midnight, same-day checks)
//! - Injectable clocks for deterministic time handling
//! - Streak rules (normalisation, recording-side advance)
//! - Weekly streak calendar view-model
//! - Shared types (StreakState, CalendarDay, StreakRecord)

pub mod calendar;
pub mod clock;
pub mod date_utils;
pub mod error;
pub mod streak;
pub mod types;

pub use calendar::{marked_range, week_view};
pub use clock::{Clock, ManualClock, SystemClock};
pub use date_utils::{days_between, same_calendar_day, start_of_next_local_day, week_start};
pub use error::{Result, StreakError};
pub use streak::{advance, normalize, studied_today};
pub use types::{CalendarDay, StreakRecord, StreakState, WEEKDAY_LABELS};
