//! Request bodies for integration tests.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::{json, Value};

/// A timestamp at the given local wall-clock time and UTC offset (hours).
pub fn local_time(
    offset_hours: i32,
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

pub fn user_register_request(name: Option<&str>) -> Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

pub fn session_request(date_reviewed: DateTime<FixedOffset>, cards: i32, correct: i32) -> Value {
    json!({
        "date_reviewed": date_reviewed.to_rfc3339(),
        "deck_name": "biology",
        "cards_studied": cards,
        "correct_count": correct,
    })
}
