//! Database models and API types

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub use streak_core::StreakRecord;

use crate::error::{ApiError, Result};

/// Default and maximum page sizes for session history
pub const DEFAULT_HISTORY_LIMIT: i64 = 30;
pub const MAX_HISTORY_LIMIT: i64 = 365;

// === Database Entity Types ===

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Study session stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudySession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date_reviewed: DateTime<Utc>,
    pub studied_on: NaiveDate,
    pub deck_name: Option<String>,
    pub cards_studied: i32,
    pub correct_count: i32,
    pub created_at: DateTime<Utc>,
}

impl DbStudySession {
    /// Percentage of correct answers, 0 for an empty session
    pub fn score(&self) -> f64 {
        if self.cards_studied <= 0 {
            return 0.0;
        }
        f64::from(self.correct_count) * 100.0 / f64::from(self.cards_studied)
    }

    pub fn to_summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            date_reviewed: self.date_reviewed,
            studied_on: self.studied_on,
            deck_name: self.deck_name.clone(),
            cards_studied: self.cards_studied,
            correct_count: self.correct_count,
            score: self.score(),
        }
    }
}

/// Streak row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStreak {
    pub user_id: Uuid,
    pub streak_count: i32,
    pub best_streak: i32,
    pub last_studied_on: Option<NaiveDate>,
    pub last_session_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl DbStreak {
    /// Convert to streak-core record; `None` before the first session
    pub fn to_record(&self) -> Option<StreakRecord> {
        self.last_studied_on.map(|last_studied_on| StreakRecord {
            streak_count: u32::try_from(self.streak_count).unwrap_or(0),
            best_streak: u32::try_from(self.best_streak).unwrap_or(0),
            last_studied_on,
        })
    }

    pub fn to_response(&self) -> StreakResponse {
        StreakResponse {
            streak_count: i64::from(self.streak_count),
            best_streak: i64::from(self.best_streak),
            last_session_date: self.last_session_at,
        }
    }
}

// === User API Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

// === Streak API Types ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResponse {
    pub streak_count: i64,
    pub best_streak: i64,
    pub last_session_date: Option<DateTime<Utc>>,
}

impl StreakResponse {
    /// Streak for a user who has never recorded a session
    pub fn empty() -> Self {
        Self {
            streak_count: 0,
            best_streak: 0,
            last_session_date: None,
        }
    }
}

// === Session API Types ===

/// Session submitted by a client. The offset on `date_reviewed` decides
/// which local day the session counts towards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSessionRequest {
    pub date_reviewed: DateTime<FixedOffset>,
    pub deck_name: Option<String>,
    pub cards_studied: i32,
    pub correct_count: i32,
}

impl RecordSessionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.cards_studied < 0 {
            return Err(ApiError::BadRequest(
                "cards_studied must not be negative".to_string(),
            ));
        }
        if self.correct_count < 0 || self.correct_count > self.cards_studied {
            return Err(ApiError::BadRequest(
                "correct_count must be between 0 and cards_studied".to_string(),
            ));
        }
        Ok(())
    }

    /// Local calendar date of the session
    pub fn studied_on(&self) -> NaiveDate {
        self.date_reviewed.date_naive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordSessionResponse {
    pub session_id: Uuid,
    pub streak: StreakResponse,
}

#[derive(Debug, Deserialize)]
pub struct SessionHistoryQuery {
    pub limit: Option<i64>,
}

impl SessionHistoryQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub date_reviewed: DateTime<Utc>,
    pub studied_on: NaiveDate,
    pub deck_name: Option<String>,
    pub cards_studied: i32,
    pub correct_count: i32,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionHistoryResponse {
    pub sessions: Vec<SessionSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn request(cards_studied: i32, correct_count: i32) -> RecordSessionRequest {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        RecordSessionRequest {
            date_reviewed: offset.with_ymd_and_hms(2024, 3, 13, 22, 30, 0).unwrap(),
            deck_name: None,
            cards_studied,
            correct_count,
        }
    }

    #[test]
    fn test_studied_on_uses_submitted_offset() {
        // 22:30 at -07:00 is already the 14th in UTC.
        let req = request(10, 5);
        assert_eq!(req.studied_on(), NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
    }

    #[test]
    fn test_validate_counts() {
        assert!(request(10, 10).validate().is_ok());
        assert!(request(0, 0).validate().is_ok());
        assert!(request(-1, 0).validate().is_err());
        assert!(request(5, 6).validate().is_err());
        assert!(request(5, -1).validate().is_err());
    }

    #[test]
    fn test_history_limit_bounds() {
        assert_eq!(SessionHistoryQuery { limit: None }.effective_limit(), 30);
        assert_eq!(SessionHistoryQuery { limit: Some(0) }.effective_limit(), 1);
        assert_eq!(SessionHistoryQuery { limit: Some(5000) }.effective_limit(), 365);
    }

    #[test]
    fn test_session_score() {
        let mut session = DbStudySession {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            date_reviewed: Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap(),
            studied_on: NaiveDate::from_ymd_opt(2024, 3, 13).unwrap(),
            deck_name: Some("chemistry".to_string()),
            cards_studied: 8,
            correct_count: 6,
            created_at: Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap(),
        };
        assert_eq!(session.to_summary().score, 75.0);

        session.cards_studied = 0;
        session.correct_count = 0;
        assert_eq!(session.score(), 0.0);
    }

    #[test]
    fn test_streak_row_before_first_session() {
        let row = DbStreak {
            user_id: Uuid::nil(),
            streak_count: 0,
            best_streak: 0,
            last_studied_on: None,
            last_session_at: None,
            updated_at: Utc::now(),
        };
        assert_eq!(row.to_record(), None);
        assert_eq!(row.to_response(), StreakResponse::empty());
    }
}
