//! Collaborator contracts consumed by the streak engine.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FetchError;

/// Streak data as persisted by the session service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreakSnapshot {
    pub streak_count: i64,
    pub last_session_date: Option<DateTime<Utc>>,
}

/// A finished study session to record.
///
/// `date_reviewed` carries the user's UTC offset so the service can tell
/// which local day the session belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStudySession {
    pub date_reviewed: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_name: Option<String>,
    pub cards_studied: u32,
    pub correct_count: u32,
}

/// Acknowledgement for a recorded session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordedSession {
    pub session_id: Uuid,
}

/// Read side of the session service.
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    async fn get_streak_and_last_session(
        &self,
        user_id: Uuid,
    ) -> Result<StreakSnapshot, FetchError>;
}

/// Write side of the session service. Recording a session updates the
/// persisted streak as a side effect.
#[async_trait]
pub trait SessionRecorder: Send + Sync {
    async fn record_session(
        &self,
        user_id: Uuid,
        session: &NewStudySession,
    ) -> Result<RecordedSession, FetchError>;
}
