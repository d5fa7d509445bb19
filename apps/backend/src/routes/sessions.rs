//! Study session endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/users/:user_id/sessions
/// Stores a session and advances the streak
pub async fn record(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<RecordSessionRequest>,
) -> Result<Json<RecordSessionResponse>> {
    auth.ensure_owner(user_id)?;
    request.validate()?;

    let (session, streak) = state.db.record_session(user_id, &request).await?;

    tracing::info!(
        user_id = %user_id,
        session_id = %session.id,
        studied_on = %session.studied_on,
        streak_count = streak.streak_count,
        "recorded study session"
    );

    Ok(Json(RecordSessionResponse {
        session_id: session.id,
        streak: streak.to_response(),
    }))
}

/// GET /api/users/:user_id/sessions?limit=N
pub async fn history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<SessionHistoryQuery>,
) -> Result<Json<SessionHistoryResponse>> {
    auth.ensure_owner(user_id)?;

    let sessions = state
        .db
        .list_sessions(user_id, query.effective_limit())
        .await?;

    Ok(Json(SessionHistoryResponse {
        sessions: sessions.iter().map(DbStudySession::to_summary).collect(),
    }))
}
