//! Streak snapshot endpoint

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::StreakResponse;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/users/:user_id/streak
/// Returns the stored streak as last written; the client decides whether
/// it is still alive for its own local date.
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StreakResponse>> {
    auth.ensure_owner(user_id)?;

    let streak = state
        .db
        .get_streak(user_id)
        .await?
        .map_or_else(StreakResponse::empty, |row| row.to_response());

    Ok(Json(streak))
}
