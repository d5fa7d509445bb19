//! PostgreSQL database operations

use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const SESSION_COLUMNS: &str = "id, user_id, date_reviewed, studied_on, deck_name, \
     cards_studied, correct_count, created_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, token, name)
            VALUES ($1, $2, $3)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Streak Repository ===

    /// Get the persisted streak row for a user
    pub async fn get_streak(&self, user_id: Uuid) -> Result<Option<DbStreak>> {
        let streak = sqlx::query_as::<_, DbStreak>(
            r#"
            SELECT user_id, streak_count, best_streak, last_studied_on, last_session_at, updated_at
            FROM streaks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(streak)
    }

    // === Session Repository ===

    /// Insert a session and advance the user's streak in one transaction.
    pub async fn record_session(
        &self,
        user_id: Uuid,
        request: &RecordSessionRequest,
    ) -> Result<(DbStudySession, DbStreak)> {
        let mut tx = self.pool.begin().await?;

        let session = sqlx::query_as::<_, DbStudySession>(&format!(
            r#"
            INSERT INTO study_sessions (id, user_id, date_reviewed, studied_on, deck_name,
                                        cards_studied, correct_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(request.date_reviewed.with_timezone(&Utc))
        .bind(request.studied_on())
        .bind(&request.deck_name)
        .bind(request.cards_studied)
        .bind(request.correct_count)
        .fetch_one(&mut *tx)
        .await?;

        // Make sure a row exists so it can be locked
        sqlx::query(
            r#"
            INSERT INTO streaks (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let previous = sqlx::query_as::<_, DbStreak>(
            r#"
            SELECT user_id, streak_count, best_streak, last_studied_on, last_session_at, updated_at
            FROM streaks
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let record = streak_core::advance(previous.to_record().as_ref(), session.studied_on);
        let last_session_at = previous
            .last_session_at
            .map_or(session.date_reviewed, |prev| prev.max(session.date_reviewed));

        let streak = sqlx::query_as::<_, DbStreak>(
            r#"
            UPDATE streaks
            SET streak_count = $2,
                best_streak = $3,
                last_studied_on = $4,
                last_session_at = $5,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, streak_count, best_streak, last_studied_on,
                      last_session_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(i32::try_from(record.streak_count).unwrap_or(i32::MAX))
        .bind(i32::try_from(record.best_streak).unwrap_or(i32::MAX))
        .bind(record.last_studied_on)
        .bind(last_session_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((session, streak))
    }

    /// Most recent sessions for a user, newest first
    pub async fn list_sessions(&self, user_id: Uuid, limit: i64) -> Result<Vec<DbStudySession>> {
        let sessions = sqlx::query_as::<_, DbStudySession>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM study_sessions
            WHERE user_id = $1
            ORDER BY date_reviewed DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}
