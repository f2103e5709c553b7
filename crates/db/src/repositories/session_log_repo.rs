//! Repository for the `workout_session_set_logs` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::workout_session::{UpsertSetLog, WorkoutSessionSetLog};

/// Column list for `workout_session_set_logs` queries.
const COLUMNS: &str = "id, session_id, plan_set_id, reps, weight, rest, \
                       completed, created_at, updated_at";

/// Provides operations for per-set session logs.
pub struct SessionLogRepo;

impl SessionLogRepo {
    /// Record actuals for one target set.
    ///
    /// Unique per (session, plan set): re-logging the same set updates the
    /// existing row instead of duplicating it.
    pub async fn upsert(
        pool: &PgPool,
        session_id: DbId,
        input: &UpsertSetLog,
    ) -> Result<WorkoutSessionSetLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_session_set_logs
                 (session_id, plan_set_id, reps, weight, rest, completed)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (session_id, plan_set_id) DO UPDATE SET
                 reps = EXCLUDED.reps,
                 weight = EXCLUDED.weight,
                 rest = EXCLUDED.rest,
                 completed = EXCLUDED.completed,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutSessionSetLog>(&query)
            .bind(session_id)
            .bind(input.plan_set_id)
            .bind(&input.reps)
            .bind(&input.weight)
            .bind(&input.rest)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    /// List a session's logs by ascending id.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<WorkoutSessionSetLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workout_session_set_logs
             WHERE session_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, WorkoutSessionSetLog>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Delete one log row. Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workout_session_set_logs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
