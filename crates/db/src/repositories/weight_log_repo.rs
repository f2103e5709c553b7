//! Repository for the `weight_logs` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::weight_log::{CreateWeightLog, WeightLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, weight_kg, logged_on, created_at";

/// Provides operations for body-weight logs.
pub struct WeightLogRepo;

impl WeightLogRepo {
    /// Record a weight entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateWeightLog,
    ) -> Result<WeightLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO weight_logs (user_id, weight_kg, logged_on)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeightLog>(&query)
            .bind(user_id)
            .bind(input.weight_kg)
            .bind(input.logged_on)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WeightLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM weight_logs WHERE id = $1");
        sqlx::query_as::<_, WeightLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's entries, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<WeightLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weight_logs
             WHERE user_id = $1
             ORDER BY logged_on DESC, id DESC"
        );
        sqlx::query_as::<_, WeightLog>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM weight_logs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
