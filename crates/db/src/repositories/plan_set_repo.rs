//! Repository for the `workout_plan_item_sets` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::workout_plan::{CreatePlanSet, UpdatePlanSet, WorkoutPlanItemSet};

/// Column list for `workout_plan_item_sets` queries.
const COLUMNS: &str = "id, item_id, reps, weight, rest, created_at";

/// Provides CRUD operations for plan target sets.
pub struct PlanSetRepo;

impl PlanSetRepo {
    /// Insert a new target set under an item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        item_id: DbId,
        input: &CreatePlanSet,
    ) -> Result<WorkoutPlanItemSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_plan_item_sets (item_id, reps, weight, rest)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutPlanItemSet>(&query)
            .bind(item_id)
            .bind(&input.reps)
            .bind(&input.weight)
            .bind(&input.rest)
            .fetch_one(pool)
            .await
    }

    /// Find a set by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkoutPlanItemSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workout_plan_item_sets WHERE id = $1");
        sqlx::query_as::<_, WorkoutPlanItemSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a set's targets. Returns `None` if no row exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlanSet,
    ) -> Result<Option<WorkoutPlanItemSet>, sqlx::Error> {
        let query = format!(
            "UPDATE workout_plan_item_sets SET
                reps = COALESCE($2, reps),
                weight = COALESCE($3, weight),
                rest = COALESCE($4, rest)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutPlanItemSet>(&query)
            .bind(id)
            .bind(&input.reps)
            .bind(&input.weight)
            .bind(&input.rest)
            .fetch_optional(pool)
            .await
    }

    /// Delete a set. Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workout_plan_item_sets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
