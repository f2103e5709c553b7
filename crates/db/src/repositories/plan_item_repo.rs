//! Repository for the `workout_plan_items` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::workout_plan::{CreatePlanItem, ItemOrderUpdate, WorkoutPlanItem};

/// Column list for `workout_plan_items` queries. `order` is reserved in SQL.
const COLUMNS: &str = "id, plan_id, exercise_id, \"order\", created_at";

/// Provides CRUD operations for plan items.
pub struct PlanItemRepo;

impl PlanItemRepo {
    /// Insert a new item into a plan, returning the created row.
    pub async fn create(
        pool: &PgPool,
        plan_id: DbId,
        input: &CreatePlanItem,
    ) -> Result<WorkoutPlanItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_plan_items (plan_id, exercise_id, \"order\")
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutPlanItem>(&query)
            .bind(plan_id)
            .bind(input.exercise_id)
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    /// Find an item by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkoutPlanItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workout_plan_items WHERE id = $1");
        sqlx::query_as::<_, WorkoutPlanItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a plan's items by ascending display order.
    pub async fn list_by_plan(
        pool: &PgPool,
        plan_id: DbId,
    ) -> Result<Vec<WorkoutPlanItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workout_plan_items
             WHERE plan_id = $1
             ORDER BY \"order\" ASC"
        );
        sqlx::query_as::<_, WorkoutPlanItem>(&query)
            .bind(plan_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a batch of (item id, order) deltas within one plan.
    ///
    /// Only the listed items are touched -- the reorder endpoint sends
    /// deltas, not the full list. Items from other plans are ignored by
    /// the `plan_id` guard.
    pub async fn apply_order_updates(
        pool: &PgPool,
        plan_id: DbId,
        updates: &[ItemOrderUpdate],
    ) -> Result<u64, sqlx::Error> {
        let mut touched = 0;
        for update in updates {
            let result = sqlx::query(
                "UPDATE workout_plan_items SET \"order\" = $3
                 WHERE id = $1 AND plan_id = $2",
            )
            .bind(update.item_id)
            .bind(plan_id)
            .bind(update.order)
            .execute(pool)
            .await?;
            touched += result.rows_affected();
        }
        Ok(touched)
    }

    /// Delete an item (its sets cascade). Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workout_plan_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
