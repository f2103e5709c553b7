//! Repository for the `workout_plans` table and the nested plan aggregate.

use std::collections::HashMap;

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::workout_plan::{
    CreateWorkoutPlan, PlanItemDetail, UpdateWorkoutPlan, WorkoutPlan, WorkoutPlanDetail,
    WorkoutPlanItem, WorkoutPlanItemSet,
};

/// Column list for `workout_plans` queries.
const COLUMNS: &str = "id, user_id, friendly_name, created_at, updated_at";

/// Column list for `workout_plan_items` queries. `order` is reserved in SQL.
const ITEM_COLUMNS: &str = "id, plan_id, exercise_id, \"order\", created_at";

/// Column list for `workout_plan_item_sets` queries.
const SET_COLUMNS: &str = "id, item_id, reps, weight, rest, created_at";

/// Provides CRUD operations for workout plans.
pub struct WorkoutPlanRepo;

impl WorkoutPlanRepo {
    /// Insert a new plan for a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateWorkoutPlan,
    ) -> Result<WorkoutPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_plans (user_id, friendly_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutPlan>(&query)
            .bind(user_id)
            .bind(&input.friendly_name)
            .fetch_one(pool)
            .await
    }

    /// Find a plan row by ID (no items attached).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkoutPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workout_plans WHERE id = $1");
        sqlx::query_as::<_, WorkoutPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the full nested aggregate: plan -> items (by ascending `order`)
    /// -> sets (by ascending id).
    ///
    /// Returns `Ok(None)` when the plan does not exist. A plan with no items
    /// yields an empty `items` vec; an item with no sets yields an empty
    /// `sets` vec. Errors propagate -- no partial structure is ever returned.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkoutPlanDetail>, sqlx::Error> {
        let Some(plan) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let item_query = format!(
            "SELECT {ITEM_COLUMNS} FROM workout_plan_items
             WHERE plan_id = $1
             ORDER BY \"order\" ASC"
        );
        let items = sqlx::query_as::<_, WorkoutPlanItem>(&item_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        if items.is_empty() {
            return Ok(Some(WorkoutPlanDetail {
                plan,
                items: Vec::new(),
            }));
        }

        let item_ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
        let set_query = format!(
            "SELECT {SET_COLUMNS} FROM workout_plan_item_sets
             WHERE item_id = ANY($1)
             ORDER BY id ASC"
        );
        let sets = sqlx::query_as::<_, WorkoutPlanItemSet>(&set_query)
            .bind(&item_ids)
            .fetch_all(pool)
            .await?;

        let mut sets_by_item: HashMap<DbId, Vec<WorkoutPlanItemSet>> = HashMap::new();
        for set in sets {
            sets_by_item.entry(set.item_id).or_default().push(set);
        }

        let items = items
            .into_iter()
            .map(|item| {
                let sets = sets_by_item.remove(&item.id).unwrap_or_default();
                PlanItemDetail { item, sets }
            })
            .collect();

        Ok(Some(WorkoutPlanDetail { plan, items }))
    }

    /// List a user's plans, most recently created first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<WorkoutPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workout_plans
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, WorkoutPlan>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Rename a plan. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkoutPlan,
    ) -> Result<Option<WorkoutPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE workout_plans SET
                friendly_name = COALESCE($2, friendly_name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutPlan>(&query)
            .bind(id)
            .bind(&input.friendly_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plan (items and sets cascade). Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workout_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
