//! Repository for the `workout_sessions` table and session aggregates.

use std::collections::HashMap;

use chrono::NaiveDate;
use futures::future::join_all;
use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::exercise::Exercise;
use crate::models::workout_plan::WorkoutPlanDetail;
use crate::models::workout_session::{
    CreateWorkoutSession, WorkoutSession, WorkoutSessionDetail,
};
use crate::repositories::{ExerciseRepo, SessionLogRepo, WorkoutPlanRepo};

/// Column list for `workout_sessions` queries.
const COLUMNS: &str = "id, user_id, plan_id, completed, scheduled_for, \
                       completed_at, created_at, updated_at";

/// Provides CRUD operations for workout sessions.
pub struct WorkoutSessionRepo;

impl WorkoutSessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateWorkoutSession,
    ) -> Result<WorkoutSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_sessions (user_id, plan_id, scheduled_for)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(user_id)
            .bind(input.plan_id)
            .bind(input.scheduled_for)
            .fetch_one(pool)
            .await
    }

    /// Find a session row by ID regardless of completion state.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkoutSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workout_sessions WHERE id = $1");
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a live session with its resolved plan and set logs.
    ///
    /// Only incomplete sessions are visible through this accessor: a
    /// completed session reports not-found here because callers of this
    /// path only ever want a session they can still execute.
    pub async fn find_active_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkoutSessionDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workout_sessions
             WHERE id = $1 AND completed = FALSE"
        );
        let Some(session) = sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let workout_plan = match session.plan_id {
            Some(plan_id) => WorkoutPlanRepo::find_detail(pool, plan_id).await?,
            None => None,
        };
        // A session with a plan must resolve every referenced exercise
        // before it can render.
        let exercises = match &workout_plan {
            Some(plan) => {
                ExerciseRepo::find_by_ids(pool, &exercise_ids_of(plan)).await?
            }
            None => Vec::new(),
        };
        let logs = SessionLogRepo::list_by_session(pool, id).await?;

        Ok(Some(WorkoutSessionDetail {
            session,
            workout_plan,
            exercises,
            logs,
        }))
    }

    /// List all of a user's sessions with plans resolved best-effort.
    ///
    /// Distinct plan ids are resolved concurrently; a plan whose lookup
    /// fails (or that has disappeared) is attached as `None` on its
    /// sessions rather than failing the whole batch.
    pub async fn list_for_user_with_plans(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WorkoutSessionDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workout_sessions
             WHERE user_id = $1
             ORDER BY scheduled_for DESC, id DESC"
        );
        let sessions = sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let mut plan_ids: Vec<DbId> = sessions.iter().filter_map(|s| s.plan_id).collect();
        plan_ids.sort_unstable();
        plan_ids.dedup();

        let lookups = plan_ids
            .iter()
            .map(|&plan_id| WorkoutPlanRepo::find_detail(pool, plan_id));
        let resolved: HashMap<DbId, WorkoutPlanDetail> = plan_ids
            .iter()
            .zip(join_all(lookups).await)
            .filter_map(|(&plan_id, result)| match result {
                Ok(Some(detail)) => Some((plan_id, detail)),
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(plan_id, error = %e, "Skipping unresolvable plan in session batch");
                    None
                }
            })
            .collect();

        // One catalog fetch covers every resolved plan in the batch.
        let mut all_exercise_ids: Vec<DbId> = resolved
            .values()
            .flat_map(exercise_ids_of)
            .collect();
        all_exercise_ids.sort_unstable();
        all_exercise_ids.dedup();
        let catalog: Vec<Exercise> = ExerciseRepo::find_by_ids(pool, &all_exercise_ids).await?;

        let mut details = Vec::with_capacity(sessions.len());
        for session in sessions {
            let workout_plan = session.plan_id.and_then(|pid| resolved.get(&pid).cloned());
            let exercises = match &workout_plan {
                Some(plan) => {
                    let wanted = exercise_ids_of(plan);
                    catalog
                        .iter()
                        .filter(|e| wanted.contains(&e.id))
                        .cloned()
                        .collect()
                }
                None => Vec::new(),
            };
            let logs = SessionLogRepo::list_by_session(pool, session.id).await?;
            details.push(WorkoutSessionDetail {
                session,
                workout_plan,
                exercises,
                logs,
            });
        }
        Ok(details)
    }

    /// Mark a session completed. Returns the updated row, or `None` if the
    /// session does not exist or was already completed.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkoutSession>, sqlx::Error> {
        let query = format!(
            "UPDATE workout_sessions
             SET completed = TRUE, completed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND completed = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a session (logs cascade). Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workout_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Idempotently create a planned session for a user on a date.
    ///
    /// Used by the population job: the partial unique index on
    /// (user_id, plan_id, scheduled_for) makes re-runs no-ops. Returns
    /// `true` if a new session was created.
    pub async fn create_planned_if_absent(
        pool: &PgPool,
        user_id: DbId,
        plan_id: DbId,
        scheduled_for: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO workout_sessions (user_id, plan_id, scheduled_for)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, plan_id, scheduled_for) WHERE plan_id IS NOT NULL
             DO NOTHING",
        )
        .bind(user_id)
        .bind(plan_id)
        .bind(scheduled_for)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Distinct exercise ids referenced by a plan aggregate's items.
fn exercise_ids_of(plan: &WorkoutPlanDetail) -> Vec<DbId> {
    let mut ids: Vec<DbId> = plan.items.iter().map(|i| i.item.exercise_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
