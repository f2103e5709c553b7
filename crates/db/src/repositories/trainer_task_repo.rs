//! Repository for the `trainer_tasks` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::trainer_task::{
    CreateTrainerTask, TaskQuery, TaskStatus, TrainerTask, UpdateTrainerTask,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, trainer_id, client_id, title, description, priority, status, \
                       due_date, created_at, updated_at";

/// Provides CRUD operations for trainer tasks.
pub struct TrainerTaskRepo;

impl TrainerTaskRepo {
    /// Insert a new task in `open` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        trainer_id: DbId,
        input: &CreateTrainerTask,
    ) -> Result<TrainerTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainer_tasks (trainer_id, client_id, title, description, priority, status, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainerTask>(&query)
            .bind(trainer_id)
            .bind(input.client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.as_str())
            .bind(TaskStatus::Open.as_str())
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrainerTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trainer_tasks WHERE id = $1");
        sqlx::query_as::<_, TrainerTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a trainer's tasks with optional status/client filters:
    /// open work first, then by due date with unscheduled tasks last.
    pub async fn list_by_trainer(
        pool: &PgPool,
        trainer_id: DbId,
        params: &TaskQuery,
    ) -> Result<Vec<TrainerTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trainer_tasks
             WHERE trainer_id = $1
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BIGINT IS NULL OR client_id = $3)
             ORDER BY status ASC, due_date ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, TrainerTask>(&query)
            .bind(trainer_id)
            .bind(params.status.map(|s| s.as_str()))
            .bind(params.client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    /// Returns `None` if no row exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrainerTask,
    ) -> Result<Option<TrainerTask>, sqlx::Error> {
        let query = format!(
            "UPDATE trainer_tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                due_date = COALESCE($6, due_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainerTask>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trainer_tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
