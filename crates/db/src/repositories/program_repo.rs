//! Repository for the `client_programs` table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::program::{ClientProgram, CreateClientProgram};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, trainer_id, client_id, plan_id, name, duration_weeks, \
                       schedule_days, starts_on, created_at, updated_at";

/// Provides operations for client programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert program metadata, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClientProgram,
    ) -> Result<ClientProgram, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_programs
                 (trainer_id, client_id, plan_id, name, duration_weeks, schedule_days, starts_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientProgram>(&query)
            .bind(input.trainer_id)
            .bind(input.client_id)
            .bind(input.plan_id)
            .bind(&input.name)
            .bind(input.duration_weeks)
            .bind(&input.schedule_days)
            .bind(input.starts_on)
            .fetch_one(pool)
            .await
    }

    /// Find a program by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ClientProgram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM client_programs WHERE id = $1");
        sqlx::query_as::<_, ClientProgram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the programs a client is enrolled in, newest first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ClientProgram>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_programs
             WHERE client_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ClientProgram>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// List the programs a trainer created, newest first.
    pub async fn list_by_trainer(
        pool: &PgPool,
        trainer_id: DbId,
    ) -> Result<Vec<ClientProgram>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_programs
             WHERE trainer_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ClientProgram>(&query)
            .bind(trainer_id)
            .fetch_all(pool)
            .await
    }

    /// Every program still inside its duration window as of `today`.
    /// Drives session population.
    pub async fn list_active(
        pool: &PgPool,
        today: chrono::NaiveDate,
    ) -> Result<Vec<ClientProgram>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_programs
             WHERE starts_on <= $1
               AND starts_on + (duration_weeks * 7) >= $1"
        );
        sqlx::query_as::<_, ClientProgram>(&query)
            .bind(today)
            .fetch_all(pool)
            .await
    }
}
