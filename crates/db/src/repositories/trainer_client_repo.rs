//! Repository for the `trainer_clients` assignment table.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::trainer_client::{CreateTrainerClient, TrainerClient, UpdateTrainerClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, trainer_id, client_id, notes, created_at, updated_at";

/// Provides CRUD operations for trainer-client assignments.
pub struct TrainerClientRepo;

impl TrainerClientRepo {
    /// Assign a client to a trainer, returning the created edge.
    ///
    /// The `uq_trainer_clients_pair` constraint rejects duplicate pairs;
    /// the API layer maps that violation to 409.
    pub async fn create(
        pool: &PgPool,
        trainer_id: DbId,
        input: &CreateTrainerClient,
    ) -> Result<TrainerClient, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainer_clients (trainer_id, client_id, notes)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainerClient>(&query)
            .bind(trainer_id)
            .bind(input.client_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an assignment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrainerClient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trainer_clients WHERE id = $1");
        sqlx::query_as::<_, TrainerClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a trainer's assignments, newest first.
    pub async fn list_by_trainer(
        pool: &PgPool,
        trainer_id: DbId,
    ) -> Result<Vec<TrainerClient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trainer_clients
             WHERE trainer_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, TrainerClient>(&query)
            .bind(trainer_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a trainer manages a given client.
    pub async fn is_assigned(
        pool: &PgPool,
        trainer_id: DbId,
        client_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM trainer_clients WHERE trainer_id = $1 AND client_id = $2",
        )
        .bind(trainer_id)
        .bind(client_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Update assignment notes. Returns `None` if no row exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrainerClient,
    ) -> Result<Option<TrainerClient>, sqlx::Error> {
        let query = format!(
            "UPDATE trainer_clients SET
                notes = COALESCE($2, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainerClient>(&query)
            .bind(id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Remove an assignment. Returns `true` if a row went away.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trainer_clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
