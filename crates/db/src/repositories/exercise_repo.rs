//! Repository for the read-only `exercises` catalog.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::exercise::{Exercise, ExerciseQuery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, primary_muscle, secondary_muscle, equipment, image_url, created_at";

/// Maximum page size for catalog listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for catalog listing.
const DEFAULT_LIMIT: i64 = 50;

/// Read operations for the exercise catalog.
pub struct ExerciseRepo;

impl ExerciseRepo {
    /// Find an exercise by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Exercise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exercises WHERE id = $1");
        sqlx::query_as::<_, Exercise>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batch-fetch exercises by id. Missing ids are simply absent from the
    /// result; callers that need all of them must check the count.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Exercise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exercises WHERE id = ANY($1) ORDER BY id ASC");
        sqlx::query_as::<_, Exercise>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Search the catalog with optional name/muscle/equipment filters and
    /// pagination.
    pub async fn search(pool: &PgPool, params: &ExerciseQuery) -> Result<Vec<Exercise>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let query = format!(
            "SELECT {COLUMNS} FROM exercises
             WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR primary_muscle = $2 OR secondary_muscle = $2)
               AND ($3::TEXT IS NULL OR equipment = $3)
             ORDER BY name ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Exercise>(&query)
            .bind(&params.search)
            .bind(&params.muscle)
            .bind(&params.equipment)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
