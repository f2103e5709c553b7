//! Exercise catalog entity.
//!
//! Seeded and searched, never mutated through the API.

use liftdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `exercises` catalog table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Exercise {
    pub id: DbId,
    pub name: String,
    pub primary_muscle: String,
    pub secondary_muscle: Option<String>,
    pub equipment: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

/// Query parameters for `GET /api/v1/exercises`.
#[derive(Debug, Default, Deserialize)]
pub struct ExerciseQuery {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    /// Exact match on primary or secondary muscle.
    pub muscle: Option<String>,
    /// Exact match on equipment.
    pub equipment: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
