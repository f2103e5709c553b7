//! Body-weight log entries.

use chrono::NaiveDate;
use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `weight_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeightLog {
    pub id: DbId,
    pub user_id: DbId,
    pub weight_kg: f64,
    pub logged_on: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for recording a weight entry.
#[derive(Debug, Deserialize)]
pub struct CreateWeightLog {
    pub weight_kg: f64,
    pub logged_on: NaiveDate,
}
