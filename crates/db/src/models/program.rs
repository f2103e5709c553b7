//! Client program metadata created by the onboarding wizard.
//!
//! A program ties a client to a workout plan for a number of weeks with a
//! weekly schedule. The session population job turns schedules into
//! `workout_sessions` rows day by day.

use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `client_programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientProgram {
    pub id: DbId,
    pub trainer_id: DbId,
    pub client_id: DbId,
    pub plan_id: DbId,
    pub name: String,
    pub duration_weeks: i32,
    /// Scheduled weekdays, 0 = Monday .. 6 = Sunday.
    pub schedule_days: Vec<i16>,
    pub starts_on: chrono::NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating program metadata.
#[derive(Debug, Deserialize)]
pub struct CreateClientProgram {
    pub trainer_id: DbId,
    pub client_id: DbId,
    pub plan_id: DbId,
    pub name: String,
    pub duration_weeks: i32,
    pub schedule_days: Vec<i16>,
    pub starts_on: chrono::NaiveDate,
}
