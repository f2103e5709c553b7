//! Daily goal targets and per-day actuals.
//!
//! Targets are one row per user; actuals are one row per (user, day),
//! upserted so re-logging the same day updates in place.

use chrono::NaiveDate;
use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `daily_goals` table: per-user targets.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyGoals {
    pub id: DbId,
    pub user_id: DbId,
    pub steps: i32,
    pub water_ml: i32,
    pub sleep_hours: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `daily_goal_logs` table: actuals for one day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyGoalLog {
    pub id: DbId,
    pub user_id: DbId,
    pub log_date: NaiveDate,
    pub steps: i32,
    pub water_ml: i32,
    pub sleep_hours: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for setting a user's daily targets.
#[derive(Debug, Deserialize)]
pub struct UpsertDailyGoals {
    pub steps: i32,
    pub water_ml: i32,
    pub sleep_hours: f64,
}

/// DTO for logging one day's actuals.
#[derive(Debug, Deserialize)]
pub struct UpsertDailyGoalLog {
    pub log_date: NaiveDate,
    pub steps: i32,
    pub water_ml: i32,
    pub sleep_hours: f64,
}

/// Query parameters for listing goal logs.
#[derive(Debug, Default, Deserialize)]
pub struct GoalLogQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
