//! Repository for daily goal targets and per-day logs.

use liftdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::daily_goal::{
    DailyGoalLog, DailyGoals, GoalLogQuery, UpsertDailyGoalLog, UpsertDailyGoals,
};

/// Column list for `daily_goals` queries.
const GOAL_COLUMNS: &str = "id, user_id, steps, water_ml, sleep_hours, created_at, updated_at";

/// Column list for `daily_goal_logs` queries.
const LOG_COLUMNS: &str =
    "id, user_id, log_date, steps, water_ml, sleep_hours, created_at, updated_at";

/// Provides operations for goals and goal logs.
pub struct DailyGoalRepo;

impl DailyGoalRepo {
    /// Set a user's targets, one row per user.
    ///
    /// Uses `ON CONFLICT (user_id) DO UPDATE` to ensure idempotent upserts.
    pub async fn upsert_targets(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertDailyGoals,
    ) -> Result<DailyGoals, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_goals (user_id, steps, water_ml, sleep_hours)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE SET
                 steps = EXCLUDED.steps,
                 water_ml = EXCLUDED.water_ml,
                 sleep_hours = EXCLUDED.sleep_hours,
                 updated_at = NOW()
             RETURNING {GOAL_COLUMNS}"
        );
        sqlx::query_as::<_, DailyGoals>(&query)
            .bind(user_id)
            .bind(input.steps)
            .bind(input.water_ml)
            .bind(input.sleep_hours)
            .fetch_one(pool)
            .await
    }

    /// Fetch a user's targets, if set.
    pub async fn find_targets(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DailyGoals>, sqlx::Error> {
        let query = format!("SELECT {GOAL_COLUMNS} FROM daily_goals WHERE user_id = $1");
        sqlx::query_as::<_, DailyGoals>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Record one day's actuals.
    ///
    /// Unique per (user, date): logging the same day twice updates the
    /// existing row in place instead of duplicating it.
    pub async fn upsert_log(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertDailyGoalLog,
    ) -> Result<DailyGoalLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_goal_logs (user_id, log_date, steps, water_ml, sleep_hours)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, log_date) DO UPDATE SET
                 steps = EXCLUDED.steps,
                 water_ml = EXCLUDED.water_ml,
                 sleep_hours = EXCLUDED.sleep_hours,
                 updated_at = NOW()
             RETURNING {LOG_COLUMNS}"
        );
        sqlx::query_as::<_, DailyGoalLog>(&query)
            .bind(user_id)
            .bind(input.log_date)
            .bind(input.steps)
            .bind(input.water_ml)
            .bind(input.sleep_hours)
            .fetch_one(pool)
            .await
    }

    /// List a user's logs, newest first, optionally bounded by date.
    pub async fn list_logs(
        pool: &PgPool,
        user_id: DbId,
        params: &GoalLogQuery,
    ) -> Result<Vec<DailyGoalLog>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM daily_goal_logs
             WHERE user_id = $1
               AND ($2::DATE IS NULL OR log_date >= $2)
               AND ($3::DATE IS NULL OR log_date <= $3)
             ORDER BY log_date DESC"
        );
        sqlx::query_as::<_, DailyGoalLog>(&query)
            .bind(user_id)
            .bind(params.from)
            .bind(params.to)
            .fetch_all(pool)
            .await
    }
}
