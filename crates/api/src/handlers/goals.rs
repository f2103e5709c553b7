//! Handlers for `/goals`: per-user daily targets and per-day actuals.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_db::models::daily_goal::{GoalLogQuery, UpsertDailyGoalLog, UpsertDailyGoals};
use liftdesk_db::repositories::DailyGoalRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/goals
///
/// The caller's daily targets, or not-found if never set.
pub async fn get_targets(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let goals = DailyGoalRepo::find_targets(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("DailyGoals", auth.user_id)))?;
    Ok(Json(DataResponse { data: goals }))
}

/// PUT /api/v1/goals
///
/// Set the caller's daily targets. One row per user; repeated puts update
/// in place. All three targets must be positive.
pub async fn put_targets(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertDailyGoals>,
) -> AppResult<impl IntoResponse> {
    if input.steps <= 0 || input.water_ml <= 0 || input.sleep_hours <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Step, water, and sleep targets must all be positive".into(),
        )));
    }

    let goals = DailyGoalRepo::upsert_targets(&state.pool, auth.user_id, &input).await?;
    Ok(Json(DataResponse { data: goals }))
}

/// GET /api/v1/goals/logs
///
/// The caller's logged actuals, newest first, optionally bounded by
/// `from`/`to` dates.
pub async fn list_logs(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<GoalLogQuery>,
) -> AppResult<impl IntoResponse> {
    let logs = DailyGoalRepo::list_logs(&state.pool, auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// PUT /api/v1/goals/logs
///
/// Log one day's actuals. Idempotent per (user, date): logging the same day
/// twice updates in place.
pub async fn upsert_log(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertDailyGoalLog>,
) -> AppResult<impl IntoResponse> {
    if input.steps < 0 || input.water_ml < 0 || input.sleep_hours < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Logged values must not be negative".into(),
        )));
    }

    let log = DailyGoalRepo::upsert_log(&state.pool, auth.user_id, &input).await?;
    Ok(Json(DataResponse { data: log }))
}
