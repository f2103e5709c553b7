//! Handlers for `/weight-logs`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::weight_log::CreateWeightLog;
use liftdesk_db::repositories::WeightLogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/weight-logs
pub async fn list_logs(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let logs = WeightLogRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// POST /api/v1/weight-logs
pub async fn create_log(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWeightLog>,
) -> AppResult<impl IntoResponse> {
    if input.weight_kg <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Weight must be positive".into(),
        )));
    }

    let log = WeightLogRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// DELETE /api/v1/weight-logs/{id}
///
/// Only the owner can delete; absent and non-owned rows look identical.
pub async fn delete_log(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let log = WeightLogRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|l| l.user_id == auth.user_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("WeightLog", id)))?;

    WeightLogRepo::delete(&state.pool, log.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
