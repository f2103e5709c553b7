//! Handlers for the read-only `/exercises` catalog.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::exercise::ExerciseQuery;
use liftdesk_db::repositories::ExerciseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/exercises
///
/// Search the catalog. Supports `search`, `muscle`, `equipment`, `limit`,
/// and `offset` query parameters.
pub async fn list_exercises(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ExerciseQuery>,
) -> AppResult<impl IntoResponse> {
    let exercises = ExerciseRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: exercises }))
}

/// GET /api/v1/exercises/{id}
pub async fn get_exercise(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let exercise = ExerciseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Exercise", id)))?;
    Ok(Json(DataResponse { data: exercise }))
}
