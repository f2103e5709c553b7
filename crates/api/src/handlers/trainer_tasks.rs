//! Handlers for `/trainer/tasks`: a trainer's to-do list.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::trainer_task::{CreateTrainerTask, TaskQuery, UpdateTrainerTask};
use liftdesk_db::repositories::{TrainerClientRepo, TrainerTaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::policy::{authorize_owned, OwnedResource};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/trainer/tasks
///
/// Create a task. A linked client must be assigned to the calling trainer.
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTrainerTask>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title must not be empty".into(),
        )));
    }

    if let Some(client_id) = input.client_id {
        if !TrainerClientRepo::is_assigned(&state.pool, auth.user_id, client_id).await? {
            return Err(AppError::Core(CoreError::not_found("User", client_id)));
        }
    }

    let task = TrainerTaskRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(task_id = task.id, trainer_id = auth.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/trainer/tasks
///
/// The caller's tasks, filterable by `status` and `client_id`.
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TaskQuery>,
) -> AppResult<impl IntoResponse> {
    let tasks = TrainerTaskRepo::list_by_trainer(&state.pool, auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// PATCH /api/v1/trainer/tasks/{id}
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrainerTask>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::TrainerTask, id, &auth).await?;

    let task = TrainerTaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("TrainerTask", id)))?;

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/trainer/tasks/{id}
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::TrainerTask, id, &auth).await?;

    TrainerTaskRepo::delete(&state.pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
