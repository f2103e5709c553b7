//! Handlers for `/trainer/clients`: the trainer-client assignment edge.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::trainer_client::{CreateTrainerClient, UpdateTrainerClient};
use liftdesk_db::repositories::{TrainerClientRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::policy::{authorize_owned, OwnedResource};
use crate::response::DataResponse;
use crate::state::AppState;

/// Only trainers (and admins standing in for them) manage assignments.
fn check_trainer(auth: &AuthUser) -> AppResult<()> {
    if auth.is_trainer() || auth.is_admin() {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Only trainers can manage client assignments".into(),
    )))
}

/// POST /api/v1/trainer/clients
///
/// Assign a client to the calling trainer. The (trainer, client) pair is
/// unique -- a duplicate assignment maps to 409.
pub async fn create_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTrainerClient>,
) -> AppResult<impl IntoResponse> {
    check_trainer(&auth)?;

    let client = UserRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .filter(|c| c.organization_id == auth.organization_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", input.client_id)))?;

    let assignment = TrainerClientRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        assignment_id = assignment.id,
        trainer_id = auth.user_id,
        client_id = client.id,
        "Client assigned",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// GET /api/v1/trainer/clients
pub async fn list_assignments(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    check_trainer(&auth)?;
    let assignments = TrainerClientRepo::list_by_trainer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// PATCH /api/v1/trainer/clients/{id}
///
/// Update the assignment's free-text notes.
pub async fn update_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrainerClient>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::TrainerClient, id, &auth).await?;

    let assignment = TrainerClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("TrainerClient", id)))?;

    Ok(Json(DataResponse { data: assignment }))
}

/// DELETE /api/v1/trainer/clients/{id}
pub async fn delete_assignment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::TrainerClient, id, &auth).await?;

    TrainerClientRepo::delete(&state.pool, id).await?;

    tracing::info!(assignment_id = id, trainer_id = auth.user_id, "Client unassigned");

    Ok(StatusCode::NO_CONTENT)
}
