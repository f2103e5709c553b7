//! Handlers for the `/workout-sessions` resource: session CRUD, the
//! active-session aggregate, batch listing with best-effort plan
//! resolution, set-log upserts, and completion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::workout_session::{CreateWorkoutSession, UpsertSetLog};
use liftdesk_db::repositories::{SessionLogRepo, WorkoutPlanRepo, WorkoutSessionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::policy::{authorize_owned, OwnedResource};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/workout-sessions
///
/// Create a session for the caller. A referenced plan must exist and belong
/// to the caller.
pub async fn create_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkoutSession>,
) -> AppResult<impl IntoResponse> {
    if let Some(plan_id) = input.plan_id {
        let owned = WorkoutPlanRepo::find_by_id(&state.pool, plan_id)
            .await?
            .is_some_and(|p| p.user_id == auth.user_id);
        if !owned {
            return Err(AppError::Core(CoreError::not_found("WorkoutPlan", plan_id)));
        }
    }

    let session = WorkoutSessionRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        session_id = session.id,
        user_id = auth.user_id,
        "Workout session created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/workout-sessions
///
/// All of the caller's sessions with plans resolved best-effort: a session
/// whose plan cannot be resolved still appears, with `workout_plan: null`.
pub async fn list_sessions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let details =
        WorkoutSessionRepo::list_for_user_with_plans(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// GET /api/v1/workout-sessions/{id}
///
/// The live-session aggregate. Completed sessions are not-found here: this
/// accessor exists for executing a workout, not reviewing one.
pub async fn get_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutSession, session_id, &auth).await?;

    let detail = WorkoutSessionRepo::find_active_detail(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutSession", session_id)))?;

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/workout-sessions/{id}/logs
///
/// Record actuals for one of the session's target sets. Unique per
/// (session, set): re-logging updates in place.
pub async fn upsert_log(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    Json(input): Json<UpsertSetLog>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutSession, session_id, &auth).await?;

    // Logging against a completed session is refused: it is invisible
    // through the live accessor, so treat it the same way here.
    let session = WorkoutSessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutSession", session_id)))?;
    if session.completed {
        return Err(AppError::Core(CoreError::not_found(
            "WorkoutSession",
            session_id,
        )));
    }

    let log = SessionLogRepo::upsert(&state.pool, session_id, &input).await?;

    Ok(Json(DataResponse { data: log }))
}

/// POST /api/v1/workout-sessions/{id}/complete
///
/// Mark the session done. 409 if already completed.
pub async fn complete_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutSession, session_id, &auth).await?;

    let session = WorkoutSessionRepo::complete(&state.pool, session_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Session is already completed".into()))
        })?;

    tracing::info!(session_id, user_id = auth.user_id, "Workout session completed");

    Ok(Json(DataResponse { data: session }))
}

/// DELETE /api/v1/workout-sessions/{id}
pub async fn delete_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutSession, session_id, &auth).await?;

    WorkoutSessionRepo::delete(&state.pool, session_id).await?;

    tracing::info!(session_id, user_id = auth.user_id, "Workout session deleted");

    Ok(StatusCode::NO_CONTENT)
}
