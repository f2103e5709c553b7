//! Handlers for the `/workout-plans` resource tree: plans, items, sets,
//! and batch reorder.
//!
//! Every mutation authorizes through [`authorize_owned`] before touching
//! the row, so a non-owner sees the same not-found as a missing plan and
//! never reaches the write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::workout_plan::{
    CreatePlanItem, CreatePlanSet, CreateWorkoutPlan, ItemOrderUpdate, UpdatePlanSet,
    UpdateWorkoutPlan,
};
use liftdesk_db::repositories::{
    ExerciseRepo, PlanItemRepo, PlanSetRepo, WorkoutPlanRepo,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::policy::{authorize_owned, OwnedResource};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// POST /api/v1/workout-plans
///
/// Create a plan for the caller. Returns 201 with the bare plan row.
pub async fn create_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkoutPlan>,
) -> AppResult<impl IntoResponse> {
    if input.friendly_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Plan name must not be empty".into(),
        )));
    }

    let plan = WorkoutPlanRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(plan_id = plan.id, user_id = auth.user_id, "Workout plan created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}

/// GET /api/v1/workout-plans
///
/// List the caller's plans (bare rows, no aggregate).
pub async fn list_plans(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let plans = WorkoutPlanRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// GET /api/v1/workout-plans/{id}
///
/// The full nested aggregate: plan -> ordered items -> ordered sets.
pub async fn get_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plan_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;

    let detail = WorkoutPlanRepo::find_detail(&state.pool, plan_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutPlan", plan_id)))?;

    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/workout-plans/{id}
pub async fn update_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plan_id): Path<DbId>,
    Json(input): Json<UpdateWorkoutPlan>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;

    let plan = WorkoutPlanRepo::update(&state.pool, plan_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutPlan", plan_id)))?;

    Ok(Json(DataResponse { data: plan }))
}

/// DELETE /api/v1/workout-plans/{id}
pub async fn delete_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plan_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;

    WorkoutPlanRepo::delete(&state.pool, plan_id).await?;

    tracing::info!(plan_id, user_id = auth.user_id, "Workout plan deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// POST /api/v1/workout-plans/{id}/items
///
/// Append an exercise to the plan. The referenced exercise must exist.
pub async fn add_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plan_id): Path<DbId>,
    Json(input): Json<CreatePlanItem>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;

    if ExerciseRepo::find_by_id(&state.pool, input.exercise_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found(
            "Exercise",
            input.exercise_id,
        )));
    }

    let item = PlanItemRepo::create(&state.pool, plan_id, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// DELETE /api/v1/workout-plans/{plan_id}/items/{item_id}
pub async fn remove_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((plan_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;

    let item = PlanItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .filter(|i| i.plan_id == plan_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutPlanItem", item_id)))?;

    PlanItemRepo::delete(&state.pool, item.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Request body for `POST /workout-plans/{id}/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// Only the items whose order changed -- deltas, not the full list.
    pub updates: Vec<ItemOrderUpdate>,
}

/// POST /api/v1/workout-plans/{id}/reorder
///
/// Batch-persist order deltas computed client-side.
pub async fn reorder_items(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(plan_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;

    let touched =
        PlanItemRepo::apply_order_updates(&state.pool, plan_id, &input.updates).await?;

    tracing::info!(plan_id, touched, "Plan items reordered");

    Ok(Json(DataResponse { data: touched }))
}

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

/// POST /api/v1/workout-plans/{plan_id}/items/{item_id}/sets
pub async fn add_set(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((plan_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreatePlanSet>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;

    let item = PlanItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .filter(|i| i.plan_id == plan_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutPlanItem", item_id)))?;

    let set = PlanSetRepo::create(&state.pool, item.id, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// PATCH /api/v1/workout-plans/{plan_id}/sets/{set_id}
pub async fn update_set(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((plan_id, set_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePlanSet>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;
    check_set_in_plan(&state, plan_id, set_id).await?;

    let set = PlanSetRepo::update(&state.pool, set_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutPlanItemSet", set_id)))?;

    Ok(Json(DataResponse { data: set }))
}

/// DELETE /api/v1/workout-plans/{plan_id}/sets/{set_id}
pub async fn remove_set(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((plan_id, set_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    authorize_owned(&state.pool, OwnedResource::WorkoutPlan, plan_id, &auth).await?;
    check_set_in_plan(&state, plan_id, set_id).await?;

    PlanSetRepo::delete(&state.pool, set_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Verify a set belongs to an item of the given plan.
async fn check_set_in_plan(state: &AppState, plan_id: DbId, set_id: DbId) -> AppResult<()> {
    let set = PlanSetRepo::find_by_id(&state.pool, set_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutPlanItemSet", set_id)))?;

    let item = PlanItemRepo::find_by_id(&state.pool, set.item_id).await?;
    if item.is_none_or(|i| i.plan_id != plan_id) {
        return Err(AppError::Core(CoreError::not_found(
            "WorkoutPlanItemSet",
            set_id,
        )));
    }
    Ok(())
}
