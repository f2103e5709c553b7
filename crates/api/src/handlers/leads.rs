//! Handlers for the `/leads` resource, organization-scoped.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::lead::{CreateLead, Lead, LeadQuery, UpdateLead};
use liftdesk_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a lead and verify it belongs to the caller's organization.
/// Foreign and absent leads produce the same not-found response.
async fn find_in_organization(
    pool: &sqlx::PgPool,
    lead_id: DbId,
    auth: &AuthUser,
) -> AppResult<Lead> {
    let organization_id = auth.require_organization()?;
    LeadRepo::find_by_id(pool, lead_id)
        .await?
        .filter(|l| l.organization_id == organization_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("Lead", lead_id)))
}

/// POST /api/v1/leads
pub async fn create_lead(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLead>,
) -> AppResult<impl IntoResponse> {
    let organization_id = auth.require_organization()?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Lead name must not be empty".into(),
        )));
    }

    let lead = LeadRepo::create(&state.pool, organization_id, &input).await?;

    tracing::info!(lead_id = lead.id, organization_id, "Lead created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/leads
///
/// The caller's organization pipeline, filterable by `status` and `source`.
pub async fn list_leads(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LeadQuery>,
) -> AppResult<impl IntoResponse> {
    let organization_id = auth.require_organization()?;
    let leads = LeadRepo::list_by_organization(&state.pool, organization_id, &params).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/v1/leads/{id}
pub async fn get_lead(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = find_in_organization(&state.pool, lead_id, &auth).await?;
    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/v1/leads/{id}
///
/// Update contact fields, pipeline status, or notes.
pub async fn update_lead(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<UpdateLead>,
) -> AppResult<impl IntoResponse> {
    find_in_organization(&state.pool, lead_id, &auth).await?;

    let lead = LeadRepo::update(&state.pool, lead_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Lead", lead_id)))?;

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/leads/{id}
pub async fn delete_lead(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_in_organization(&state.pool, lead_id, &auth).await?;

    LeadRepo::delete(&state.pool, lead_id).await?;

    tracing::info!(lead_id, user_id = auth.user_id, "Lead deleted");

    Ok(StatusCode::NO_CONTENT)
}
