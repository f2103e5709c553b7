//! Handlers for the `/organizations` resource.
//!
//! Organization data is admin-scoped: only the organization's own admin can
//! read or update it.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::organization::UpdateOrganization;
use liftdesk_db::repositories::OrganizationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Verify the caller is the admin of the given organization.
///
/// Mismatch and missing organization both produce the same not-found
/// response, hiding other tenants' existence.
fn check_admin_of(auth: &AuthUser, organization_id: DbId) -> AppResult<()> {
    if auth.is_admin() && auth.organization_id == Some(organization_id) {
        return Ok(());
    }
    Err(AppError::Core(CoreError::not_found(
        "Organization",
        organization_id,
    )))
}

/// GET /api/v1/organizations/{id}
pub async fn get_organization(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    check_admin_of(&auth, id)?;
    let organization = OrganizationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Organization", id)))?;
    Ok(Json(DataResponse { data: organization }))
}

/// PATCH /api/v1/organizations/{id}
pub async fn update_organization(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrganization>,
) -> AppResult<impl IntoResponse> {
    check_admin_of(&auth, id)?;
    let organization = OrganizationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Organization", id)))?;

    tracing::info!(organization_id = id, user_id = auth.user_id, "Organization updated");

    Ok(Json(DataResponse { data: organization }))
}
