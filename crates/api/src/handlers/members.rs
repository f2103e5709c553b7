//! Handlers for organization membership: listing, invites, and batch
//! (CSV-shaped) invites.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::roles::{is_known_role, ROLE_ADMIN, ROLE_MEMBER};
use liftdesk_core::types::DbId;
use liftdesk_db::models::invite::{BatchInviteRow, CreateInvite};
use liftdesk_db::models::user::{CreateUser, UserResponse};
use liftdesk_db::repositories::{InviteRepo, UserRepo};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for member listing.
#[derive(Debug, Default, Deserialize)]
pub struct MemberQuery {
    /// Filter by role (`admin`, `trainer`, `member`).
    pub role: Option<String>,
}

/// Request body for `POST /members/invite/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchInviteRequest {
    pub rows: Vec<BatchInviteRow>,
}

/// Per-row outcome of a batch invite. Failed rows carry the reason; the
/// batch as a whole never fails atomically.
#[derive(Debug, Serialize)]
pub struct BatchInviteOutcome {
    pub email: String,
    pub invited: bool,
    pub error: Option<String>,
}

/// Request body for `POST /members/invite/accept`.
#[derive(Debug, Deserialize)]
pub struct AcceptInviteRequest {
    pub token: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Admins invite anyone; trainers may invite members only.
fn check_can_invite(auth: &AuthUser, role: &str) -> AppResult<()> {
    if !is_known_role(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role}'"
        ))));
    }
    if auth.is_admin() {
        return Ok(());
    }
    if auth.is_trainer() && role == ROLE_MEMBER {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(
        "Only admins and trainers can invite members".into(),
    )))
}

/// Random 32-byte hex invite token.
fn generate_invite_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/organizations/{id}/members
///
/// List an organization's users. Only members of that organization may look.
pub async fn list_members(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
    Query(params): Query<MemberQuery>,
) -> AppResult<impl IntoResponse> {
    if auth.organization_id != Some(organization_id) {
        return Err(AppError::Core(CoreError::not_found(
            "Organization",
            organization_id,
        )));
    }

    let users = UserRepo::list_by_organization(
        &state.pool,
        organization_id,
        params.role.as_deref(),
    )
    .await?;
    let members: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/members/invite
///
/// Invite one person into the caller's organization. Returns 201 with the
/// invite row (token withheld from the body; it is delivered out of band).
pub async fn invite_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateInvite>,
) -> AppResult<impl IntoResponse> {
    let organization_id = auth.require_organization()?;
    check_can_invite(&auth, &input.role)?;

    let token = generate_invite_token();
    let invite = InviteRepo::create(
        &state.pool,
        organization_id,
        &input.email,
        &input.role,
        &token,
        auth.user_id,
    )
    .await?;

    tracing::info!(
        invite_id = invite.id,
        organization_id,
        user_id = auth.user_id,
        "Member invited",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: invite })))
}

/// POST /api/v1/members/invite/batch
///
/// CSV-shaped batch invite. Processing continues past individual failures
/// and reports them separately -- the batch is NOT atomic.
pub async fn invite_members_batch(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BatchInviteRequest>,
) -> AppResult<impl IntoResponse> {
    let organization_id = auth.require_organization()?;

    let mut outcomes = Vec::with_capacity(input.rows.len());
    for row in &input.rows {
        let outcome = match check_can_invite(&auth, &row.role) {
            Err(e) => BatchInviteOutcome {
                email: row.email.clone(),
                invited: false,
                error: Some(e.to_string()),
            },
            Ok(()) => {
                let token = generate_invite_token();
                match InviteRepo::create(
                    &state.pool,
                    organization_id,
                    &row.email,
                    &row.role,
                    &token,
                    auth.user_id,
                )
                .await
                {
                    Ok(_) => BatchInviteOutcome {
                        email: row.email.clone(),
                        invited: true,
                        error: None,
                    },
                    Err(e) => {
                        tracing::warn!(email = %row.email, error = %e, "Batch invite row failed");
                        BatchInviteOutcome {
                            email: row.email.clone(),
                            invited: false,
                            error: Some("Invite could not be created".to_string()),
                        }
                    }
                }
            }
        };
        outcomes.push(outcome);
    }

    let invited = outcomes.iter().filter(|o| o.invited).count();
    tracing::info!(
        organization_id,
        total = outcomes.len(),
        invited,
        "Batch invite processed",
    );

    Ok(Json(DataResponse { data: outcomes }))
}

/// POST /api/v1/members/invite/accept
///
/// Redeem an invite token: creates the user in the inviting organization.
/// Public endpoint -- the token is the credential.
pub async fn accept_invite(
    State(state): State<AppState>,
    Json(input): Json<AcceptInviteRequest>,
) -> AppResult<impl IntoResponse> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let invite = InviteRepo::find_open_by_token(&state.pool, &input.token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or used invite token".into()))
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: invite.email.clone(),
            phone: input.phone,
            password_hash,
            full_name: input.full_name,
            role: invite.role.clone(),
            organization_id: Some(invite.organization_id),
            billing_plan: None,
        },
    )
    .await?;

    InviteRepo::mark_accepted(&state.pool, invite.id).await?;

    tracing::info!(
        user_id = user.id,
        organization_id = invite.organization_id,
        role = %invite.role,
        "Invite accepted",
    );

    let response: UserResponse = user.into();
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/members/invites
///
/// List the caller's organization invites (admin only).
pub async fn list_invites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let organization_id = auth.require_organization()?;
    if auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins can list invites".into(),
        )));
    }

    let invites = InviteRepo::list_by_organization(&state.pool, organization_id).await?;
    Ok(Json(DataResponse { data: invites }))
}
