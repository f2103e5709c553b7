//! Facebook Lead Ads webhook and OAuth callback handlers.
//!
//! The GET webhook performs hub-challenge verification against the
//! configured verify token. The POST webhook checks the payload signature,
//! validates the schema, fetches full lead details per `leadgen_id` from
//! the Graph API, and upserts Lead rows. Both are unauthenticated by
//! design -- Facebook is the caller.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::lead::FacebookLead;
use liftdesk_db::repositories::{LeadRepo, OrganizationRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::facebook;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fallback organization for leads whose page has no connected
/// organization.
// TODO: resolve the organization from webhook subscription metadata
// instead of falling back to the first tenant.
const FALLBACK_ORGANIZATION_ID: DbId = 1;

// ---------------------------------------------------------------------------
// GET verification
// ---------------------------------------------------------------------------

/// Hub-challenge query parameters sent by Facebook on subscription.
#[derive(Debug, Deserialize)]
pub struct HubChallenge {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// GET /api/v1/webhooks/facebook/leads
///
/// Echo the challenge when the verify token matches; 403 otherwise.
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<HubChallenge>,
) -> AppResult<String> {
    let expected = state.config.facebook.verify_token.as_deref().ok_or_else(|| {
        AppError::InternalError("FACEBOOK_VERIFY_TOKEN is not configured".into())
    })?;

    let mode_ok = params.mode.as_deref() == Some("subscribe");
    let token_ok = params.verify_token.as_deref() == Some(expected);

    if mode_ok && token_ok {
        return Ok(params.challenge.unwrap_or_default());
    }

    Err(AppError::Core(CoreError::Forbidden(
        "Webhook verification failed".into(),
    )))
}

// ---------------------------------------------------------------------------
// POST ingestion
// ---------------------------------------------------------------------------

/// POST /api/v1/webhooks/facebook/leads
///
/// Signature-checked lead ingestion. Each leadgen change is resolved to a
/// full lead via the Graph API and upserted; a failure on one change is
/// logged and does not abort the rest (Facebook retries on non-200).
pub async fn receive_leads(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    if let Some(app_secret) = state.config.facebook.app_secret.as_deref() {
        let signature = headers
            .get("x-hub-signature-256")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::BadRequest("Missing X-Hub-Signature-256 header".to_string())
            })?;
        facebook::verify_signature(app_secret, &body, signature)?;
    }

    let payload: facebook::WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {e}")))?;

    if payload.object != "page" {
        return Err(AppError::BadRequest(format!(
            "Unsupported webhook object '{}'",
            payload.object
        )));
    }

    let mut ingested = 0;
    for entry in &payload.entry {
        for change in &entry.changes {
            if change.field != "leadgen" {
                continue;
            }
            match ingest_lead(&state, &change.value).await {
                Ok(lead_id) => {
                    ingested += 1;
                    tracing::info!(
                        lead_id,
                        leadgen_id = %change.value.leadgen_id,
                        "Facebook lead ingested",
                    );
                }
                Err(e) => {
                    tracing::error!(
                        leadgen_id = %change.value.leadgen_id,
                        error = %e,
                        "Facebook lead ingestion failed",
                    );
                }
            }
        }
    }

    tracing::debug!(ingested, "Facebook webhook processed");

    Ok(StatusCode::OK)
}

/// Resolve one leadgen notification into a Lead row.
async fn ingest_lead(
    state: &AppState,
    value: &facebook::LeadgenValue,
) -> AppResult<DbId> {
    let organization =
        OrganizationRepo::find_by_facebook_page(&state.pool, &value.page_id).await?;

    let (organization_id, page_token) = match &organization {
        Some(org) => (
            org.id,
            org.facebook_page_token.clone().ok_or_else(|| {
                AppError::InternalError(format!(
                    "Organization {} has no page token for page {}",
                    org.id, value.page_id
                ))
            })?,
        ),
        None => {
            // No organization connected to this page: fall back to the
            // default tenant and the globally configured page token.
            let token = state.config.facebook.page_token.clone().ok_or_else(|| {
                AppError::InternalError("No page token available for lead fetch".into())
            })?;
            (FALLBACK_ORGANIZATION_ID, token)
        }
    };

    let detail = facebook::fetch_lead_detail(
        &state.http,
        &state.config.facebook,
        &value.leadgen_id,
        &page_token,
    )
    .await?;

    let lead = LeadRepo::upsert_facebook(
        &state.pool,
        &FacebookLead {
            organization_id,
            leadgen_id: value.leadgen_id.clone(),
            name: detail.contact_name(),
            email: detail.field("email").map(str::to_string),
            phone: detail.field("phone_number").map(str::to_string),
        },
    )
    .await?;

    Ok(lead.id)
}

// ---------------------------------------------------------------------------
// OAuth callback
// ---------------------------------------------------------------------------

/// Query parameters of the OAuth callback redirect.
#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    pub code: String,
    /// The page to connect, forwarded through the OAuth `state` parameter.
    pub page_id: String,
    pub redirect_uri: String,
}

/// GET /api/v1/webhooks/facebook/oauth/callback
///
/// Exchange the OAuth code for a page access token and store it on the
/// caller's organization. Requires an authenticated admin.
pub async fn oauth_callback(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<OAuthCallback>,
) -> AppResult<impl IntoResponse> {
    let organization_id = auth.require_organization()?;
    if !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins can connect a Facebook page".into(),
        )));
    }

    let token = facebook::exchange_oauth_code(
        &state.http,
        &state.config.facebook,
        &params.code,
        &params.redirect_uri,
    )
    .await?;

    let organization = OrganizationRepo::set_facebook_page(
        &state.pool,
        organization_id,
        &params.page_id,
        &token.access_token,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Organization", organization_id)))?;

    tracing::info!(
        organization_id,
        page_id = %params.page_id,
        "Facebook page connected",
    );

    Ok(Json(DataResponse { data: organization }))
}
