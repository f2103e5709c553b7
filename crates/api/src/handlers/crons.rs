//! Cron endpoint: workout-session population.
//!
//! Two invocation modes, mirroring how deployments actually call it:
//! - anonymous with `Authorization: Bearer <CRON_SECRET>` -- populates
//!   sessions fleet-wide for every active program
//! - an authenticated user without the secret -- populates only that
//!   user's own programs

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use serde::Serialize;

use crate::auth::jwt::validate_token;
use crate::background::session_population;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Outcome of a population run.
#[derive(Debug, Serialize)]
pub struct PopulationResult {
    pub scope: &'static str,
    pub sessions_created: u64,
}

/// POST /api/v1/crons/populate-sessions
pub async fn populate_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    let today = chrono::Utc::now().date_naive();

    // Shared-secret path: fleet-wide population.
    if let Some(secret) = state.config.cron_secret.as_deref() {
        if bearer == secret {
            let sessions_created =
                session_population::populate_all_for_day(&state.pool, today).await?;
            tracing::info!(sessions_created, "Cron population run (fleet-wide)");
            return Ok(Json(DataResponse {
                data: PopulationResult {
                    scope: "all",
                    sessions_created,
                },
            }));
        }
    }

    // Fallback: a normal user token populates that user's own programs.
    let claims = validate_token(bearer, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    let sessions_created =
        session_population::populate_for_user(&state.pool, claims.sub, today).await?;
    tracing::info!(
        user_id = claims.sub,
        sessions_created,
        "Cron population run (per-user)",
    );

    Ok(Json(DataResponse {
        data: PopulationResult {
            scope: "user",
            sessions_created,
        },
    }))
}
