//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use liftdesk_core::error::CoreError;
use liftdesk_core::roles::{ROLE_ADMIN, ROLE_TRAINER};
use liftdesk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication. Identity travels with the request -- there is no ambient
/// session state anywhere in the server.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"admin"`, `"trainer"`, or `"member"`).
    pub role: String,
    /// The user's organization id, when they belong to one.
    pub organization_id: Option<DbId>,
}

impl AuthUser {
    /// Whether this user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Whether this user holds the trainer role.
    pub fn is_trainer(&self) -> bool {
        self.role == ROLE_TRAINER
    }

    /// The caller's organization id, or a `Forbidden` error for users who
    /// do not belong to one.
    pub fn require_organization(&self) -> Result<DbId, AppError> {
        self.organization_id.ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "This action requires an organization membership".into(),
            ))
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            organization_id: claims.org,
        })
    }
}
