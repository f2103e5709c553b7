//! Route definitions for the `/organizations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{members, organizations};
use crate::state::AppState;

/// Routes mounted at `/organizations`.
///
/// ```text
/// GET    /{id}          -> get_organization (admin only)
/// PATCH  /{id}          -> update_organization (admin only)
/// GET    /{id}/members  -> list_members
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(organizations::get_organization).patch(organizations::update_organization),
        )
        .route("/{id}/members", get(members::list_members))
}
