//! Route definitions for member invites.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Routes mounted at `/members`.
///
/// ```text
/// POST /invite         -> invite_member
/// POST /invite/batch   -> invite_members_batch (non-atomic)
/// POST /invite/accept  -> accept_invite (public; token is the credential)
/// GET  /invites        -> list_invites (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invite", post(members::invite_member))
        .route("/invite/batch", post(members::invite_members_batch))
        .route("/invite/accept", post(members::accept_invite))
        .route("/invites", get(members::list_invites))
}
