//! Route definitions for `/goals`.

use axum::routing::get;
use axum::Router;

use crate::handlers::goals;
use crate::state::AppState;

/// Routes mounted at `/goals`.
///
/// ```text
/// GET /       -> get_targets
/// PUT /       -> put_targets (one row per user)
/// GET /logs   -> list_logs
/// PUT /logs   -> upsert_log (idempotent per user+date)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(goals::get_targets).put(goals::put_targets))
        .route("/logs", get(goals::list_logs).put(goals::upsert_log))
}
