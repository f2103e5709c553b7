//! Route definitions for `/weight-logs`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::weight_logs;
use crate::state::AppState;

/// Routes mounted at `/weight-logs`.
///
/// ```text
/// GET    /      -> list_logs
/// POST   /      -> create_log
/// DELETE /{id}  -> delete_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(weight_logs::list_logs).post(weight_logs::create_log),
        )
        .route("/{id}", delete(weight_logs::delete_log))
}
