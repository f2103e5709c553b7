//! Route definitions for the `/workout-sessions` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::workout_sessions;
use crate::state::AppState;

/// Routes mounted at `/workout-sessions`.
///
/// ```text
/// GET    /               -> list_sessions (plans resolved best-effort)
/// POST   /               -> create_session
/// GET    /{id}           -> get_session (live sessions only)
/// DELETE /{id}           -> delete_session
/// PUT    /{id}/logs      -> upsert_log
/// POST   /{id}/complete  -> complete_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workout_sessions::list_sessions).post(workout_sessions::create_session),
        )
        .route(
            "/{id}",
            get(workout_sessions::get_session).delete(workout_sessions::delete_session),
        )
        .route("/{id}/logs", put(workout_sessions::upsert_log))
        .route("/{id}/complete", post(workout_sessions::complete_session))
}
