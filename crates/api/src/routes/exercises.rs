//! Route definitions for the read-only `/exercises` catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::exercises;
use crate::state::AppState;

/// Routes mounted at `/exercises`.
///
/// ```text
/// GET /       -> list_exercises (search/filter/paginate)
/// GET /{id}   -> get_exercise
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(exercises::list_exercises))
        .route("/{id}", get(exercises::get_exercise))
}
