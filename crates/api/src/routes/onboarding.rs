//! Route definitions for the onboarding wizard.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// GET  /steps   -> list_steps (stepper definitions)
/// POST /submit  -> submit (terminal action; no rollback on partial failure)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/steps", get(onboarding::list_steps))
        .route("/submit", post(onboarding::submit))
}
