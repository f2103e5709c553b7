//! Route definitions for cron endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::crons;
use crate::state::AppState;

/// Routes mounted at `/crons`.
///
/// ```text
/// POST /populate-sessions -> populate_sessions
///      (CRON_SECRET bearer = fleet-wide; user token = own programs)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/populate-sessions", post(crons::populate_sessions))
}
