//! Route definitions for external webhooks.

use axum::routing::get;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// GET  /facebook/leads           -> verify_webhook (hub challenge, public)
/// POST /facebook/leads           -> receive_leads (signature-checked, public)
/// GET  /facebook/oauth/callback  -> oauth_callback (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/facebook/leads",
            get(webhooks::verify_webhook).post(webhooks::receive_leads),
        )
        .route("/facebook/oauth/callback", get(webhooks::oauth_callback))
}
