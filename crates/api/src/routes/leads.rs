//! Route definitions for the `/leads` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// GET    /      -> list_leads (status/source filters)
/// POST   /      -> create_lead
/// GET    /{id}  -> get_lead
/// PATCH  /{id}  -> update_lead
/// DELETE /{id}  -> delete_lead
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/{id}",
            get(leads::get_lead)
                .patch(leads::update_lead)
                .delete(leads::delete_lead),
        )
}
