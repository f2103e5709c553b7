pub mod auth;
pub mod crons;
pub mod exercises;
pub mod goals;
pub mod health;
pub mod leads;
pub mod members;
pub mod onboarding;
pub mod organizations;
pub mod trainer;
pub mod webhooks;
pub mod weight_logs;
pub mod workout_plans;
pub mod workout_sessions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
/// /auth/me                                         own profile
///
/// /organizations/{id}                              get, patch (admin only)
/// /organizations/{id}/members                      list members
///
/// /members/invite                                  invite one
/// /members/invite/batch                            CSV-shaped batch invite
/// /members/invite/accept                           redeem token (public)
/// /members/invites                                 list invites (admin only)
///
/// /exercises                                       search catalog
/// /exercises/{id}                                  get
///
/// /workout-plans                                   list, create
/// /workout-plans/{id}                              aggregate, patch, delete
/// /workout-plans/{id}/items                        add item
/// /workout-plans/{id}/items/{item_id}              remove item
/// /workout-plans/{id}/items/{item_id}/sets         add set
/// /workout-plans/{id}/sets/{set_id}                patch, delete set
/// /workout-plans/{id}/reorder                      batch order deltas
///
/// /workout-sessions                                list (batch aggregate), create
/// /workout-sessions/{id}                           live aggregate, delete
/// /workout-sessions/{id}/logs                      upsert set log
/// /workout-sessions/{id}/complete                  mark done
///
/// /goals                                           get, put targets
/// /goals/logs                                      list, put day log
///
/// /weight-logs                                     list, create
/// /weight-logs/{id}                                delete
///
/// /leads                                           list, create
/// /leads/{id}                                      get, patch, delete
///
/// /trainer/clients                                 list, create assignment
/// /trainer/clients/{id}                            patch, delete
/// /trainer/tasks                                   list, create
/// /trainer/tasks/{id}                              patch, delete
///
/// /onboarding/steps                                wizard step definitions
/// /onboarding/submit                               wizard terminal action
///
/// /webhooks/facebook/leads                         GET verify, POST ingest (public)
/// /webhooks/facebook/oauth/callback                page-token exchange (admin)
///
/// /crons/populate-sessions                         secret or per-user population
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/organizations", organizations::router())
        .nest("/members", members::router())
        .nest("/exercises", exercises::router())
        .nest("/workout-plans", workout_plans::router())
        .nest("/workout-sessions", workout_sessions::router())
        .nest("/goals", goals::router())
        .nest("/weight-logs", weight_logs::router())
        .nest("/leads", leads::router())
        .nest("/trainer", trainer::router())
        .nest("/onboarding", onboarding::router())
        .nest("/webhooks", webhooks::router())
        .nest("/crons", crons::router())
}
