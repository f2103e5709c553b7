//! Route definitions for the `/workout-plans` resource tree.
//!
//! Every mutating endpoint authorizes ownership through the shared policy
//! before writing.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::workout_plans;
use crate::state::AppState;

/// Routes mounted at `/workout-plans`.
///
/// ```text
/// GET    /                          -> list_plans
/// POST   /                          -> create_plan
/// GET    /{id}                      -> get_plan (full aggregate)
/// PATCH  /{id}                      -> update_plan
/// DELETE /{id}                      -> delete_plan
/// POST   /{id}/items                -> add_item
/// DELETE /{id}/items/{item_id}      -> remove_item
/// POST   /{id}/items/{item_id}/sets -> add_set
/// PATCH  /{id}/sets/{set_id}        -> update_set
/// DELETE /{id}/sets/{set_id}        -> remove_set
/// POST   /{id}/reorder              -> reorder_items (order deltas)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workout_plans::list_plans).post(workout_plans::create_plan),
        )
        .route(
            "/{id}",
            get(workout_plans::get_plan)
                .patch(workout_plans::update_plan)
                .delete(workout_plans::delete_plan),
        )
        .route("/{id}/items", post(workout_plans::add_item))
        .route("/{id}/items/{item_id}", delete(workout_plans::remove_item))
        .route("/{id}/items/{item_id}/sets", post(workout_plans::add_set))
        .route(
            "/{id}/sets/{set_id}",
            axum::routing::patch(workout_plans::update_set).delete(workout_plans::remove_set),
        )
        .route("/{id}/reorder", post(workout_plans::reorder_items))
}
