//! Route definitions for the `/trainer` resource tree: client assignments
//! and tasks.

use axum::routing::get;
use axum::Router;

use crate::handlers::{trainer_clients, trainer_tasks};
use crate::state::AppState;

/// Routes mounted at `/trainer`.
///
/// ```text
/// GET    /clients       -> list_assignments
/// POST   /clients       -> create_assignment (unique pair -> 409)
/// PATCH  /clients/{id}  -> update_assignment (notes)
/// DELETE /clients/{id}  -> delete_assignment
/// GET    /tasks         -> list_tasks (status/client filters)
/// POST   /tasks         -> create_task
/// PATCH  /tasks/{id}    -> update_task
/// DELETE /tasks/{id}    -> delete_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(trainer_clients::list_assignments).post(trainer_clients::create_assignment),
        )
        .route(
            "/clients/{id}",
            axum::routing::patch(trainer_clients::update_assignment)
                .delete(trainer_clients::delete_assignment),
        )
        .route(
            "/tasks",
            get(trainer_tasks::list_tasks).post(trainer_tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            axum::routing::patch(trainer_tasks::update_task).delete(trainer_tasks::delete_task),
        )
}
