//! Resource-ownership authorization policy.
//!
//! Every mutating plan/session/goal route funnels through one helper keyed by
//! (resource kind, resource id, actor) instead of repeating an inline check
//! per endpoint. A missing row and an ownership mismatch produce the SAME
//! `NotFound` error: callers cannot distinguish "does not exist" from "not
//! yours", and the underlying write is never attempted on either.

use liftdesk_core::error::CoreError;
use liftdesk_core::types::DbId;
use liftdesk_db::models::workout_plan::WorkoutPlan;
use liftdesk_db::models::workout_session::WorkoutSession;
use liftdesk_db::repositories::{
    TrainerClientRepo, TrainerTaskRepo, WorkoutPlanRepo, WorkoutSessionRepo,
};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// The kinds of owned resources the policy knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedResource {
    WorkoutPlan,
    WorkoutSession,
    TrainerClient,
    TrainerTask,
}

impl OwnedResource {
    /// Entity name used in the uniform not-found error.
    fn entity(self) -> &'static str {
        match self {
            Self::WorkoutPlan => "WorkoutPlan",
            Self::WorkoutSession => "WorkoutSession",
            Self::TrainerClient => "TrainerClient",
            Self::TrainerTask => "TrainerTask",
        }
    }
}

/// The uniform rejection: identical for "absent" and "not yours".
fn no_access(resource: OwnedResource, id: DbId) -> AppError {
    AppError::Core(CoreError::not_found(resource.entity(), id))
}

/// Fetch an owned resource and verify the caller may act on it.
///
/// Ownership rules:
/// - the owner always passes
/// - a trainer passes for resources owned by a client assigned to them
/// - admins pass for users in their own organization's resources only when
///   acting as the owner or assigned trainer (no blanket admin override on
///   personal training data)
///
/// Returns the owning user id so handlers can log it.
pub async fn authorize_owned(
    pool: &PgPool,
    resource: OwnedResource,
    id: DbId,
    actor: &AuthUser,
) -> AppResult<DbId> {
    let owner_id = match resource {
        OwnedResource::WorkoutPlan => WorkoutPlanRepo::find_by_id(pool, id)
            .await?
            .map(|p: WorkoutPlan| p.user_id),
        OwnedResource::WorkoutSession => WorkoutSessionRepo::find_by_id(pool, id)
            .await?
            .map(|s: WorkoutSession| s.user_id),
        OwnedResource::TrainerClient => TrainerClientRepo::find_by_id(pool, id)
            .await?
            .map(|a| a.trainer_id),
        OwnedResource::TrainerTask => TrainerTaskRepo::find_by_id(pool, id)
            .await?
            .map(|t| t.trainer_id),
    };

    let Some(owner_id) = owner_id else {
        return Err(no_access(resource, id));
    };

    if owner_id == actor.user_id {
        return Ok(owner_id);
    }

    // Trainers may act on their assigned clients' plans and sessions.
    if matches!(
        resource,
        OwnedResource::WorkoutPlan | OwnedResource::WorkoutSession
    ) && actor.is_trainer()
        && TrainerClientRepo::is_assigned(pool, actor.user_id, owner_id).await?
    {
        return Ok(owner_id);
    }

    Err(no_access(resource, id))
}
