//! Workout session entities and the session aggregate.
//!
//! A session is one dated execution of a plan (or a standalone workout).
//! It references its plan rather than copying it; set logs record actuals
//! against the plan's target sets.

use chrono::NaiveDate;
use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::exercise::Exercise;
use super::workout_plan::WorkoutPlanDetail;

/// A row from the `workout_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutSession {
    pub id: DbId,
    pub user_id: DbId,
    pub plan_id: Option<DbId>,
    pub completed: bool,
    pub scheduled_for: NaiveDate,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `workout_session_set_logs` table.
///
/// Records actuals against one of the plan's target sets. Unique per
/// (session, plan set) so re-logging updates in place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutSessionSetLog {
    pub id: DbId,
    pub session_id: DbId,
    pub plan_set_id: DbId,
    pub reps: String,
    pub weight: String,
    pub rest: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A session with its resolved plan aggregate (when it references one) and
/// its set logs.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutSessionDetail {
    #[serde(flatten)]
    pub session: WorkoutSession,
    /// `None` for standalone sessions, and in the batch accessor when the
    /// referenced plan could not be resolved.
    pub workout_plan: Option<WorkoutPlanDetail>,
    /// Every exercise the embedded plan references, resolved for rendering.
    pub exercises: Vec<Exercise>,
    pub logs: Vec<WorkoutSessionSetLog>,
}

/// DTO for creating a session.
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutSession {
    pub plan_id: Option<DbId>,
    pub scheduled_for: NaiveDate,
}

/// DTO for logging actuals against a plan target set.
#[derive(Debug, Deserialize)]
pub struct UpsertSetLog {
    pub plan_set_id: DbId,
    pub reps: String,
    pub weight: String,
    pub rest: String,
    pub completed: bool,
}
