//! Workout plan entities and the nested plan aggregate.
//!
//! A plan is an ordered template: plan -> items (each referencing one
//! exercise, carrying a display `order`) -> target sets. Target
//! reps/weight/rest are stored as text -- unit-less and client-interpreted,
//! so annotations like "AMRAP" survive round-trips.

use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workout_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutPlan {
    pub id: DbId,
    pub user_id: DbId,
    pub friendly_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `workout_plan_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutPlanItem {
    pub id: DbId,
    pub plan_id: DbId,
    pub exercise_id: DbId,
    /// Display position within the plan, ascending. Unique per plan by
    /// write-order only; there is no DB constraint.
    pub order: i32,
    pub created_at: Timestamp,
}

/// A row from the `workout_plan_item_sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutPlanItemSet {
    pub id: DbId,
    pub item_id: DbId,
    pub reps: String,
    pub weight: String,
    pub rest: String,
    pub created_at: Timestamp,
}

/// One plan item with its ordered target sets attached.
#[derive(Debug, Clone, Serialize)]
pub struct PlanItemDetail {
    #[serde(flatten)]
    pub item: WorkoutPlanItem,
    pub sets: Vec<WorkoutPlanItemSet>,
}

/// The full nested aggregate: plan -> ordered items -> ordered sets.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutPlanDetail {
    #[serde(flatten)]
    pub plan: WorkoutPlan,
    pub items: Vec<PlanItemDetail>,
}

/// DTO for creating a new plan.
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutPlan {
    pub friendly_name: String,
}

/// DTO for renaming a plan.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkoutPlan {
    pub friendly_name: Option<String>,
}

/// DTO for adding an item to a plan.
#[derive(Debug, Deserialize)]
pub struct CreatePlanItem {
    pub exercise_id: DbId,
    pub order: i32,
}

/// DTO for adding a target set to a plan item.
#[derive(Debug, Deserialize)]
pub struct CreatePlanSet {
    pub reps: String,
    pub weight: String,
    pub rest: String,
}

/// DTO for updating a target set. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePlanSet {
    pub reps: Option<String>,
    pub weight: Option<String>,
    pub rest: Option<String>,
}

/// One (item id, new order) pair in a batch reorder request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ItemOrderUpdate {
    pub item_id: DbId,
    pub order: i32,
}
