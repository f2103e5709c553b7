//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod auth_session_repo;
pub mod daily_goal_repo;
pub mod exercise_repo;
pub mod invite_repo;
pub mod lead_repo;
pub mod organization_repo;
pub mod plan_item_repo;
pub mod plan_set_repo;
pub mod program_repo;
pub mod session_log_repo;
pub mod trainer_client_repo;
pub mod trainer_task_repo;
pub mod user_repo;
pub mod weight_log_repo;
pub mod workout_plan_repo;
pub mod workout_session_repo;

pub use auth_session_repo::AuthSessionRepo;
pub use daily_goal_repo::DailyGoalRepo;
pub use exercise_repo::ExerciseRepo;
pub use invite_repo::InviteRepo;
pub use lead_repo::LeadRepo;
pub use organization_repo::OrganizationRepo;
pub use plan_item_repo::PlanItemRepo;
pub use plan_set_repo::PlanSetRepo;
pub use program_repo::ProgramRepo;
pub use session_log_repo::SessionLogRepo;
pub use trainer_client_repo::TrainerClientRepo;
pub use trainer_task_repo::TrainerTaskRepo;
pub use user_repo::UserRepo;
pub use weight_log_repo::WeightLogRepo;
pub use workout_plan_repo::WorkoutPlanRepo;
pub use workout_session_repo::WorkoutSessionRepo;
