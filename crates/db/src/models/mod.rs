//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod auth_session;
pub mod daily_goal;
pub mod exercise;
pub mod invite;
pub mod lead;
pub mod organization;
pub mod program;
pub mod trainer_client;
pub mod trainer_task;
pub mod user;
pub mod weight_log;
pub mod workout_plan;
pub mod workout_session;
