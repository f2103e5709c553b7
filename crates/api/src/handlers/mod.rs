//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod crons;
pub mod exercises;
pub mod goals;
pub mod leads;
pub mod members;
pub mod onboarding;
pub mod organizations;
pub mod trainer_clients;
pub mod trainer_tasks;
pub mod webhooks;
pub mod weight_logs;
pub mod workout_plans;
pub mod workout_sessions;
