//! Handlers for the client-onboarding wizard.
//!
//! The wizard state machine itself lives in `liftdesk_core::wizard` and is
//! driven client-side; the server validates the final submission and runs
//! the four persistence calls in order: goals -> plan -> program metadata
//! -> session population. There is NO compensating rollback on partial
//! failure -- a failed later step leaves the earlier writes in place and
//! reports the error.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use liftdesk_core::error::CoreError;
use liftdesk_core::wizard::{PlanChoice, WizardStep, WizardSubmission, MAX_STEP, MIN_STEP};
use liftdesk_db::models::daily_goal::UpsertDailyGoals;
use liftdesk_db::models::program::CreateClientProgram;
use liftdesk_db::models::workout_plan::CreateWorkoutPlan;
use liftdesk_db::repositories::{
    DailyGoalRepo, ProgramRepo, TrainerClientRepo, WorkoutPlanRepo,
};
use serde::Serialize;

use crate::background::session_population;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Step metadata
// ---------------------------------------------------------------------------

/// One step description for wizard UIs.
#[derive(Debug, Serialize)]
pub struct StepInfo {
    pub index: u8,
    pub key: WizardStep,
    pub label: &'static str,
}

/// GET /api/v1/onboarding/steps
///
/// The ordered step definitions, so clients render the stepper from the
/// same source of truth the server validates against.
pub async fn list_steps(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    let steps: Vec<StepInfo> = (MIN_STEP..=MAX_STEP)
        .map(|n| {
            let step = WizardStep::from_index(n).map_err(AppError::Core)?;
            Ok(StepInfo {
                index: n,
                key: step,
                label: step.label(),
            })
        })
        .collect::<AppResult<_>>()?;

    Ok(Json(DataResponse { data: steps }))
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Everything the submission created, reported back to the wizard.
#[derive(Debug, Serialize)]
pub struct SubmissionResult {
    pub program_id: i64,
    pub plan_id: i64,
    pub sessions_created: u64,
}

/// POST /api/v1/onboarding/submit
///
/// Run the wizard's terminal action. The caller must be a trainer with the
/// submitted client assigned to them. The four persistence calls run
/// sequentially with no rollback on partial failure.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(submission): Json<WizardSubmission>,
) -> AppResult<impl IntoResponse> {
    if !auth.is_trainer() && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only trainers can onboard clients".into(),
        )));
    }

    if !TrainerClientRepo::is_assigned(&state.pool, auth.user_id, submission.client_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "User",
            submission.client_id,
        )));
    }

    validate_submission(&submission)?;

    // 1. Daily goals for the client.
    DailyGoalRepo::upsert_targets(
        &state.pool,
        submission.client_id,
        &UpsertDailyGoals {
            steps: submission.goals.steps,
            water_ml: submission.goals.water_ml,
            sleep_hours: submission.goals.sleep_hours,
        },
    )
    .await?;

    // 2. The workout plan: reuse an existing one or create a fresh one
    //    owned by the client.
    let plan_id = match submission.plan {
        PlanChoice::Existing(plan_id) => {
            let plan = WorkoutPlanRepo::find_by_id(&state.pool, plan_id)
                .await?
                .filter(|p| p.user_id == submission.client_id || p.user_id == auth.user_id)
                .ok_or_else(|| AppError::Core(CoreError::not_found("WorkoutPlan", plan_id)))?;
            plan.id
        }
        PlanChoice::New => {
            WorkoutPlanRepo::create(
                &state.pool,
                submission.client_id,
                &CreateWorkoutPlan {
                    friendly_name: submission.program_name.clone(),
                },
            )
            .await?
            .id
        }
    };

    // 3. Program metadata.
    let program = ProgramRepo::create(
        &state.pool,
        &CreateClientProgram {
            trainer_id: auth.user_id,
            client_id: submission.client_id,
            plan_id,
            name: submission.program_name.clone(),
            duration_weeks: submission.duration_weeks,
            schedule_days: submission.schedule_days.iter().map(|&d| d as i16).collect(),
            starts_on: chrono::Utc::now().date_naive(),
        },
    )
    .await?;

    // 4. Session population across the program window.
    let sessions_created =
        session_population::populate_whole_program(&state.pool, &program).await?;

    tracing::info!(
        program_id = program.id,
        plan_id,
        client_id = submission.client_id,
        trainer_id = auth.user_id,
        sessions_created,
        "Onboarding submission completed",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionResult {
                program_id: program.id,
                plan_id,
                sessions_created,
            },
        }),
    ))
}

/// Reject structurally invalid submissions before any write happens.
/// Mirrors the per-step `can_proceed` rules of the wizard state machine.
fn validate_submission(submission: &WizardSubmission) -> AppResult<()> {
    if !submission.goals.is_complete() {
        return Err(AppError::Core(CoreError::Validation(
            "All three daily goal targets must be positive".into(),
        )));
    }
    if submission.schedule_days.is_empty() || submission.schedule_days.iter().any(|&d| d > 6) {
        return Err(AppError::Core(CoreError::Validation(
            "Schedule days must be non-empty and between 0 (Monday) and 6 (Sunday)".into(),
        )));
    }
    if submission.program_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Program name must not be empty".into(),
        )));
    }
    if submission.duration_weeks <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Program duration must be positive".into(),
        )));
    }
    Ok(())
}
