//! Scheduled workout-session population.
//!
//! Turns client program schedules into concrete `workout_sessions` rows.
//! The same logic backs three entry points: the periodic background task,
//! the secret-protected cron endpoint (fleet-wide), and the authenticated
//! per-user fallback. Creation is idempotent, so overlapping invocations
//! only ever add missing rows.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use liftdesk_db::models::program::ClientProgram;
use liftdesk_db::repositories::{ProgramRepo, WorkoutSessionRepo};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the population job runs.
const POPULATION_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Create today's session for one program if today is a scheduled day.
///
/// Returns `true` when a new session row was created.
pub async fn populate_program_for_day(
    pool: &PgPool,
    program: &ClientProgram,
    day: NaiveDate,
) -> Result<bool, sqlx::Error> {
    let weekday = day.weekday().num_days_from_monday() as i16;
    if !program.schedule_days.contains(&weekday) {
        return Ok(false);
    }
    WorkoutSessionRepo::create_planned_if_absent(pool, program.client_id, program.plan_id, day)
        .await
}

/// Populate sessions for every day of a program's duration window.
///
/// Used right after the onboarding wizard creates a program, so the client's
/// calendar is filled immediately. Returns the number of sessions created.
pub async fn populate_whole_program(
    pool: &PgPool,
    program: &ClientProgram,
) -> Result<u64, sqlx::Error> {
    let mut created = 0;
    let total_days = i64::from(program.duration_weeks) * 7;
    for offset in 0..total_days {
        let day = program.starts_on + chrono::Duration::days(offset);
        if populate_program_for_day(pool, program, day).await? {
            created += 1;
        }
    }
    Ok(created)
}

/// Populate today's sessions for every active program.
///
/// Per-program failures are logged and skipped so one broken program does
/// not starve the rest. Returns the number of sessions created.
pub async fn populate_all_for_day(pool: &PgPool, day: NaiveDate) -> Result<u64, sqlx::Error> {
    let programs = ProgramRepo::list_active(pool, day).await?;
    let mut created = 0;
    for program in &programs {
        match populate_program_for_day(pool, program, day).await {
            Ok(true) => created += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    program_id = program.id,
                    error = %e,
                    "Session population skipped a program",
                );
            }
        }
    }
    Ok(created)
}

/// Populate today's sessions for one user's programs only.
pub async fn populate_for_user(
    pool: &PgPool,
    user_id: i64,
    day: NaiveDate,
) -> Result<u64, sqlx::Error> {
    let programs = ProgramRepo::list_by_client(pool, user_id).await?;
    let mut created = 0;
    for program in &programs {
        if populate_program_for_day(pool, program, day).await? {
            created += 1;
        }
    }
    Ok(created)
}

/// Run the periodic population loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = POPULATION_INTERVAL.as_secs(),
        "Session population job started"
    );

    let mut interval = tokio::time::interval(POPULATION_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session population job stopping");
                break;
            }
            _ = interval.tick() => {
                let today = chrono::Utc::now().date_naive();
                match populate_all_for_day(&pool, today).await {
                    Ok(created) => {
                        if created > 0 {
                            tracing::info!(created, "Session population: created sessions");
                        } else {
                            tracing::debug!("Session population: nothing to create");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session population failed");
                    }
                }
            }
        }
    }
}
