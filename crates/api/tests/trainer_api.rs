//! HTTP-level integration tests for trainer features: client assignments,
//! tasks, and the onboarding wizard submission.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json_auth, token_for};
use liftdesk_db::models::organization::CreateOrganization;
use liftdesk_db::repositories::OrganizationRepo;
use sqlx::PgPool;

async fn seed_org(pool: &PgPool) -> i64 {
    OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: "Iron Temple".to_string(),
        },
    )
    .await
    .expect("create org")
    .id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_assignment_conflicts(pool: PgPool) {
    let org = seed_org(&pool).await;
    let trainer = create_test_user(&pool, "trainer@test.com", "trainer", Some(org)).await;
    let client = create_test_user(&pool, "client@test.com", "member", Some(org)).await;
    let token = token_for(&trainer);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/trainer/clients",
        &token,
        serde_json::json!({ "client_id": client.id, "notes": "new client" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The (trainer, client) pair is unique.
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainer/clients",
        &token,
        serde_json::json!({ "client_id": client.id }),
    )
    .await;
    common::assert_error_code(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn members_cannot_manage_assignments(pool: PgPool) {
    let org = seed_org(&pool).await;
    let member = create_test_user(&pool, "justamember@test.com", "member", Some(org)).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainer/clients",
        &token_for(&member),
        serde_json::json!({ "client_id": member.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn task_lifecycle(pool: PgPool) {
    let org = seed_org(&pool).await;
    let trainer = create_test_user(&pool, "tasker@test.com", "trainer", Some(org)).await;
    let token = token_for(&trainer);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/trainer/tasks",
        &token,
        serde_json::json!({
            "title": "Program check-in", "priority": "high", "due_date": "2026-08-10",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    let task_id = task["data"]["id"].as_i64().expect("task id");
    assert_eq!(task["data"]["status"], "open");

    let response = common::patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/trainer/tasks/{task_id}"),
        &token,
        serde_json::json!({ "status": "done" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "done");

    // Status filter sees only matching tasks.
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/trainer/tasks?status=open",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("tasks").len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_task_enum_is_a_validation_error(pool: PgPool) {
    let org = seed_org(&pool).await;
    let trainer = create_test_user(&pool, "enums@test.com", "trainer", Some(org)).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/trainer/tasks",
        &token_for(&trainer),
        serde_json::json!({ "title": "Bad", "priority": "urgent" }),
    )
    .await;
    // Serde rejects the unknown enum variant at deserialization time.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Onboarding wizard submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn wizard_submission_creates_goals_plan_program_and_sessions(pool: PgPool) {
    let org = seed_org(&pool).await;
    let trainer = create_test_user(&pool, "wizard@test.com", "trainer", Some(org)).await;
    let client = create_test_user(&pool, "newbie@test.com", "member", Some(org)).await;
    let token = token_for(&trainer);

    // Client must be assigned first.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/trainer/clients",
        &token,
        serde_json::json!({ "client_id": client.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/onboarding/submit",
        &token,
        serde_json::json!({
            "client_id": client.id,
            "goals": { "steps": 8000, "water_ml": 2000, "sleep_hours": 8.0 },
            "plan": { "kind": "new" },
            "schedule_days": [0, 2, 4],
            "program_name": "Foundation",
            "duration_weeks": 4,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let plan_id = json["data"]["plan_id"].as_i64().expect("plan id");
    assert!(json["data"]["program_id"].is_number());

    // 4 weeks x 3 scheduled days.
    assert_eq!(json["data"]["sessions_created"], 12);

    // The goals landed on the client.
    let client_goals = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/goals",
        &token_for(&client),
    )
    .await;
    assert_eq!(client_goals.status(), StatusCode::OK);

    // The plan belongs to the client, named after the program.
    let plans = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workout-plans",
        &token_for(&client),
    )
    .await;
    let json = body_json(plans).await;
    let plans = json["data"].as_array().expect("plans");
    assert!(plans
        .iter()
        .any(|p| p["id"].as_i64() == Some(plan_id) && p["friendly_name"] == "Foundation"));

    // The client's calendar was populated.
    let sessions = get_auth(
        common::build_test_app(pool),
        "/api/v1/workout-sessions",
        &token_for(&client),
    )
    .await;
    let json = body_json(sessions).await;
    assert_eq!(json["data"].as_array().expect("sessions").len(), 12);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wizard_submission_requires_assignment(pool: PgPool) {
    let org = seed_org(&pool).await;
    let trainer = create_test_user(&pool, "unassigned@test.com", "trainer", Some(org)).await;
    let client = create_test_user(&pool, "someone@test.com", "member", Some(org)).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/onboarding/submit",
        &token_for(&trainer),
        serde_json::json!({
            "client_id": client.id,
            "goals": { "steps": 8000, "water_ml": 2000, "sleep_hours": 8.0 },
            "plan": { "kind": "new" },
            "schedule_days": [1],
            "program_name": "Nope",
            "duration_weeks": 2,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
