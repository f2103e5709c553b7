//! HTTP-level integration tests for goals and weight logs.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn targets_put_then_get(pool: PgPool) {
    let user = create_test_user(&pool, "targets@test.com", "member", None).await;
    let token = token_for(&user);

    // Unset targets are not-found.
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/goals", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/goals",
        &token,
        serde_json::json!({ "steps": 8000, "water_ml": 2000, "sleep_hours": 8.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(common::build_test_app(pool), "/api/v1/goals", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["steps"], 8000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_positive_targets_are_rejected(pool: PgPool) {
    let user = create_test_user(&pool, "zerotargets@test.com", "member", None).await;
    let token = token_for(&user);

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/goals",
        &token,
        serde_json::json!({ "steps": 8000, "water_ml": 0, "sleep_hours": 8.0 }),
    )
    .await;
    common::assert_error_code(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn day_log_upsert_is_idempotent(pool: PgPool) {
    let user = create_test_user(&pool, "daylog@test.com", "member", None).await;
    let token = token_for(&user);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/goals/logs",
        &token,
        serde_json::json!({
            "log_date": "2026-08-05", "steps": 5000, "water_ml": 1200, "sleep_hours": 6.5,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("log id");

    // Same day again: updates in place, no duplicate row.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/goals/logs",
        &token,
        serde_json::json!({
            "log_date": "2026-08-05", "steps": 9000, "water_ml": 2000, "sleep_hours": 6.5,
        }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"].as_i64(), Some(first_id));
    assert_eq!(json["data"]["steps"], 9000);

    let response = get_auth(common::build_test_app(pool), "/api/v1/goals/logs", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("logs").len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn weight_log_create_list_delete(pool: PgPool) {
    let user = create_test_user(&pool, "scale@test.com", "member", None).await;
    let token = token_for(&user);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/weight-logs",
        &token,
        serde_json::json!({ "weight_kg": 82.4, "logged_on": "2026-08-05" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let log_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("log id");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/weight-logs",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("logs").len(), 1);

    // Another user cannot delete it.
    let stranger = create_test_user(&pool, "notmyscale@test.com", "member", None).await;
    let response = common::delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/weight-logs/{log_id}"),
        &token_for(&stranger),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/weight-logs/{log_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
