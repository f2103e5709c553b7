//! Cross-cutting error shape tests: every failure path returns the same
//! `{ "error": ..., "code": ... }` envelope with an appropriate status.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json_auth, token_for};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_routes_are_plain_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/no-such-resource").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_reject_missing_and_malformed_tokens(pool: PgPool) {
    for (uri, header) in [
        ("/api/v1/workout-plans", None),
        ("/api/v1/workout-plans", Some("Token abc")),
        ("/api/v1/workout-plans", Some("Bearer not-a-jwt")),
    ] {
        let app = common::build_test_app(pool.clone());
        let mut builder = axum::http::Request::builder().method("GET").uri(uri);
        if let Some(h) = header {
            builder = builder.header("authorization", h);
        }
        let request = builder.body(axum::body::Body::empty()).expect("request");
        let response = tower::ServiceExt::oneshot(app, request).await.expect("response");
        common::assert_error_code(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_resources_carry_the_error_envelope(pool: PgPool) {
    let user = create_test_user(&pool, "envelope@test.com", "member", None).await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/workout-plans/424242",
        &token_for(&user),
    )
    .await;
    common::assert_error_code(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn validation_failures_carry_the_error_envelope(pool: PgPool) {
    let user = create_test_user(&pool, "invalid@test.com", "member", None).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/workout-plans",
        &token_for(&user),
        serde_json::json!({ "friendly_name": "   " }),
    )
    .await;
    common::assert_error_code(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn body_json_helper_sees_error_and_message(pool: PgPool) {
    let user = create_test_user(&pool, "shape@test.com", "member", None).await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/goals",
        &token_for(&user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].as_str().expect("message").contains("DailyGoals"));
}
