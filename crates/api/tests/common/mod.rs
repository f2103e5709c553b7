//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! and drives it through `tower::ServiceExt::oneshot` -- no TCP listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use liftdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use liftdesk_api::auth::password::hash_password;
use liftdesk_api::config::{FacebookConfig, ServerConfig};
use liftdesk_api::router::build_app_router;
use liftdesk_api::state::AppState;
use liftdesk_core::types::DbId;
use liftdesk_db::models::user::{CreateUser, User};
use liftdesk_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password used for every seeded test user.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Shared cron secret wired into the test config.
pub const TEST_CRON_SECRET: &str = "cron-secret-for-tests";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        cron_secret: Some(TEST_CRON_SECRET.to_string()),
        facebook: FacebookConfig {
            verify_token: Some("fb-verify-token".to_string()),
            // Signature checking is skipped when no app secret is set, so
            // webhook tests can post unsigned payloads.
            app_secret: None,
            app_id: None,
            page_token: None,
            graph_base_url: "http://127.0.0.1:9/graph".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        http: reqwest::Client::new(),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Send a JSON request with the given method, optionally authenticated.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Send an unauthenticated JSON POST.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, None, body).await
}

/// Send an authenticated JSON POST.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", uri, Some(token), body).await
}

/// Send an authenticated JSON PUT.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PUT", uri, Some(token), body).await
}

/// Send an authenticated JSON PATCH.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PATCH", uri, Some(token), body).await
}

/// Send an authenticated DELETE.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database.
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    role: &str,
    organization_id: Option<DbId>,
) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            phone: None,
            password_hash: hashed,
            full_name: "Test User".to_string(),
            role: role.to_string(),
            organization_id,
            billing_plan: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Mint an access token for a user without going through the login flow.
pub fn token_for(user: &User) -> String {
    generate_access_token(
        user.id,
        &user.role,
        user.organization_id,
        &test_config().jwt,
    )
    .expect("token generation should succeed")
}

/// Assert a response carries the uniform JSON error envelope.
pub async fn assert_error_code(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}
