//! HTTP-level integration tests for leads and organization scoping.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json_auth, token_for};
use liftdesk_db::models::organization::CreateOrganization;
use liftdesk_db::repositories::OrganizationRepo;
use sqlx::PgPool;

async fn seed_org(pool: &PgPool, name: &str) -> i64 {
    OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: name.to_string(),
        },
    )
    .await
    .expect("create org")
    .id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lead_pipeline_crud_and_filters(pool: PgPool) {
    let org = seed_org(&pool, "Iron Temple").await;
    let admin = create_test_user(&pool, "sales@test.com", "admin", Some(org)).await;
    let token = token_for(&admin);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/leads",
        &token,
        serde_json::json!({
            "name": "Walk-in Willow", "phone": "+15550001", "source": "walk_in",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let lead = body_json(response).await;
    let lead_id = lead["data"]["id"].as_i64().expect("lead id");
    assert_eq!(lead["data"]["status"], "new");

    // Move it through the pipeline.
    let response = common::patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/leads/{lead_id}"),
        &token,
        serde_json::json!({ "status": "contacted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "contacted");

    // Status filter.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/leads?status=new",
        &token,
    )
    .await;
    assert_eq!(
        body_json(response).await["data"]
            .as_array()
            .expect("leads")
            .len(),
        0
    );
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/leads?status=contacted",
        &token,
    )
    .await;
    assert_eq!(
        body_json(response).await["data"]
            .as_array()
            .expect("leads")
            .len(),
        1
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn leads_are_invisible_across_organizations(pool: PgPool) {
    let org_a = seed_org(&pool, "Gym A").await;
    let org_b = seed_org(&pool, "Gym B").await;
    let admin_a = create_test_user(&pool, "a@test.com", "admin", Some(org_a)).await;
    let admin_b = create_test_user(&pool, "b@test.com", "admin", Some(org_b)).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/leads",
        &token_for(&admin_a),
        serde_json::json!({ "name": "Tenant A Lead", "source": "web" }),
    )
    .await;
    let lead_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("lead id");

    // Tenant B sees neither the row nor its existence.
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/leads/{lead_id}"),
        &token_for(&admin_b),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/leads",
        &token_for(&admin_b),
    )
    .await;
    assert_eq!(
        body_json(response).await["data"]
            .as_array()
            .expect("leads")
            .len(),
        0
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_invite_reports_per_row_outcomes(pool: PgPool) {
    let org = seed_org(&pool, "Iron Temple").await;
    let admin = create_test_user(&pool, "inviter@test.com", "admin", Some(org)).await;
    let token = token_for(&admin);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/members/invite/batch",
        &token,
        serde_json::json!({ "rows": [
            { "email": "one@test.com", "role": "member" },
            { "email": "two@test.com", "role": "cosmonaut" },
            { "email": "three@test.com", "role": "trainer" },
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let outcomes = json["data"].as_array().expect("outcomes");

    // The bad row fails alone; rows after it still go through.
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["invited"], true);
    assert_eq!(outcomes[1]["invited"], false);
    assert!(outcomes[1]["error"].is_string());
    assert_eq!(outcomes[2]["invited"], true);
}
