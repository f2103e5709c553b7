//! HTTP-level integration tests for the workout plan resource tree.
//!
//! Covers the end-to-end authoring flow (create plan -> add item -> add
//! sets -> fetch aggregate), ownership enforcement on mutations, and the
//! batch reorder endpoint.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get_auth, patch_json_auth, post_json_auth,
    token_for,
};
use sqlx::PgPool;

/// Seed exercises are inserted by the catalog migration; grab one id.
async fn first_exercise_id(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT id FROM exercises ORDER BY id ASC LIMIT 1")
        .fetch_one(pool)
        .await
        .expect("seeded exercise")
}

#[sqlx::test(migrations = "../db/migrations")]
async fn leg_day_end_to_end(pool: PgPool) {
    let user = create_test_user(&pool, "legday@test.com", "member", None).await;
    let token = token_for(&user);
    let exercise_id = first_exercise_id(&pool).await;

    // Create the plan.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workout-plans",
        &token,
        serde_json::json!({ "friendly_name": "Leg Day" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let plan = body_json(response).await;
    let plan_id = plan["data"]["id"].as_i64().expect("plan id");

    // Add one item.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workout-plans/{plan_id}/items"),
        &token,
        serde_json::json!({ "exercise_id": exercise_id, "order": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = body_json(response).await;
    let item_id = item["data"]["id"].as_i64().expect("item id");

    // Add two target sets.
    for set in [
        serde_json::json!({ "reps": "10", "weight": "50", "rest": "60" }),
        serde_json::json!({ "reps": "8", "weight": "60", "rest": "90" }),
    ] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/workout-plans/{plan_id}/items/{item_id}/sets"),
            &token,
            set,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Fetch the aggregate and check the exact nested shape.
    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/workout-plans/{plan_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let detail = &json["data"];

    assert_eq!(detail["friendly_name"], "Leg Day");
    let items = detail["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["exercise_id"].as_i64(), Some(exercise_id));
    assert_eq!(items[0]["order"], 0);

    let sets = items[0]["sets"].as_array().expect("sets array");
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["reps"], "10");
    assert_eq!(sets[0]["weight"], "50");
    assert_eq!(sets[1]["reps"], "8");
    assert_eq!(sets[1]["weight"], "60");
    assert_eq!(sets[1]["rest"], "90");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_plan_aggregate_has_empty_items_array(pool: PgPool) {
    let user = create_test_user(&pool, "emptyagg@test.com", "member", None).await;
    let token = token_for(&user);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workout-plans",
        &token,
        serde_json::json!({ "friendly_name": "Empty" }),
    )
    .await;
    let plan_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("plan id");

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/workout-plans/{plan_id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_plan_mutations_are_uniform_not_found_and_do_not_write(pool: PgPool) {
    let owner = create_test_user(&pool, "owner@test.com", "member", None).await;
    let stranger = create_test_user(&pool, "stranger@test.com", "member", None).await;
    let owner_token = token_for(&owner);
    let stranger_token = token_for(&stranger);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workout-plans",
        &owner_token,
        serde_json::json!({ "friendly_name": "Private" }),
    )
    .await;
    let plan_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("plan id");

    // PATCH by a stranger: same 404 as a missing plan, nothing written.
    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workout-plans/{plan_id}"),
        &stranger_token,
        serde_json::json!({ "friendly_name": "Hijacked" }),
    )
    .await;
    common::assert_error_code(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;

    // DELETE by a stranger: also 404, row still there.
    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workout-plans/{plan_id}"),
        &stranger_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/workout-plans/{plan_id}"),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["friendly_name"], "Private");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reorder_persists_only_the_sent_deltas(pool: PgPool) {
    let user = create_test_user(&pool, "reorder@test.com", "member", None).await;
    let token = token_for(&user);
    let exercise_id = first_exercise_id(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workout-plans",
        &token,
        serde_json::json!({ "friendly_name": "Push" }),
    )
    .await;
    let plan_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("plan id");

    let mut item_ids = Vec::new();
    for order in 0..3 {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/workout-plans/{plan_id}/items"),
            &token,
            serde_json::json!({ "exercise_id": exercise_id, "order": order }),
        )
        .await;
        item_ids.push(
            body_json(response).await["data"]["id"]
                .as_i64()
                .expect("item id"),
        );
    }

    // Swap the last two items; the first keeps its order.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/workout-plans/{plan_id}/reorder"),
        &token,
        serde_json::json!({ "updates": [
            { "item_id": item_ids[1], "order": 2 },
            { "item_id": item_ids[2], "order": 1 },
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 2);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/workout-plans/{plan_id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let items = json["data"]["items"].as_array().expect("items");
    let ordered_ids: Vec<i64> = items
        .iter()
        .map(|i| i["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ordered_ids, vec![item_ids[0], item_ids[2], item_ids[1]]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn adding_item_for_unknown_exercise_is_not_found(pool: PgPool) {
    let user = create_test_user(&pool, "badex@test.com", "member", None).await;
    let token = token_for(&user);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/workout-plans",
        &token,
        serde_json::json!({ "friendly_name": "Plan" }),
    )
    .await;
    let plan_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("plan id");

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/workout-plans/{plan_id}/items"),
        &token,
        serde_json::json!({ "exercise_id": 999_999, "order": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
