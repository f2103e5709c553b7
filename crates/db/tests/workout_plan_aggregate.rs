//! Integration tests for the workout plan aggregate.
//!
//! Exercises the repository layer against a real database:
//! - Nested aggregate assembly (plan -> items -> sets) with ordering
//! - Empty-plan and empty-item edge cases
//! - Cascade delete behaviour

use liftdesk_db::models::user::CreateUser;
use liftdesk_db::models::workout_plan::{
    CreatePlanItem, CreatePlanSet, CreateWorkoutPlan, ItemOrderUpdate,
};
use liftdesk_db::repositories::{PlanItemRepo, PlanSetRepo, UserRepo, WorkoutPlanRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            phone: None,
            password_hash: "x".to_string(),
            full_name: "Test User".to_string(),
            role: "member".to_string(),
            organization_id: None,
            billing_plan: None,
        },
    )
    .await
    .expect("create user");
    user.id
}

fn new_set(reps: &str, weight: &str, rest: &str) -> CreatePlanSet {
    CreatePlanSet {
        reps: reps.to_string(),
        weight: weight.to_string(),
        rest: rest.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Aggregate assembly
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn aggregate_assembles_items_and_sets_in_order(pool: PgPool) {
    let user_id = seed_user(&pool, "agg@example.com").await;
    let plan = WorkoutPlanRepo::create(
        &pool,
        user_id,
        &CreateWorkoutPlan {
            friendly_name: "Leg Day".to_string(),
        },
    )
    .await
    .expect("create plan");

    // Insert out of display order to prove sorting is by `order`, not id.
    let second = PlanItemRepo::create(
        &pool,
        plan.id,
        &CreatePlanItem {
            exercise_id: 2,
            order: 1,
        },
    )
    .await
    .expect("create item");
    let first = PlanItemRepo::create(
        &pool,
        plan.id,
        &CreatePlanItem {
            exercise_id: 1,
            order: 0,
        },
    )
    .await
    .expect("create item");

    let set_a = PlanSetRepo::create(&pool, first.id, &new_set("10", "50", "60"))
        .await
        .expect("create set");
    let set_b = PlanSetRepo::create(&pool, first.id, &new_set("8", "60", "90"))
        .await
        .expect("create set");

    let detail = WorkoutPlanRepo::find_detail(&pool, plan.id)
        .await
        .expect("fetch aggregate")
        .expect("plan exists");

    assert_eq!(detail.plan.friendly_name, "Leg Day");
    assert_eq!(detail.items.len(), 2);

    // Items sorted by ascending `order`.
    assert_eq!(detail.items[0].item.id, first.id);
    assert_eq!(detail.items[1].item.id, second.id);

    // Sets sorted by ascending id; item without sets gets an empty vec.
    assert_eq!(detail.items[0].sets.len(), 2);
    assert_eq!(detail.items[0].sets[0].id, set_a.id);
    assert_eq!(detail.items[0].sets[1].id, set_b.id);
    assert_eq!(detail.items[0].sets[0].reps, "10");
    assert_eq!(detail.items[0].sets[1].weight, "60");
    assert!(detail.items[1].sets.is_empty());
}

#[sqlx::test]
async fn aggregate_of_empty_plan_has_empty_items(pool: PgPool) {
    let user_id = seed_user(&pool, "empty@example.com").await;
    let plan = WorkoutPlanRepo::create(
        &pool,
        user_id,
        &CreateWorkoutPlan {
            friendly_name: "Empty".to_string(),
        },
    )
    .await
    .expect("create plan");

    let detail = WorkoutPlanRepo::find_detail(&pool, plan.id)
        .await
        .expect("fetch aggregate")
        .expect("plan exists");

    assert!(detail.items.is_empty());
}

#[sqlx::test]
async fn aggregate_of_missing_plan_is_none(pool: PgPool) {
    let detail = WorkoutPlanRepo::find_detail(&pool, 999_999)
        .await
        .expect("fetch aggregate");
    assert!(detail.is_none());
}

// ---------------------------------------------------------------------------
// Reorder and delete
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn order_deltas_apply_within_plan_only(pool: PgPool) {
    let user_id = seed_user(&pool, "reorder@example.com").await;
    let plan = WorkoutPlanRepo::create(
        &pool,
        user_id,
        &CreateWorkoutPlan {
            friendly_name: "Push".to_string(),
        },
    )
    .await
    .expect("create plan");
    let other = WorkoutPlanRepo::create(
        &pool,
        user_id,
        &CreateWorkoutPlan {
            friendly_name: "Pull".to_string(),
        },
    )
    .await
    .expect("create plan");

    let a = PlanItemRepo::create(
        &pool,
        plan.id,
        &CreatePlanItem {
            exercise_id: 1,
            order: 0,
        },
    )
    .await
    .expect("create item");
    let foreign = PlanItemRepo::create(
        &pool,
        other.id,
        &CreatePlanItem {
            exercise_id: 2,
            order: 0,
        },
    )
    .await
    .expect("create item");

    let touched = PlanItemRepo::apply_order_updates(
        &pool,
        plan.id,
        &[
            ItemOrderUpdate {
                item_id: a.id,
                order: 5,
            },
            // Wrong plan: must be ignored by the plan_id guard.
            ItemOrderUpdate {
                item_id: foreign.id,
                order: 9,
            },
        ],
    )
    .await
    .expect("apply updates");

    assert_eq!(touched, 1);

    let untouched = PlanItemRepo::find_by_id(&pool, foreign.id)
        .await
        .expect("fetch item")
        .expect("item exists");
    assert_eq!(untouched.order, 0);
}

#[sqlx::test]
async fn deleting_plan_cascades_to_items_and_sets(pool: PgPool) {
    let user_id = seed_user(&pool, "cascade@example.com").await;
    let plan = WorkoutPlanRepo::create(
        &pool,
        user_id,
        &CreateWorkoutPlan {
            friendly_name: "Doomed".to_string(),
        },
    )
    .await
    .expect("create plan");
    let item = PlanItemRepo::create(
        &pool,
        plan.id,
        &CreatePlanItem {
            exercise_id: 1,
            order: 0,
        },
    )
    .await
    .expect("create item");
    let set = PlanSetRepo::create(&pool, item.id, &new_set("5", "100", "120"))
        .await
        .expect("create set");

    assert!(WorkoutPlanRepo::delete(&pool, plan.id).await.expect("delete"));

    assert!(PlanItemRepo::find_by_id(&pool, item.id)
        .await
        .expect("fetch item")
        .is_none());
    assert!(PlanSetRepo::find_by_id(&pool, set.id)
        .await
        .expect("fetch set")
        .is_none());
}
