//! HTTP-level integration tests for the `/schedules` API.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Scenarios are set up through the API itself, then verified through the
//! week view, so these tests cover the full resolve path end to end.
//!
//! 2025-10-06 is a Monday; its week runs 2025-10-05 (Sun) .. 2025-10-11 (Sat).

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn recurring_body(day_of_week: i32, start: &str, end: &str) -> serde_json::Value {
    json!({ "day_of_week": day_of_week, "start_time": start, "end_time": end })
}

fn exception_body(date: &str, start: &str, end: &str) -> serde_json::Value {
    json!({ "date": date, "start_time": start, "end_time": end })
}

/// Slots of the day at `index` (0 = Sunday) from a week-view response.
fn day_slots(week: &serde_json::Value, index: usize) -> &Vec<serde_json::Value> {
    week["data"]["days"][index]["slots"].as_array().unwrap()
}

// ---------------------------------------------------------------------------
// Test: empty store still yields a full week
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_week_view_empty_store(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/schedules?date=2025-10-06").await;
    assert_eq!(response.status(), StatusCode::OK);

    let week = body_json(response).await;
    assert_eq!(week["data"]["week_start"], "2025-10-05");
    assert_eq!(week["data"]["week_end"], "2025-10-11");
    let days = week["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert!(days.iter().all(|d| d["slots"].as_array().unwrap().is_empty()));
}

// ---------------------------------------------------------------------------
// Test: recurring rule appears on its weekday across the week view
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_recurring_rule_shows_on_its_weekday(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/schedules",
        recurring_body(1, "09:00", "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created["data"]["id"].as_i64().unwrap() > 0);

    let response = get(build_test_app(pool), "/schedules?date=2025-10-06").await;
    let week = body_json(response).await;

    let monday = day_slots(&week, 1);
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0]["kind"], "recurring");
    assert_eq!(monday[0]["start_time"], "09:00:00");
    assert_eq!(monday[0]["end_time"], "10:00:00");
    for index in [0, 2, 3, 4, 5, 6] {
        assert!(day_slots(&week, index).is_empty(), "day {index}");
    }
}

// ---------------------------------------------------------------------------
// Test: override replaces the recurring slot for its date
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_override_replaces_recurring_slot(pool: PgPool) {
    post_json(
        build_test_app(pool.clone()),
        "/schedules",
        recurring_body(1, "09:00", "10:00"),
    )
    .await;
    let response = post_json(
        build_test_app(pool.clone()),
        "/schedules/exceptions",
        exception_body("2025-10-06", "14:00", "15:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let week = body_json(get(build_test_app(pool), "/schedules?date=2025-10-06").await).await;
    let monday = day_slots(&week, 1);
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0]["kind"], "override");
    assert_eq!(monday[0]["start_time"], "14:00:00");
}

// ---------------------------------------------------------------------------
// Test: cancelling a date empties it even with recurring rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cancel_empties_the_date(pool: PgPool) {
    post_json(
        build_test_app(pool.clone()),
        "/schedules",
        recurring_body(1, "09:00", "10:00"),
    )
    .await;

    let response = delete(build_test_app(pool.clone()), "/schedules/2025-10-06").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cancelled = body_json(response).await;
    assert_eq!(cancelled["data"]["exception_type"], "cancellation");
    assert!(cancelled["data"]["start_time"].is_null());

    let week = body_json(get(build_test_app(pool), "/schedules?date=2025-10-06").await).await;
    assert!(day_slots(&week, 1).is_empty());
    // The rule still shows the following Monday.
    // (Same store, next week's window.)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cancel_only_affects_its_week_date(pool: PgPool) {
    post_json(
        build_test_app(pool.clone()),
        "/schedules",
        recurring_body(1, "09:00", "10:00"),
    )
    .await;
    delete(build_test_app(pool.clone()), "/schedules/2025-10-06").await;

    // Next week's Monday is untouched.
    let week = body_json(get(build_test_app(pool), "/schedules?date=2025-10-13").await).await;
    assert_eq!(day_slots(&week, 1).len(), 1);
}

// ---------------------------------------------------------------------------
// Test: two overrides on one date both appear, nothing else
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_two_overrides_on_one_date(pool: PgPool) {
    post_json(
        build_test_app(pool.clone()),
        "/schedules",
        recurring_body(1, "09:00", "10:00"),
    )
    .await;
    post_json(
        build_test_app(pool.clone()),
        "/schedules/exceptions",
        exception_body("2025-10-06", "14:00", "15:00"),
    )
    .await;
    post_json(
        build_test_app(pool.clone()),
        "/schedules/exceptions",
        exception_body("2025-10-06", "16:00", "17:00"),
    )
    .await;

    let week = body_json(get(build_test_app(pool), "/schedules?date=2025-10-06").await).await;
    let monday = day_slots(&week, 1);
    assert_eq!(monday.len(), 2);
    assert!(monday.iter().all(|s| s["kind"] == "override"));
}

// ---------------------------------------------------------------------------
// Test: capacity violations surface as 409 CAPACITY_LIMIT
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_third_recurring_rule_is_409(pool: PgPool) {
    for _ in 0..2 {
        let response = post_json(
            build_test_app(pool.clone()),
            "/schedules",
            recurring_body(2, "09:00", "10:00"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = post_json(
        build_test_app(pool),
        "/schedules",
        recurring_body(2, "11:00", "12:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CAPACITY_LIMIT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_third_override_is_409(pool: PgPool) {
    for start in ["09:00", "11:00"] {
        let end = if start == "09:00" { "10:00" } else { "12:00" };
        let response = post_json(
            build_test_app(pool.clone()),
            "/schedules/exceptions",
            exception_body("2025-10-06", start, end),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = post_json(
        build_test_app(pool),
        "/schedules/exceptions",
        exception_body("2025-10-06", "13:00", "14:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CAPACITY_LIMIT");
}

// ---------------------------------------------------------------------------
// Test: exception update and delete round out the CRUD surface
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_exception_times(pool: PgPool) {
    let created = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/schedules/exceptions",
            exception_body("2025-10-06", "14:00", "15:00"),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/schedules/exceptions/{id}"),
        json!({ "start_time": "16:00", "end_time": "17:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["start_time"], "16:00:00");
    assert_eq!(updated["data"]["date"], "2025-10-06");

    let week = body_json(get(build_test_app(pool), "/schedules?date=2025-10-06").await).await;
    assert_eq!(day_slots(&week, 1)[0]["start_time"], "16:00:00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_exception_restores_recurring(pool: PgPool) {
    post_json(
        build_test_app(pool.clone()),
        "/schedules",
        recurring_body(1, "09:00", "10:00"),
    )
    .await;
    let created = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/schedules/exceptions",
            exception_body("2025-10-06", "14:00", "15:00"),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/schedules/exceptions/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // With the override gone the recurring slot is visible again.
    let week = body_json(get(build_test_app(pool), "/schedules?date=2025-10-06").await).await;
    let monday = day_slots(&week, 1);
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0]["kind"], "recurring");
}

// ---------------------------------------------------------------------------
// Test: missing ids surface as 404 NOT_FOUND
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_missing_exception_is_404(pool: PgPool) {
    let response = delete(build_test_app(pool), "/schedules/exceptions/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_exception_is_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        "/schedules/exceptions/9999",
        json!({ "start_time": "09:00", "end_time": "10:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
