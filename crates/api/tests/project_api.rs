//! HTTP-level integration tests for projects, applications, and reviews.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, delete, get, patch_json, post_json, signup};
use sqlx::PgPool;

async fn apply(pool: &PgPool, project_id: i64, applicant: &str) -> axum::response::Response {
    let body = serde_json::json!({
        "project_id": project_id,
        "applicant_id": applicant,
        "applicant_date": "2030-05-01",
        "motivation": "I want to join",
    });
    post_json(common::build_test_app(pool.clone()), "/api/v1/applications/apply", body).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_projects(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "pw").await;
    let project_id = create_project(common::build_test_app(pool.clone()), "alice", "Search engine", 3).await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["project_id"], project_id);
    assert_eq!(json[0]["leader_name"], "Alice");
    assert_eq!(json[0]["skills"], serde_json::json!(["rust"]));
    assert_eq!(json[0]["members_count"], 1);

    let response = get(common::build_test_app(pool), &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["topic"], "Search engine");
    assert_eq!(json["can_apply"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_details_missing_is_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/projects/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_update_is_leader_only(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "pw").await;
    signup(common::build_test_app(pool.clone()), "mallory", "Mallory", "pw").await;
    let project_id = create_project(common::build_test_app(pool.clone()), "alice", "Guarded", 3).await;

    let body = serde_json::json!({ "new_status": "Completed", "leader_id": "mallory" });
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/status"),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PERMISSION_DENIED");

    let body = serde_json::json!({ "new_status": "Completed", "leader_id": "alice" });
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/status"),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/projects/{project_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "Completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_application_flow_over_http(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "pw").await;
    signup(common::build_test_app(pool.clone()), "bob", "Bob", "pw").await;
    let project_id = create_project(common::build_test_app(pool.clone()), "alice", "Open", 3).await;

    let response = apply(&pool, project_id, "bob").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "Pending");

    // A second application by the same student conflicts.
    let response = apply(&pool, project_id, "bob").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Only the leader may read the roster.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/applications?current_user_id=bob"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/applications?current_user_id=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["applicant_id"], "bob");

    // Accept and observe the member count rise.
    let body = serde_json::json!({ "new_status": "Accepted", "leader_id": "alice" });
    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/applications/{project_id}/bob/status"),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/projects/{project_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["members_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_project_is_leader_only(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "pw").await;
    signup(common::build_test_app(pool.clone()), "mallory", "Mallory", "pw").await;
    let project_id = create_project(common::build_test_app(pool.clone()), "alice", "Doomed", 3).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}?current_user_id=mallory"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}?current_user_id=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_requires_completed_project(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "pw").await;
    signup(common::build_test_app(pool.clone()), "bob", "Bob", "pw").await;
    let project_id = create_project(common::build_test_app(pool.clone()), "alice", "Reviewed", 3).await;

    let review = serde_json::json!({
        "project_id": project_id,
        "reviewer_id": "alice",
        "reviewee_id": "bob",
        "score": 5,
        "comment": "great teammate",
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/reviews", review.clone()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_OPERATION");

    let body = serde_json::json!({ "new_status": "Completed", "leader_id": "alice" });
    patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/status"),
        body,
    )
    .await;

    let response = post_json(common::build_test_app(pool), "/api/v1/reviews", review).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["score"], 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_payloads_are_rejected(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "pw").await;

    // capacity below 1 fails validation.
    let body = serde_json::json!({
        "leader_id": "alice",
        "topic": "Bad",
        "description1": "d1",
        "description2": "d2",
        "capacity": 0,
        "deadline": "2030-06-01",
        "skills": [],
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/projects", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // score outside 1..=5 fails validation.
    let review = serde_json::json!({
        "project_id": 1,
        "reviewer_id": "alice",
        "reviewee_id": "bob",
        "score": 6,
        "comment": "",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/reviews", review).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
