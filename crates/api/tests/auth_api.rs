//! HTTP-level integration tests for signup, login, and profiles.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json, signup};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_and_login(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "s3cret").await;

    let body = serde_json::json!({ "uid": "alice", "password": "s3cret" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["uid"], "alice");
    assert_eq!(json["name"], "Alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_duplicate_uid_conflicts(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "s3cret").await;

    let body = serde_json::json!({ "uid": "alice", "name": "Imposter", "password": "x" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "s3cret").await;

    let body = serde_json::json!({ "uid": "alice", "password": "wrong" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_uid(pool: PgPool) {
    let body = serde_json::json!({ "uid": "ghost", "password": "whatever" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_roundtrip(pool: PgPool) {
    signup(common::build_test_app(pool.clone()), "alice", "Alice", "s3cret").await;

    let body = serde_json::json!({
        "name": "Alice B.",
        "email": "alice@example.com",
        "profile_text": null,
        "website_link": null,
        "skills": ["Java", "java", "Rust"],
    });
    let response = put_json(common::build_test_app(pool.clone()), "/api/v1/profile/alice", body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), "/api/v1/profile/alice").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Alice B.");
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["skills"], serde_json::json!(["java", "rust"]));

    let response = get(common::build_test_app(pool), "/api/v1/profile/ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_db(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
