//! HTTP-level integration tests for registration, login and the user list.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, get, get_auth, post_json, post_raw, register};
use projecthub_api::error::AppError;
use projecthub_api::handlers::auth::registration_error;
use projecthub_core::error::CoreError;
use projecthub_db::models::user::CreateUser;
use projecthub_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_token_and_summary(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Ada",
        "email": "ada@test.com",
        "password": "analytical",
        "profilePicUrl": "https://img.test/ada.png",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["name"], "Ada");
    assert_eq!(json["user"]["email"], "ada@test.com");
    assert_eq!(json["user"]["profilePictureUrl"], "https://img.test/ada.png");
    assert!(json["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(&app, "dup").await;

    let body = json!({ "name": "Other", "email": "dup@test.com", "password": "secret-password" });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "User already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_duplicate_insert_maps_to_user_exists(pool: PgPool) {
    let input = CreateUser {
        name: "Race".to_string(),
        email: "race@test.com".to_string(),
        password_hash: "not-a-real-hash".to_string(),
        profile_picture_url: None,
    };
    UserRepo::create(&pool, &input).await.unwrap();

    // The second insert models the loser of a register race that passed the
    // existence check before the winner committed.
    let err = UserRepo::create(&pool, &input).await.unwrap_err();
    let mapped = registration_error(err);
    assert_matches!(
        &mapped,
        AppError::Core(CoreError::Validation(msg)) if msg == "User already exists"
    );

    let response = mapped.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_bodies_are_validation_errors(pool: PgPool) {
    let app = common::build_test_app(pool);

    let missing_name = json!({ "email": "a@test.com", "password": "secret-password" });
    let response = post_json(app.clone(), "/api/auth/register", missing_name).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("name"));

    let wrong_type = json!({ "email": "a@test.com", "password": 123456 });
    let response = post_json(app.clone(), "/api/auth/login", wrong_type).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_raw(app.clone(), "/api/auth/login", "application/json", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_raw(app, "/api/auth/login", "text/plain", "hello").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let short = json!({ "name": "A", "email": "a@test.com", "password": "12345" });
    let response = post_json(app.clone(), "/api/auth/register", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_email = json!({ "name": "A", "email": "not-an-email", "password": "123456" });
    let response = post_json(app, "/api/auth/register", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_succeeds_with_correct_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "grace").await;

    let body = json!({ "email": "grace@test.com", "password": "secret-password" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_failures_share_one_message(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(&app, "linus").await;

    let wrong_password = json!({ "email": "linus@test.com", "password": "nope-nope" });
    let response = post_json(app.clone(), "/api/auth/login", wrong_password).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let first = body_json(response).await;

    let unknown_email = json!({ "email": "ghost@test.com", "password": "secret-password" });
    let response = post_json(app, "/api/auth/login", unknown_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let second = body_json(response).await;

    assert_eq!(first["error"], "Invalid credentials");
    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_list_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(&app, "ken").await;
    register(&app, "dennis").await;

    let response = get(app.clone(), "/api/auth/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.clone(), "/api/auth/users", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/auth/users", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_for_deleted_user_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let user = register(&app, "temp").await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = get_auth(app, "/api/auth/users", &user.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
