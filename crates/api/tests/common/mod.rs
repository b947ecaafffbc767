//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use projecthub_api::auth::jwt::JwtConfig;
use projecthub_api::config::ServerConfig;
use projecthub_api::router::build_app_router;
use projecthub_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            token_expiry_days: 7,
        },
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// POST a raw body with an explicit content type, bypassing JSON encoding.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A registered user and a token for them.
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Register `name` through the API (email `{name}@test.com`).
pub async fn register(app: &Router, name: &str) -> TestUser {
    let body = json!({
        "name": name,
        "email": format!("{name}@test.com"),
        "password": "secret-password",
    });
    let response = post_json(app.clone(), "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "registration of {name} should succeed");
    let json = body_json(response).await;
    TestUser {
        id: json["user"]["id"].as_i64().unwrap(),
        token: json["token"].as_str().unwrap().to_string(),
    }
}

/// Create a project owned by `owner` with the given extra member ids.
pub async fn create_project(app: &Router, owner: &TestUser, member_ids: &[i64]) -> Value {
    let body = json!({
        "name": "Apollo",
        "description": "Moon shot",
        "startDate": 1_735_689_600_000_i64,
        "endDate": "2025-06-30",
        "memberIds": member_ids,
    });
    let response = post_json_auth(app.clone(), "/api/projects", body, &owner.token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "project creation should succeed");
    body_json(response).await
}

/// Create a task in `project_id` assigned to `assignee`, as `caller`.
pub async fn create_task(
    app: &Router,
    caller: &TestUser,
    project_id: i64,
    assignee: i64,
) -> Value {
    let body = json!({
        "title": "Write docs",
        "description": "All of them",
        "dueDate": "2025-02-01T12:00:00Z",
        "assignedToId": assignee,
    });
    let uri = format!("/api/projects/{project_id}/tasks");
    let response = post_json_auth(app.clone(), &uri, body, &caller.token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "task creation should succeed");
    body_json(response).await
}

/// Fetch a project as `caller`, asserting success.
pub async fn fetch_project(app: &Router, caller: &TestUser, project_id: i64) -> Value {
    let uri = format!("/api/projects/{project_id}");
    let response = get_auth(app.clone(), &uri, &caller.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Ids of the `members` array of a project response, in order.
pub fn member_ids(project: &Value) -> Vec<i64> {
    project["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}
