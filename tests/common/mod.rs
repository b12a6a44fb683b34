#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jobportal_backend::{config::Config, routes::build_router, store::MemoryStore, AppState};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "root";
pub const ADMIN_PASSWORD: &str = "root-pass";

pub fn test_config() -> Config {
    let mut config = Config::with_secret("integration-test-secret");
    config.public_rps = 1_000;
    config.admin_username = Some(ADMIN_USERNAME.to_string());
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    config
}

pub async fn app_with(config: Config) -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), config);
    state
        .auth_service
        .ensure_admin()
        .await
        .expect("bootstrap admin");
    build_router(state)
}

pub async fn app() -> Router {
    app_with(test_config()).await
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

pub async fn register_candidate(app: &Router, username: &str, password: &str) -> JsonValue {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register/candidate",
        None,
        Some(json!({
            "username": username,
            "password": password,
            "full_name": format!("{} Candidate", username),
            "email": format!("{}@example.com", username),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register candidate: {}", body);
    body
}

pub async fn register_employer(app: &Router, username: &str, password: &str) -> JsonValue {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register/employer",
        None,
        Some(json!({
            "username": username,
            "password": password,
            "company_name": format!("{} Ltd", username),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register employer: {}", body);
    body
}

pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login: {}", body);
    body["token"].as_str().expect("token").to_string()
}

/// Creates a job from the employer dashboard and returns its id.
pub async fn create_dashboard_job(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/employer/jobs",
        Some(token),
        Some(json!({ "title": title, "description": "desc" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create job: {}", body);
    body["id"].as_i64().expect("job id")
}

pub async fn toggle_job(app: &Router, token: &str, job_id: i64) -> JsonValue {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/employer/jobs/{}/toggle", job_id),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "toggle job: {}", body);
    body
}

pub async fn create_cv(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/cvs",
        Some(token),
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create cv: {}", body);
    body["id"].as_i64().expect("cv id")
}
