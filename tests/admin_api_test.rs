mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    app, create_dashboard_job, login, register_candidate, register_employer, send, toggle_job,
    ADMIN_PASSWORD, ADMIN_USERNAME,
};

#[tokio::test]
async fn admin_lists_users_and_other_roles_cannot() {
    let app = app().await;
    register_candidate(&app, "a1", "pw1").await;
    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let candidate = login(&app, "a1", "pw1").await;

    let (status, body) = send(&app, Method::GET, "/api/admin/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let usernames: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|u| u["username"].as_str())
        .collect();
    assert!(usernames.contains(&"a1"));
    assert!(usernames.contains(&ADMIN_USERNAME));

    let (status, _) = send(&app, Method::GET, "/api/admin/users", Some(&candidate), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deactivated_users_lose_their_session() {
    let app = app().await;
    let registered = register_candidate(&app, "a1", "pw1").await;
    let user_id = registered["user"]["id"].as_i64().expect("user id");
    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let candidate = login(&app, "a1", "pw1").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/admin/users/{}", user_id),
        Some(&admin),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some(&candidate), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "a1", "password": "pw1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(
        &app,
        Method::PATCH,
        &format!("/api/admin/users/{}", user_id),
        Some(&admin),
        Some(json!({ "is_active": true })),
    )
    .await;
    login(&app, "a1", "pw1").await;
}

#[tokio::test]
async fn deleting_an_employer_removes_their_jobs() {
    let app = app().await;
    let registered = register_employer(&app, "e1", "pw2").await;
    let user_id = registered["user"]["id"].as_i64().expect("user id");
    let employer = login(&app, "e1", "pw2").await;
    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let job_id = create_dashboard_job(&app, &employer, "Backend Dev").await;
    toggle_job(&app, &employer, job_id).await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/admin/users/{}", user_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/jobs/{}", job_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some(&employer), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_sees_and_deletes_jobs_in_any_status() {
    let app = app().await;
    register_employer(&app, "e1", "pw2").await;
    let employer = login(&app, "e1", "pw2").await;
    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let pending = create_dashboard_job(&app, &employer, "Pending role").await;

    let (status, body) = send(&app, Method::GET, "/api/admin/jobs", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["status"], "pending");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/admin/jobs/{}", pending),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/admin/jobs/{}", pending),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/admin/jobs", Some(&employer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_have_no_profile_to_edit() {
    let app = app().await;
    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    let (status, body) = send(&app, Method::GET, "/api/profile", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["kind"], "none");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&admin),
        Some(json!({ "full_name": "Root" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
