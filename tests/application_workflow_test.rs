mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    app, app_with, create_cv, create_dashboard_job, login, register_candidate,
    register_employer, send, test_config, toggle_job,
};

#[tokio::test]
async fn hiring_flow_end_to_end() {
    let app = app().await;
    register_candidate(&app, "a1", "pw1").await;
    register_employer(&app, "e1", "pw2").await;
    let candidate = login(&app, "a1", "pw1").await;
    let employer = login(&app, "e1", "pw2").await;

    let job_id = create_dashboard_job(&app, &employer, "Backend Dev").await;
    let (_, job) = send(
        &app,
        Method::GET,
        &format!("/api/employer/jobs/{}", job_id),
        Some(&employer),
        None,
    )
    .await;
    assert_eq!(job["status"], "pending");

    let cv_id = create_cv(&app, &candidate, "My CV").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": job_id, "cv_id": cv_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found or not accepting applications");

    let toggled = toggle_job(&app, &employer, job_id).await;
    assert_eq!(toggled["status"], "active");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": job_id, "cv_id": cv_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["status"], "pending");
    let application_id = body["application_id"].as_i64().expect("application id");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/application/{}/review", application_id),
        Some(&employer),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["application"]["status"], "accepted");

    let (status, list) = send(
        &app,
        Method::GET,
        "/api/candidate/applications",
        Some(&candidate),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["status"], "accepted");
    assert_eq!(items[0]["job_title"], "Backend Dev");
    assert_eq!(items[0]["company_name"], "e1 Ltd");
}

#[tokio::test]
async fn second_application_to_the_same_job_is_rejected() {
    let app = app().await;
    register_candidate(&app, "a1", "pw1").await;
    register_employer(&app, "e1", "pw2").await;
    let candidate = login(&app, "a1", "pw1").await;
    let employer = login(&app, "e1", "pw2").await;

    let job_id = create_dashboard_job(&app, &employer, "Backend Dev").await;
    toggle_job(&app, &employer, job_id).await;
    let cv_id = create_cv(&app, &candidate, "My CV").await;
    let other_cv = create_cv(&app, &candidate, "Other CV").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": job_id, "cv_id": cv_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": job_id, "cv_id": other_cv })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate application");

    let (_, list) = send(
        &app,
        Method::GET,
        &format!("/api/employer/jobs/{}/applications", job_id),
        Some(&employer),
        None,
    )
    .await;
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["cv_title"], "My CV");
    assert_eq!(items[0]["candidate_name"], "a1 Candidate");
}

#[tokio::test]
async fn inactive_job_does_not_accept_applications() {
    let app = app().await;
    register_candidate(&app, "a1", "pw1").await;
    register_employer(&app, "e1", "pw2").await;
    let candidate = login(&app, "a1", "pw1").await;
    let employer = login(&app, "e1", "pw2").await;

    let job_id = create_dashboard_job(&app, &employer, "Backend Dev").await;
    toggle_job(&app, &employer, job_id).await;
    let deactivated = toggle_job(&app, &employer, job_id).await;
    assert_eq!(deactivated["status"], "inactive");
    let cv_id = create_cv(&app, &candidate, "My CV").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": job_id, "cv_id": cv_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": 9_999, "cv_id": cv_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn incomplete_apply_body_is_a_bad_request() {
    let app = app().await;
    register_candidate(&app, "a1", "pw1").await;
    let candidate = login(&app, "a1", "pw1").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.contains("cv_id"), "unexpected error body: {body}");
}

#[tokio::test]
async fn only_the_owning_employer_can_review() {
    let app = app().await;
    register_candidate(&app, "a1", "pw1").await;
    register_employer(&app, "e1", "pw2").await;
    register_employer(&app, "e2", "pw3").await;
    let candidate = login(&app, "a1", "pw1").await;
    let owner = login(&app, "e1", "pw2").await;
    let stranger = login(&app, "e2", "pw3").await;

    let job_id = create_dashboard_job(&app, &owner, "Backend Dev").await;
    toggle_job(&app, &owner, job_id).await;
    let cv_id = create_cv(&app, &candidate, "My CV").await;
    let (_, applied) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": job_id, "cv_id": cv_id })),
    )
    .await;
    let application_id = applied["application_id"].as_i64().expect("application id");
    let review_uri = format!("/api/application/{}/review", application_id);

    let (status, _) = send(
        &app,
        Method::PUT,
        &review_uri,
        Some(&stranger),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::PUT,
        &review_uri,
        Some(&candidate),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/application/9999/review",
        Some(&owner),
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(
        &app,
        Method::GET,
        "/api/candidate/applications",
        Some(&candidate),
        None,
    )
    .await;
    assert_eq!(list[0]["status"], "pending");
}

#[tokio::test]
async fn invalid_review_status_leaves_the_application_unchanged() {
    let app = app().await;
    register_candidate(&app, "a1", "pw1").await;
    register_employer(&app, "e1", "pw2").await;
    let candidate = login(&app, "a1", "pw1").await;
    let employer = login(&app, "e1", "pw2").await;

    let job_id = create_dashboard_job(&app, &employer, "Backend Dev").await;
    toggle_job(&app, &employer, job_id).await;
    let cv_id = create_cv(&app, &candidate, "My CV").await;
    let (_, applied) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&candidate),
        Some(json!({ "job_id": job_id, "cv_id": cv_id })),
    )
    .await;
    let application_id = applied["application_id"].as_i64().expect("application id");

    for status_value in ["hired", "pending", ""] {
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/application/{}/review", application_id),
            Some(&employer),
            Some(json!({ "status": status_value })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "status {:?}", status_value);
    }

    let (_, list) = send(
        &app,
        Method::GET,
        &format!("/api/employer/jobs/{}/applications", job_id),
        Some(&employer),
        None,
    )
    .await;
    assert_eq!(list[0]["status"], "pending");
}

#[tokio::test]
async fn foreign_cv_follows_the_ownership_setting() {
    let mut strict = test_config();
    strict.strict_cv_ownership = true;

    for (config, expected) in [
        (test_config(), StatusCode::CREATED),
        (strict, StatusCode::NOT_FOUND),
    ] {
        let app = app_with(config).await;
        register_candidate(&app, "a1", "pw1").await;
        register_candidate(&app, "a2", "pw1").await;
        register_employer(&app, "e1", "pw2").await;
        let first = login(&app, "a1", "pw1").await;
        let second = login(&app, "a2", "pw1").await;
        let employer = login(&app, "e1", "pw2").await;

        let job_id = create_dashboard_job(&app, &employer, "Backend Dev").await;
        toggle_job(&app, &employer, job_id).await;
        let foreign_cv = create_cv(&app, &first, "Not yours").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/apply",
            Some(&second),
            Some(json!({ "job_id": job_id, "cv_id": foreign_cv })),
        )
        .await;
        assert_eq!(status, expected);
    }
}

#[tokio::test]
async fn employers_cannot_apply() {
    let app = app().await;
    register_employer(&app, "e1", "pw2").await;
    let employer = login(&app, "e1", "pw2").await;
    let job_id = create_dashboard_job(&app, &employer, "Backend Dev").await;
    toggle_job(&app, &employer, job_id).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/apply",
        Some(&employer),
        Some(json!({ "job_id": job_id, "cv_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
