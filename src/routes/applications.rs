use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::application_dto::{ApplyPayload, ApplyResponse, ReviewPayload, ReviewResponse},
    error::Result,
    extract::ApiJson,
    models::{application::ApplicationDetail, user::Principal},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/apply",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplyResponse>),
        (status = 400, description = "Duplicate application"),
        (status = 403, description = "Caller is not a candidate"),
        (status = 404, description = "Job not open, or CV not found")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<ApplyPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .apply(&principal, payload.job_id, payload.cv_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            application_id: application.id,
            status: application.status,
            message: "Application submitted".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/candidate/applications",
    responses(
        (status = 200, description = "The caller's applications", body = Json<Vec<ApplicationDetail>>),
        (status = 403, description = "Caller is not a candidate")
    )
)]
#[axum::debug_handler]
pub async fn list_candidate_applications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let items = state
        .application_service
        .list_for_candidate(&principal)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    put,
    path = "/api/application/{id}/review",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = ReviewPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<ReviewResponse>),
        (status = 400, description = "Status is not reviewed, accepted or rejected"),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Application or job not found")
    )
)]
#[axum::debug_handler]
pub async fn review_application(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ReviewPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .review(&principal, id, &payload.status)
        .await?;
    Ok(Json(ReviewResponse {
        message: format!("Application marked as {}", application.status),
        application,
    }))
}
