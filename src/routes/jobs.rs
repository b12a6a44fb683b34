use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::job_dto::{
        JobCreatedResponse, JobListingResponse, JobPageResponse, JobPayload, JobResponse,
        JobSearchQuery,
    },
    error::Result,
    extract::ApiJson,
    models::{application::ApplicationDetail, user::Principal},
    services::job_service::JobOrigin,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("keyword" = Option<String>, Query, description = "Case-insensitive title filter"),
        ("location" = Option<String>, Query, description = "Case-insensitive location filter"),
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "Page of active jobs", body = Json<JobPageResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_public_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .job_service
        .search_public(query.keyword, query.location, query.page)
        .await?;
    Ok(Json(JobPageResponse {
        items: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        total_pages: page.total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Active job", body = Json<JobListingResponse>),
        (status = 404, description = "Job not found or not active")
    )
)]
#[axum::debug_handler]
pub async fn get_public_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let listing = state.job_service.get_public(id).await?;
    Ok(Json(JobListingResponse::from(listing)))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = JobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobCreatedResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not an employer")
    )
)]
#[axum::debug_handler]
pub async fn create_job_api(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<JobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state
        .job_service
        .create(&principal, payload.into_fields()?, JobOrigin::Api)
        .await?;
    Ok((StatusCode::CREATED, Json(JobCreatedResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/employer/jobs",
    responses(
        (status = 200, description = "The caller's jobs in any status", body = Json<Vec<JobResponse>>),
        (status = 403, description = "Caller is not an employer")
    )
)]
#[axum::debug_handler]
pub async fn list_employer_jobs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_owned(&principal).await?;
    let items: Vec<JobResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/employer/jobs",
    request_body = JobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not an employer")
    )
)]
#[axum::debug_handler]
pub async fn create_employer_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<JobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state
        .job_service
        .create(&principal, payload.into_fields()?, JobOrigin::Dashboard)
        .await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/employer/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 403, description = "Job belongs to another employer"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_employer_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_owned(&principal, id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    put,
    path = "/api/employer/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = JobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Job belongs to another employer"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_employer_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<JobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state
        .job_service
        .update(&principal, id, payload.into_fields()?)
        .await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/employer/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job and its applications deleted"),
        (status = 403, description = "Job belongs to another employer"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_employer_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/employer/jobs/{id}/toggle",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Status toggled", body = Json<JobResponse>),
        (status = 403, description = "Job belongs to another employer"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_employer_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.toggle(&principal, id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    get,
    path = "/api/employer/jobs/{id}/applications",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications for the job", body = Json<Vec<ApplicationDetail>>),
        (status = 403, description = "Job belongs to another employer"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn list_job_applications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let items = state
        .application_service
        .list_for_job(&principal, id)
        .await?;
    Ok(Json(items))
}
