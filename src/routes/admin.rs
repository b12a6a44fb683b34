use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::{admin_dto::UpdateUserStatusPayload, auth_dto::UserResponse, job_dto::JobListingResponse},
    error::Result,
    extract::ApiJson,
    models::user::Principal,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users", body = Json<Vec<UserResponse>>),
        (status = 403, description = "Caller is not an administrator")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let users = state.admin_service.list_users(&principal).await?;
    let items: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusPayload,
    responses(
        (status = 200, description = "User updated", body = Json<UserResponse>),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn update_user_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateUserStatusPayload>,
) -> Result<impl IntoResponse> {
    let user = state
        .admin_service
        .set_user_active(&principal, id, payload.is_active)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User and owned records deleted"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.admin_service.delete_user(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/jobs",
    responses(
        (status = 200, description = "All jobs in any status", body = Json<Vec<JobListingResponse>>),
        (status = 403, description = "Caller is not an administrator")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.admin_list(&principal).await?;
    let items: Vec<JobListingResponse> = jobs.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    delete,
    path = "/api/admin/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job and its applications deleted"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.job_service.admin_delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
