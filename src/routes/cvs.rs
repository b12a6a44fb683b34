use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::cv_dto::{CvPayload, CvResponse},
    error::Result,
    extract::ApiJson,
    models::user::Principal,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/cvs",
    responses(
        (status = 200, description = "The caller's CVs", body = Json<Vec<CvResponse>>),
        (status = 403, description = "Caller is not a candidate")
    )
)]
#[axum::debug_handler]
pub async fn list_cvs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let cvs = state.cv_service.list(&principal).await?;
    let items: Vec<CvResponse> = cvs.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/cvs",
    request_body = CvPayload,
    responses(
        (status = 201, description = "CV created", body = Json<CvResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not a candidate")
    )
)]
#[axum::debug_handler]
pub async fn create_cv(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<CvPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let cv = state
        .cv_service
        .create(&principal, payload.into_fields()?)
        .await?;
    Ok((StatusCode::CREATED, Json(CvResponse::from(cv))))
}

#[utoipa::path(
    get,
    path = "/api/cvs/{id}",
    params(
        ("id" = i64, Path, description = "CV ID")
    ),
    responses(
        (status = 200, description = "CV found", body = Json<CvResponse>),
        (status = 404, description = "CV not found")
    )
)]
#[axum::debug_handler]
pub async fn get_cv(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let cv = state.cv_service.get(&principal, id).await?;
    Ok(Json(CvResponse::from(cv)))
}

#[utoipa::path(
    put,
    path = "/api/cvs/{id}",
    params(
        ("id" = i64, Path, description = "CV ID")
    ),
    request_body = CvPayload,
    responses(
        (status = 200, description = "CV updated", body = Json<CvResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "CV not found")
    )
)]
#[axum::debug_handler]
pub async fn update_cv(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<CvPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let cv = state
        .cv_service
        .update(&principal, id, payload.into_fields()?)
        .await?;
    Ok(Json(CvResponse::from(cv)))
}

#[utoipa::path(
    delete,
    path = "/api/cvs/{id}",
    params(
        ("id" = i64, Path, description = "CV ID")
    ),
    responses(
        (status = 204, description = "CV deleted"),
        (status = 400, description = "CV is attached to an application"),
        (status = 404, description = "CV not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_cv(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.cv_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
