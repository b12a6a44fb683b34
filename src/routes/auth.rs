use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{
        LoginPayload, LoginResponse, RegisterCandidatePayload, RegisterEmployerPayload,
        RegisteredCandidateResponse, RegisteredEmployerResponse, UserResponse,
    },
    error::{Error, Result},
    extract::ApiJson,
    models::user::{Principal, UserRole},
    store::NewProfile,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register/candidate",
    request_body = RegisterCandidatePayload,
    responses(
        (status = 201, description = "Candidate registered", body = Json<RegisteredCandidateResponse>),
        (status = 400, description = "Invalid payload or username taken")
    )
)]
#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = payload.profile();
    let user = state
        .auth_service
        .register(
            &payload.username,
            &payload.password,
            UserRole::Candidate,
            NewProfile::Candidate(profile),
        )
        .await?;
    let candidate = state
        .store
        .find_candidate_by_user(user.id)
        .await?
        .ok_or_else(|| Error::Internal("candidate profile missing after registration".into()))?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredCandidateResponse {
            user: user.into(),
            candidate,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/register/employer",
    request_body = RegisterEmployerPayload,
    responses(
        (status = 201, description = "Employer registered", body = Json<RegisteredEmployerResponse>),
        (status = 400, description = "Invalid payload or username taken")
    )
)]
#[axum::debug_handler]
pub async fn register_employer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterEmployerPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = payload.profile();
    let user = state
        .auth_service
        .register(
            &payload.username,
            &payload.password,
            UserRole::Employer,
            NewProfile::Employer(profile),
        )
        .await?;
    let employer = state
        .store
        .find_employer_by_user(user.id)
        .await?
        .ok_or_else(|| Error::Internal("employer profile missing after registration".into()))?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredEmployerResponse {
            user: user.into(),
            employer,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Session issued", body = Json<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, issued) = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;
    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at,
        user: user.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = Json<UserResponse>),
        (status = 401, description = "Missing or invalid session")
    )
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let user = state.auth_service.current_user(&principal).await?;
    Ok(Json(UserResponse::from(user)))
}
