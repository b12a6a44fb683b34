use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::profile_dto::{ProfileDetails, ProfileResponse, UpdateProfilePayload},
    error::Result,
    extract::ApiJson,
    models::user::Principal,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "The caller and their profile", body = Json<ProfileResponse>),
        (status = 401, description = "Missing or invalid session")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse> {
    let (user, profile) = state.profile_service.get(&principal).await?;
    Ok(Json(ProfileResponse {
        user: user.into(),
        profile,
    }))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile saved", body = Json<ProfileDetails>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Role has no profile")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state.profile_service.update(&principal, payload).await?;
    Ok(Json(profile))
}
