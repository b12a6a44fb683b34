pub mod admin;
pub mod applications;
pub mod auth;
pub mod cvs;
pub mod health;
pub mod jobs;
pub mod profile;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::middleware::{auth::require_session, rate_limit};
use crate::AppState;

/// Assembles every route. Public job browsing sits behind the rate limiter,
/// everything under a session behind `require_session`.
pub fn build_router(state: AppState) -> Router {
    let base_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register/candidate", post(auth::register_candidate))
        .route("/api/auth/register/employer", post(auth::register_employer))
        .route("/api/auth/login", post(auth::login));

    let public_api = Router::new()
        .route("/api/jobs", get(jobs::list_public_jobs))
        .route("/api/jobs/:id", get(jobs::get_public_job))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(state.config.public_rps),
            rate_limit::rps_middleware,
        ));

    let session_api = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/jobs", post(jobs::create_job_api))
        .route(
            "/api/employer/jobs",
            get(jobs::list_employer_jobs).post(jobs::create_employer_job),
        )
        .route(
            "/api/employer/jobs/:id",
            get(jobs::get_employer_job)
                .put(jobs::update_employer_job)
                .delete(jobs::delete_employer_job),
        )
        .route("/api/employer/jobs/:id/toggle", post(jobs::toggle_employer_job))
        .route(
            "/api/employer/jobs/:id/applications",
            get(jobs::list_job_applications),
        )
        .route("/api/apply", post(applications::apply))
        .route(
            "/api/candidate/applications",
            get(applications::list_candidate_applications),
        )
        .route(
            "/api/application/:id/review",
            put(applications::review_application),
        )
        .route("/api/cvs", get(cvs::list_cvs).post(cvs::create_cv))
        .route(
            "/api/cvs/:id",
            get(cvs::get_cv).put(cvs::update_cv).delete(cvs::delete_cv),
        )
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/admin/users", get(admin::list_users))
        .route(
            "/api/admin/users/:id",
            axum::routing::patch(admin::update_user_status).delete(admin::delete_user),
        )
        .route("/api/admin/jobs", get(admin::list_jobs))
        .route("/api/admin/jobs/:id", axum::routing::delete(admin::delete_job))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    base_routes
        .merge(public_api)
        .merge(session_api)
        .with_state(state)
}
