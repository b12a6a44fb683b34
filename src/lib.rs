pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    admin_service::AdminService, application_service::ApplicationService,
    auth_service::AuthService, cv_service::CvService, job_service::JobService,
    profile_service::ProfileService,
};
use crate::store::PortalStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn PortalStore>,
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub cv_service: CvService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub admin_service: AdminService,
}

impl AppState {
    pub fn new(store: Arc<dyn PortalStore>, config: Config) -> Self {
        let config = Arc::new(config);

        let auth_service = AuthService::new(store.clone(), config.clone());
        let profile_service = ProfileService::new(store.clone());
        let cv_service = CvService::new(store.clone());
        let job_service = JobService::new(store.clone(), config.clone());
        let application_service = ApplicationService::new(store.clone(), config.clone());
        let admin_service = AdminService::new(store.clone());

        Self {
            config,
            store,
            auth_service,
            profile_service,
            cv_service,
            job_service,
            application_service,
            admin_service,
        }
    }
}
