use serde::{Deserialize, Serialize};

use crate::models::application::{Application, ApplicationStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPayload {
    pub job_id: i64,
    pub cv_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub application_id: i64,
    pub status: ApplicationStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub message: String,
    pub application: Application,
}
