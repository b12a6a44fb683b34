use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::error::Result;
use crate::models::job::{Job, JobFields, JobListing, JobStatus};
use crate::utils::salary::normalize_salary;
use crate::utils::validation::{clean_optional, required};

/// Body for creating or editing a job. `salary` may be a number or a
/// formatted string such as `"15,000,000"`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub requirements: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub salary: Option<JsonValue>,
}

impl JobPayload {
    pub fn into_fields(self) -> Result<JobFields> {
        let salary = match &self.salary {
            Some(JsonValue::String(raw)) => normalize_salary(raw),
            Some(JsonValue::Number(n)) => normalize_salary(&n.to_string()),
            _ => None,
        };
        Ok(JobFields {
            title: required(&self.title, "title")?,
            description: required(&self.description, "description")?,
            requirements: clean_optional(self.requirements),
            location: clean_optional(self.location),
            salary,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: i64,
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub salary: Option<Decimal>,
    pub status: JobStatus,
    pub posted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            employer_id: value.employer_id,
            title: value.title,
            description: value.description,
            requirements: value.requirements,
            location: value.location,
            salary: value.salary,
            status: value.status,
            posted_at: value.posted_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreatedResponse {
    pub id: i64,
    pub title: String,
    pub status: JobStatus,
}

impl From<Job> for JobCreatedResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            status: value.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListingResponse {
    #[serde(flatten)]
    pub job: JobResponse,
    pub company_name: String,
}

impl From<JobListing> for JobListingResponse {
    fn from(value: JobListing) -> Self {
        Self {
            job: value.job.into(),
            company_name: value.company_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobSearchQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPageResponse {
    pub items: Vec<JobListingResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}
