//! Persistence boundary. Services talk to a [`PortalStore`]; production uses
//! [`PgStore`], development and the test suite use [`MemoryStore`].
//!
//! Implementations own the integrity rules the workflow depends on:
//! unique usernames, one application per `(job, candidate)`, one profile per
//! user, and the delete cascades. Violations surface as `Error::Conflict`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    application::{Application, ApplicationDetail, ApplicationStatus, NewApplication},
    candidate::{Candidate, CandidateFields},
    cv::{Cv, CvFields},
    employer::{Employer, EmployerFields},
    job::{Job, JobFields, JobListing, JobSearch, JobStatus},
    user::{User, UserRole},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub const DUPLICATE_APPLICATION: &str = "duplicate application";
pub const DUPLICATE_USERNAME: &str = "username already exists";
pub const CV_IN_USE: &str = "CV is attached to an application and cannot be deleted";

/// Role-specific profile created together with its user.
#[derive(Debug, Clone)]
pub enum NewProfile {
    Candidate(CandidateFields),
    Employer(EmployerFields),
    None,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile: NewProfile,
}

#[async_trait]
pub trait PortalStore: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Inserts the user and its profile atomically.
    async fn create_account(&self, account: NewAccount) -> Result<User>;
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn set_user_active(&self, id: i64, active: bool) -> Result<Option<User>>;
    /// Removes the user with its profile and everything the profile owns.
    async fn delete_user(&self, id: i64) -> Result<bool>;

    async fn find_candidate_by_user(&self, user_id: i64) -> Result<Option<Candidate>>;
    async fn find_employer_by_user(&self, user_id: i64) -> Result<Option<Employer>>;
    async fn upsert_candidate(&self, user_id: i64, fields: CandidateFields) -> Result<Candidate>;
    async fn upsert_employer(&self, user_id: i64, fields: EmployerFields) -> Result<Employer>;

    async fn list_cvs(&self, candidate_id: i64) -> Result<Vec<Cv>>;
    async fn find_cv(&self, id: i64) -> Result<Option<Cv>>;
    async fn insert_cv(&self, candidate_id: i64, fields: CvFields) -> Result<Cv>;
    async fn update_cv(&self, id: i64, fields: CvFields) -> Result<Option<Cv>>;
    async fn delete_cv(&self, id: i64) -> Result<bool>;

    async fn insert_job(&self, employer_id: i64, fields: JobFields, status: JobStatus)
        -> Result<Job>;
    async fn find_job(&self, id: i64) -> Result<Option<Job>>;
    async fn find_job_listing(&self, id: i64) -> Result<Option<JobListing>>;
    async fn update_job(&self, id: i64, fields: JobFields) -> Result<Option<Job>>;
    async fn set_job_status(&self, id: i64, status: JobStatus) -> Result<Option<Job>>;
    /// Removes the job's applications, then the job, in one transaction.
    async fn delete_job(&self, id: i64) -> Result<bool>;
    /// Returns one page of matches and the total match count.
    async fn search_jobs(&self, search: JobSearch) -> Result<(Vec<JobListing>, i64)>;
    async fn list_jobs_for_employer(&self, employer_id: i64) -> Result<Vec<Job>>;

    async fn find_application(&self, id: i64) -> Result<Option<Application>>;
    async fn find_application_for(
        &self,
        job_id: i64,
        candidate_id: i64,
    ) -> Result<Option<Application>>;
    /// Fails with `Error::Conflict(DUPLICATE_APPLICATION)` when the pair exists.
    async fn insert_application(&self, application: NewApplication) -> Result<Application>;
    async fn set_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>>;
    async fn list_applications_for_candidate(
        &self,
        candidate_id: i64,
    ) -> Result<Vec<ApplicationDetail>>;
    async fn list_applications_for_job(&self, job_id: i64) -> Result<Vec<ApplicationDetail>>;
}
