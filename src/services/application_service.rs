use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationDetail, ApplicationStatus, NewApplication,
};
use crate::models::user::{Capability, Principal};
use crate::store::{PortalStore, DUPLICATE_APPLICATION};

const JOB_NOT_OPEN: &str = "Job not found or not accepting applications";

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn PortalStore>,
    config: Arc<Config>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn PortalStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    pub async fn apply(&self, principal: &Principal, job_id: i64, cv_id: i64) -> Result<Application> {
        principal.require(Capability::ApplyToJobs)?;
        let candidate = self
            .store
            .find_candidate_by_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate profile not found".to_string()))?;

        match self.store.find_job(job_id).await? {
            Some(job) if job.status.accepts_applications() => {}
            _ => return Err(Error::NotFound(JOB_NOT_OPEN.to_string())),
        }

        let cv = self
            .store
            .find_cv(cv_id)
            .await?
            .ok_or_else(|| Error::NotFound("CV not found".to_string()))?;
        if cv.candidate_id != candidate.id {
            if self.config.strict_cv_ownership {
                return Err(Error::NotFound("CV not found".to_string()));
            }
            tracing::warn!(
                cv_id,
                owner_id = cv.candidate_id,
                candidate_id = candidate.id,
                "Applying with a CV owned by another candidate"
            );
        }

        if self
            .store
            .find_application_for(job_id, candidate.id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(DUPLICATE_APPLICATION.to_string()));
        }

        let application = self
            .store
            .insert_application(NewApplication {
                job_id,
                candidate_id: candidate.id,
                cv_id,
            })
            .await?;
        tracing::info!(
            application_id = application.id,
            job_id,
            candidate_id = candidate.id,
            "Application submitted"
        );
        Ok(application)
    }

    /// Sets the review status. Checks run before any write, so a rejected
    /// request leaves the stored status untouched.
    pub async fn review(
        &self,
        principal: &Principal,
        application_id: i64,
        raw_status: &str,
    ) -> Result<Application> {
        principal.require(Capability::ReviewApplications)?;
        let status = ApplicationStatus::parse_review(raw_status).ok_or_else(|| {
            Error::BadRequest(format!(
                "invalid status '{}': expected reviewed, accepted or rejected",
                raw_status.trim()
            ))
        })?;

        let application = self
            .store
            .find_application(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        let job = self
            .store
            .find_job(application.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        let owns_job = self
            .store
            .find_employer_by_user(principal.user_id)
            .await?
            .is_some_and(|employer| employer.id == job.employer_id);
        if !owns_job {
            return Err(Error::Forbidden(
                "You can only review applications for your own jobs".to_string(),
            ));
        }

        let updated = self
            .store
            .set_application_status(application_id, status)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        tracing::info!(application_id, status = %updated.status, "Application reviewed");
        Ok(updated)
    }

    pub async fn list_for_candidate(&self, principal: &Principal) -> Result<Vec<ApplicationDetail>> {
        principal.require(Capability::ApplyToJobs)?;
        let candidate = self
            .store
            .find_candidate_by_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate profile not found".to_string()))?;
        self.store.list_applications_for_candidate(candidate.id).await
    }

    /// Applications for a job; the caller must own the job.
    pub async fn list_for_job(
        &self,
        principal: &Principal,
        job_id: i64,
    ) -> Result<Vec<ApplicationDetail>> {
        principal.require(Capability::ReviewApplications)?;
        let job = self
            .store
            .find_job(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        let owns_job = self
            .store
            .find_employer_by_user(principal.user_id)
            .await?
            .is_some_and(|employer| employer.id == job.employer_id);
        if !owns_job {
            return Err(Error::Forbidden("You do not own this job".to_string()));
        }
        self.store.list_applications_for_job(job_id).await
    }
}
