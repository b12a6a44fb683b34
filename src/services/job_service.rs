use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::employer::Employer;
use crate::models::job::{Job, JobFields, JobListing, JobSearch, JobStatus};
use crate::models::user::{Capability, Principal};
use crate::store::PortalStore;

/// Where a job was created from; each entry point has its own initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOrigin {
    Dashboard,
    Api,
}

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn PortalStore>,
    config: Arc<Config>,
}

pub struct JobPage {
    pub items: Vec<JobListing>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(store: Arc<dyn PortalStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    async fn employer_for(&self, principal: &Principal) -> Result<Employer> {
        principal.require(Capability::PostJobs)?;
        self.store
            .find_employer_by_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Employer profile not found".to_string()))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        fields: JobFields,
        origin: JobOrigin,
    ) -> Result<Job> {
        let employer = self.employer_for(principal).await?;
        let status = match origin {
            JobOrigin::Dashboard => self.config.form_job_status,
            JobOrigin::Api => self.config.api_job_status,
        };
        let job = self.store.insert_job(employer.id, fields, status).await?;
        tracing::info!(
            job_id = job.id,
            employer_id = employer.id,
            status = %job.status,
            ?origin,
            "Job created"
        );
        Ok(job)
    }

    /// Loads a job and checks that the caller's employer record owns it.
    pub async fn get_owned(&self, principal: &Principal, id: i64) -> Result<Job> {
        let employer = self.employer_for(principal).await?;
        let job = self
            .store
            .find_job(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        if job.employer_id != employer.id {
            tracing::warn!(job_id = id, employer_id = employer.id, "Job owned by another employer");
            return Err(Error::Forbidden("You do not own this job".to_string()));
        }
        Ok(job)
    }

    pub async fn list_owned(&self, principal: &Principal) -> Result<Vec<Job>> {
        let employer = self.employer_for(principal).await?;
        self.store.list_jobs_for_employer(employer.id).await
    }

    pub async fn update(&self, principal: &Principal, id: i64, fields: JobFields) -> Result<Job> {
        self.get_owned(principal, id).await?;
        let job = self
            .store
            .update_job(id, fields)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        tracing::info!(job_id = id, "Job updated");
        Ok(job)
    }

    pub async fn toggle(&self, principal: &Principal, id: i64) -> Result<Job> {
        let current = self.get_owned(principal, id).await?;
        let next = current.status.toggled();
        let job = self
            .store
            .set_job_status(id, next)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        tracing::info!(job_id = id, from = %current.status, to = %job.status, "Job status toggled");
        Ok(job)
    }

    pub async fn delete(&self, principal: &Principal, id: i64) -> Result<()> {
        self.get_owned(principal, id).await?;
        self.remove(id).await
    }

    async fn remove(&self, id: i64) -> Result<()> {
        if !self.store.delete_job(id).await? {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        tracing::info!(job_id = id, "Job deleted");
        Ok(())
    }

    /// One page of active jobs. Pages are 1-based; out-of-range pages are
    /// clamped to 1. Pages past the end come back empty.
    pub async fn search_public(
        &self,
        keyword: Option<String>,
        location: Option<String>,
        page: Option<i64>,
    ) -> Result<JobPage> {
        let per_page = self.config.job_page_size.max(1);
        let page = page.unwrap_or(1).max(1);
        let search = JobSearch {
            keyword: keyword.filter(|k| !k.trim().is_empty()),
            location: location.filter(|l| !l.trim().is_empty()),
            status: Some(JobStatus::Active),
            limit: per_page,
            offset: page.saturating_sub(1).saturating_mul(per_page),
        };
        let (items, total) = self.store.search_jobs(search).await?;
        let total_pages = if total == 0 {
            0
        } else {
            total.saturating_add(per_page - 1) / per_page
        };
        Ok(JobPage {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn get_public(&self, id: i64) -> Result<JobListing> {
        match self.store.find_job_listing(id).await? {
            Some(listing) if listing.job.status == JobStatus::Active => Ok(listing),
            _ => Err(Error::NotFound("Job not found".to_string())),
        }
    }

    pub async fn admin_list(&self, principal: &Principal) -> Result<Vec<JobListing>> {
        principal.require(Capability::Administer)?;
        let (items, _) = self
            .store
            .search_jobs(JobSearch {
                limit: i64::MAX,
                ..Default::default()
            })
            .await?;
        Ok(items)
    }

    pub async fn admin_delete(&self, principal: &Principal, id: i64) -> Result<()> {
        principal.require(Capability::Administer)?;
        self.remove(id).await
    }
}
