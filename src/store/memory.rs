use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{
    NewAccount, NewProfile, PortalStore, CV_IN_USE, DUPLICATE_APPLICATION, DUPLICATE_USERNAME,
};
use crate::error::{Error, Result};
use crate::models::{
    application::{Application, ApplicationDetail, ApplicationStatus, NewApplication},
    candidate::{Candidate, CandidateFields},
    cv::{Cv, CvFields},
    employer::{Employer, EmployerFields},
    job::{Job, JobFields, JobListing, JobSearch, JobStatus},
    user::User,
};
use crate::utils::time::now;

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    candidates: BTreeMap<i64, Candidate>,
    employers: BTreeMap<i64, Employer>,
    cvs: BTreeMap<i64, Cv>,
    jobs: BTreeMap<i64, Job>,
    applications: BTreeMap<i64, Application>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn listing(&self, job: &Job) -> JobListing {
        let company_name = self
            .employers
            .get(&job.employer_id)
            .map(|e| e.company_name.clone())
            .unwrap_or_default();
        JobListing {
            job: job.clone(),
            company_name,
        }
    }

    fn detail(&self, application: &Application) -> ApplicationDetail {
        let job = self.jobs.get(&application.job_id);
        let candidate = self.candidates.get(&application.candidate_id);
        ApplicationDetail {
            application: application.clone(),
            job_title: job.map(|j| j.title.clone()).unwrap_or_default(),
            company_name: job
                .and_then(|j| self.employers.get(&j.employer_id))
                .map(|e| e.company_name.clone())
                .unwrap_or_default(),
            candidate_name: candidate.map(|c| c.full_name.clone()).unwrap_or_default(),
            candidate_email: candidate.and_then(|c| c.email.clone()),
            candidate_phone: candidate.and_then(|c| c.phone.clone()),
            cv_title: self
                .cvs
                .get(&application.cv_id)
                .map(|cv| cv.title.clone())
                .unwrap_or_default(),
        }
    }

    fn details_where(&self, keep: impl Fn(&Application) -> bool) -> Vec<ApplicationDetail> {
        let mut items: Vec<&Application> = self.applications.values().filter(|a| keep(a)).collect();
        items.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then(b.id.cmp(&a.id)));
        items.into_iter().map(|a| self.detail(a)).collect()
    }

    fn remove_job_cascade(&mut self, job_id: i64) -> bool {
        self.applications.retain(|_, a| a.job_id != job_id);
        self.jobs.remove(&job_id).is_some()
    }

    fn remove_candidate_cascade(&mut self, candidate_id: i64) {
        self.applications.retain(|_, a| a.candidate_id != candidate_id);
        self.cvs.retain(|_, cv| cv.candidate_id != candidate_id);
        self.candidates.remove(&candidate_id);
    }

    fn remove_employer_cascade(&mut self, employer_id: i64) {
        let owned: Vec<i64> = self
            .jobs
            .values()
            .filter(|j| j.employer_id == employer_id)
            .map(|j| j.id)
            .collect();
        for job_id in owned {
            self.remove_job_cascade(job_id);
        }
        self.employers.remove(&employer_id);
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.trim().to_lowercase()))
        .unwrap_or(false)
}

/// Process-local store guarded by a single mutex, so every operation is
/// atomic with respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_account(&self, account: NewAccount) -> Result<User> {
        let mut tables = self.lock()?;
        if tables.users.values().any(|u| u.username == account.username) {
            return Err(Error::Conflict(DUPLICATE_USERNAME.to_string()));
        }

        let user = User {
            id: tables.next_id(),
            username: account.username,
            password: account.password_hash,
            role: account.role,
            is_active: true,
            created_at: now(),
        };

        match account.profile {
            NewProfile::Candidate(fields) => {
                let id = tables.next_id();
                tables.candidates.insert(
                    id,
                    Candidate {
                        id,
                        user_id: user.id,
                        full_name: fields.full_name,
                        phone: fields.phone,
                        email: fields.email,
                        address: fields.address,
                    },
                );
            }
            NewProfile::Employer(fields) => {
                let id = tables.next_id();
                tables.employers.insert(
                    id,
                    Employer {
                        id,
                        user_id: user.id,
                        company_name: fields.company_name,
                        company_address: fields.company_address,
                        contact_person: fields.contact_person,
                    },
                );
            }
            NewProfile::None => {}
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.lock()?;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn set_user_active(&self, id: i64, active: bool) -> Result<Option<User>> {
        let mut tables = self.lock()?;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.is_active = active;
            user.clone()
        }))
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&id) {
            return Ok(false);
        }
        let candidate = tables.candidates.values().find(|c| c.user_id == id).map(|c| c.id);
        if let Some(candidate_id) = candidate {
            // Another candidate's application may point at one of these CVs.
            let foreign_reference = tables.applications.values().any(|a| {
                a.candidate_id != candidate_id
                    && tables
                        .cvs
                        .get(&a.cv_id)
                        .is_some_and(|cv| cv.candidate_id == candidate_id)
            });
            if foreign_reference {
                return Err(Error::Conflict(
                    "Record is still referenced by other records".to_string(),
                ));
            }
        }
        tables.users.remove(&id);
        if let Some(candidate_id) = candidate {
            tables.remove_candidate_cascade(candidate_id);
        }
        let employer = tables.employers.values().find(|e| e.user_id == id).map(|e| e.id);
        if let Some(employer_id) = employer {
            tables.remove_employer_cascade(employer_id);
        }
        Ok(true)
    }

    async fn find_candidate_by_user(&self, user_id: i64) -> Result<Option<Candidate>> {
        Ok(self
            .lock()?
            .candidates
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn find_employer_by_user(&self, user_id: i64) -> Result<Option<Employer>> {
        Ok(self
            .lock()?
            .employers
            .values()
            .find(|e| e.user_id == user_id)
            .cloned())
    }

    async fn upsert_candidate(&self, user_id: i64, fields: CandidateFields) -> Result<Candidate> {
        let mut tables = self.lock()?;
        let existing = tables.candidates.values().find(|c| c.user_id == user_id).map(|c| c.id);
        let id = match existing {
            Some(id) => id,
            None => tables.next_id(),
        };
        let candidate = Candidate {
            id,
            user_id,
            full_name: fields.full_name,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
        };
        tables.candidates.insert(id, candidate.clone());
        Ok(candidate)
    }

    async fn upsert_employer(&self, user_id: i64, fields: EmployerFields) -> Result<Employer> {
        let mut tables = self.lock()?;
        let existing = tables.employers.values().find(|e| e.user_id == user_id).map(|e| e.id);
        let id = match existing {
            Some(id) => id,
            None => tables.next_id(),
        };
        let employer = Employer {
            id,
            user_id,
            company_name: fields.company_name,
            company_address: fields.company_address,
            contact_person: fields.contact_person,
        };
        tables.employers.insert(id, employer.clone());
        Ok(employer)
    }

    async fn list_cvs(&self, candidate_id: i64) -> Result<Vec<Cv>> {
        let tables = self.lock()?;
        let mut cvs: Vec<Cv> = tables
            .cvs
            .values()
            .filter(|cv| cv.candidate_id == candidate_id)
            .cloned()
            .collect();
        cvs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(cvs)
    }

    async fn find_cv(&self, id: i64) -> Result<Option<Cv>> {
        Ok(self.lock()?.cvs.get(&id).cloned())
    }

    async fn insert_cv(&self, candidate_id: i64, fields: CvFields) -> Result<Cv> {
        let mut tables = self.lock()?;
        if !tables.candidates.contains_key(&candidate_id) {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }
        let id = tables.next_id();
        let stamp = now();
        let cv = Cv {
            id,
            candidate_id,
            title: fields.title,
            position: fields.position,
            full_name: fields.full_name,
            email: fields.email,
            phone: fields.phone,
            objective: fields.objective,
            skills: fields.skills,
            experience: fields.experience,
            education: fields.education,
            created_at: stamp,
            updated_at: stamp,
        };
        tables.cvs.insert(id, cv.clone());
        Ok(cv)
    }

    async fn update_cv(&self, id: i64, fields: CvFields) -> Result<Option<Cv>> {
        let mut tables = self.lock()?;
        Ok(tables.cvs.get_mut(&id).map(|cv| {
            cv.title = fields.title;
            cv.position = fields.position;
            cv.full_name = fields.full_name;
            cv.email = fields.email;
            cv.phone = fields.phone;
            cv.objective = fields.objective;
            cv.skills = fields.skills;
            cv.experience = fields.experience;
            cv.education = fields.education;
            cv.updated_at = now();
            cv.clone()
        }))
    }

    async fn delete_cv(&self, id: i64) -> Result<bool> {
        let mut tables = self.lock()?;
        if tables.applications.values().any(|a| a.cv_id == id) {
            return Err(Error::Conflict(CV_IN_USE.to_string()));
        }
        Ok(tables.cvs.remove(&id).is_some())
    }

    async fn insert_job(
        &self,
        employer_id: i64,
        fields: JobFields,
        status: JobStatus,
    ) -> Result<Job> {
        let mut tables = self.lock()?;
        if !tables.employers.contains_key(&employer_id) {
            return Err(Error::NotFound("Employer not found".to_string()));
        }
        let id = tables.next_id();
        let stamp = now();
        let job = Job {
            id,
            employer_id,
            title: fields.title,
            description: fields.description,
            requirements: fields.requirements,
            location: fields.location,
            salary: fields.salary,
            status,
            posted_at: stamp,
            updated_at: stamp,
        };
        tables.jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        Ok(self.lock()?.jobs.get(&id).cloned())
    }

    async fn find_job_listing(&self, id: i64) -> Result<Option<JobListing>> {
        let tables = self.lock()?;
        Ok(tables.jobs.get(&id).map(|job| tables.listing(job)))
    }

    async fn update_job(&self, id: i64, fields: JobFields) -> Result<Option<Job>> {
        let mut tables = self.lock()?;
        Ok(tables.jobs.get_mut(&id).map(|job| {
            job.title = fields.title;
            job.description = fields.description;
            job.requirements = fields.requirements;
            job.location = fields.location;
            job.salary = fields.salary;
            job.updated_at = now();
            job.clone()
        }))
    }

    async fn set_job_status(&self, id: i64, status: JobStatus) -> Result<Option<Job>> {
        let mut tables = self.lock()?;
        Ok(tables.jobs.get_mut(&id).map(|job| {
            job.status = status;
            job.updated_at = now();
            job.clone()
        }))
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        Ok(self.lock()?.remove_job_cascade(id))
    }

    async fn search_jobs(&self, search: JobSearch) -> Result<(Vec<JobListing>, i64)> {
        let tables = self.lock()?;
        let keyword = search.keyword.as_deref().filter(|k| !k.trim().is_empty());
        let location = search.location.as_deref().filter(|l| !l.trim().is_empty());

        let mut matches: Vec<&Job> = tables
            .jobs
            .values()
            .filter(|job| search.status.map_or(true, |status| job.status == status))
            .filter(|job| keyword.map_or(true, |k| contains_ci(Some(job.title.as_str()), k)))
            .filter(|job| location.map_or(true, |l| contains_ci(job.location.as_deref(), l)))
            .collect();
        matches.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then(b.id.cmp(&a.id)));

        let total = matches.len() as i64;
        let items = matches
            .into_iter()
            .skip(search.offset.max(0) as usize)
            .take(search.limit.max(0) as usize)
            .map(|job| tables.listing(job))
            .collect();
        Ok((items, total))
    }

    async fn list_jobs_for_employer(&self, employer_id: i64) -> Result<Vec<Job>> {
        let tables = self.lock()?;
        let mut jobs: Vec<Job> = tables
            .jobs
            .values()
            .filter(|j| j.employer_id == employer_id)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then(b.id.cmp(&a.id)));
        Ok(jobs)
    }

    async fn find_application(&self, id: i64) -> Result<Option<Application>> {
        Ok(self.lock()?.applications.get(&id).cloned())
    }

    async fn find_application_for(
        &self,
        job_id: i64,
        candidate_id: i64,
    ) -> Result<Option<Application>> {
        Ok(self
            .lock()?
            .applications
            .values()
            .find(|a| a.job_id == job_id && a.candidate_id == candidate_id)
            .cloned())
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application> {
        let mut tables = self.lock()?;
        if tables
            .applications
            .values()
            .any(|a| a.job_id == application.job_id && a.candidate_id == application.candidate_id)
        {
            return Err(Error::Conflict(DUPLICATE_APPLICATION.to_string()));
        }
        if !tables.jobs.contains_key(&application.job_id)
            || !tables.candidates.contains_key(&application.candidate_id)
            || !tables.cvs.contains_key(&application.cv_id)
        {
            return Err(Error::Conflict(
                "Record is still referenced by other records".to_string(),
            ));
        }

        let stored = Application {
            id: tables.next_id(),
            job_id: application.job_id,
            candidate_id: application.candidate_id,
            cv_id: application.cv_id,
            applied_at: now(),
            status: ApplicationStatus::Pending,
        };
        tables.applications.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn set_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let mut tables = self.lock()?;
        Ok(tables.applications.get_mut(&id).map(|application| {
            application.status = status;
            application.clone()
        }))
    }

    async fn list_applications_for_candidate(
        &self,
        candidate_id: i64,
    ) -> Result<Vec<ApplicationDetail>> {
        Ok(self
            .lock()?
            .details_where(|a| a.candidate_id == candidate_id))
    }

    async fn list_applications_for_job(&self, job_id: i64) -> Result<Vec<ApplicationDetail>> {
        Ok(self.lock()?.details_where(|a| a.job_id == job_id))
    }
}
