use async_trait::async_trait;
use sqlx::PgPool;

use super::{
    NewAccount, NewProfile, PortalStore, CV_IN_USE, DUPLICATE_APPLICATION, DUPLICATE_USERNAME,
};
use crate::error::{Error, Result, PG_FOREIGN_KEY_VIOLATION, PG_UNIQUE_VIOLATION};
use crate::models::{
    application::{Application, ApplicationDetail, ApplicationStatus, NewApplication},
    candidate::{Candidate, CandidateFields},
    cv::{Cv, CvFields},
    employer::{Employer, EmployerFields},
    job::{Job, JobFields, JobListing, JobSearch, JobStatus},
    user::User,
};

const USER_COLUMNS: &str = "id, username, password, role, is_active, created_at";
const CANDIDATE_COLUMNS: &str = "id, user_id, full_name, phone, email, address";
const EMPLOYER_COLUMNS: &str = "id, user_id, company_name, company_address, contact_person";
const CV_COLUMNS: &str = "id, candidate_id, title, position, full_name, email, phone, objective, skills, experience, education, created_at, updated_at";
const JOB_COLUMNS: &str = "id, employer_id, title, description, requirements, location, salary, status, posted_at, updated_at";
const JOB_LISTING_COLUMNS: &str = "j.id, j.employer_id, j.title, j.description, j.requirements, j.location, j.salary, j.status, j.posted_at, j.updated_at, e.company_name";
const APPLICATION_COLUMNS: &str = "id, job_id, candidate_id, cv_id, applied_at, status";
const APPLICATION_DETAIL_SELECT: &str = r#"
    SELECT a.id, a.job_id, a.candidate_id, a.cv_id, a.applied_at, a.status,
           j.title AS job_title, e.company_name,
           c.full_name AS candidate_name, c.email AS candidate_email, c.phone AS candidate_phone,
           v.title AS cv_title
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    JOIN employers e ON e.id = j.employer_id
    JOIN candidates c ON c.id = a.candidate_id
    JOIN cvs v ON v.id = a.cv_id
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a given SQLSTATE to a conflict with a user-facing message.
fn on_violation(code: &'static str, message: &'static str) -> impl Fn(sqlx::Error) -> Error {
    move |err| {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(code) {
                return Error::Conflict(message.to_string());
            }
        }
        Error::from(err)
    }
}

fn like_pattern(raw: &str) -> String {
    let escaped = raw
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl PortalStore for PgStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_account(&self, account: NewAccount) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password, role) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(on_violation(PG_UNIQUE_VIOLATION, DUPLICATE_USERNAME))?;

        match account.profile {
            NewProfile::Candidate(fields) => {
                sqlx::query(
                    "INSERT INTO candidates (user_id, full_name, phone, email, address) VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(user.id)
                .bind(&fields.full_name)
                .bind(&fields.phone)
                .bind(&fields.email)
                .bind(&fields.address)
                .execute(&mut *tx)
                .await?;
            }
            NewProfile::Employer(fields) => {
                sqlx::query(
                    "INSERT INTO employers (user_id, company_name, company_address, contact_person) VALUES ($1, $2, $3, $4)",
                )
                .bind(user.id)
                .bind(&fields.company_name)
                .bind(&fields.company_address)
                .bind(&fields.contact_person)
                .execute(&mut *tx)
                .await?;
            }
            NewProfile::None => {}
        }

        tx.commit().await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn set_user_active(&self, id: i64, active: bool) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_active = $2 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_candidate_by_user(&self, user_id: i64) -> Result<Option<Candidate>> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {} FROM candidates WHERE user_id = $1",
            CANDIDATE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn find_employer_by_user(&self, user_id: i64) -> Result<Option<Employer>> {
        let employer = sqlx::query_as::<_, Employer>(&format!(
            "SELECT {} FROM employers WHERE user_id = $1",
            EMPLOYER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employer)
    }

    async fn upsert_candidate(&self, user_id: i64, fields: CandidateFields) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            r#"
            INSERT INTO candidates (user_id, full_name, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                address = EXCLUDED.address
            RETURNING {}
            "#,
            CANDIDATE_COLUMNS
        ))
        .bind(user_id)
        .bind(&fields.full_name)
        .bind(&fields.phone)
        .bind(&fields.email)
        .bind(&fields.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn upsert_employer(&self, user_id: i64, fields: EmployerFields) -> Result<Employer> {
        let employer = sqlx::query_as::<_, Employer>(&format!(
            r#"
            INSERT INTO employers (user_id, company_name, company_address, contact_person)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                company_address = EXCLUDED.company_address,
                contact_person = EXCLUDED.contact_person
            RETURNING {}
            "#,
            EMPLOYER_COLUMNS
        ))
        .bind(user_id)
        .bind(&fields.company_name)
        .bind(&fields.company_address)
        .bind(&fields.contact_person)
        .fetch_one(&self.pool)
        .await?;
        Ok(employer)
    }

    async fn list_cvs(&self, candidate_id: i64) -> Result<Vec<Cv>> {
        let cvs = sqlx::query_as::<_, Cv>(&format!(
            "SELECT {} FROM cvs WHERE candidate_id = $1 ORDER BY updated_at DESC, id DESC",
            CV_COLUMNS
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cvs)
    }

    async fn find_cv(&self, id: i64) -> Result<Option<Cv>> {
        let cv = sqlx::query_as::<_, Cv>(&format!("SELECT {} FROM cvs WHERE id = $1", CV_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cv)
    }

    async fn insert_cv(&self, candidate_id: i64, fields: CvFields) -> Result<Cv> {
        let cv = sqlx::query_as::<_, Cv>(&format!(
            r#"
            INSERT INTO cvs (
                candidate_id, title, position, full_name, email, phone,
                objective, skills, experience, education
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            CV_COLUMNS
        ))
        .bind(candidate_id)
        .bind(&fields.title)
        .bind(&fields.position)
        .bind(&fields.full_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.objective)
        .bind(&fields.skills)
        .bind(&fields.experience)
        .bind(&fields.education)
        .fetch_one(&self.pool)
        .await?;
        Ok(cv)
    }

    async fn update_cv(&self, id: i64, fields: CvFields) -> Result<Option<Cv>> {
        let cv = sqlx::query_as::<_, Cv>(&format!(
            r#"
            UPDATE cvs SET
                title = $2,
                position = $3,
                full_name = $4,
                email = $5,
                phone = $6,
                objective = $7,
                skills = $8,
                experience = $9,
                education = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CV_COLUMNS
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.position)
        .bind(&fields.full_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.objective)
        .bind(&fields.skills)
        .bind(&fields.experience)
        .bind(&fields.education)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cv)
    }

    async fn delete_cv(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM cvs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(on_violation(PG_FOREIGN_KEY_VIOLATION, CV_IN_USE))?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_job(
        &self,
        employer_id: i64,
        fields: JobFields,
        status: JobStatus,
    ) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (employer_id, title, description, requirements, location, salary, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(employer_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.requirements)
        .bind(&fields.location)
        .bind(fields.salary)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    async fn find_job(&self, id: i64) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn find_job_listing(&self, id: i64) -> Result<Option<JobListing>> {
        let listing = sqlx::query_as::<_, JobListing>(&format!(
            "SELECT {} FROM jobs j JOIN employers e ON e.id = j.employer_id WHERE j.id = $1",
            JOB_LISTING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(listing)
    }

    async fn update_job(&self, id: i64, fields: JobFields) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs SET
                title = $2,
                description = $3,
                requirements = $4,
                location = $5,
                salary = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.requirements)
        .bind(&fields.location)
        .bind(fields.salary)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn set_job_status(&self, id: i64, status: JobStatus) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let removed = sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(
            job_id = id,
            applications = removed.rows_affected(),
            "Job removed with its applications"
        );
        Ok(res.rows_affected() > 0)
    }

    async fn search_jobs(&self, search: JobSearch) -> Result<(Vec<JobListing>, i64)> {
        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = search.status {
            filters.push(format!("j.status = ${}", args.len() + 1));
            args.push(status.as_str().to_string());
        }
        if let Some(keyword) = search.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
            filters.push(format!("j.title ILIKE ${}", args.len() + 1));
            args.push(like_pattern(keyword));
        }
        if let Some(location) = search.location.as_deref().filter(|l| !l.trim().is_empty()) {
            filters.push(format!("j.location ILIKE ${}", args.len() + 1));
            args.push(like_pattern(location));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT {}
             FROM jobs j
             JOIN employers e ON e.id = j.employer_id
             {}
             ORDER BY j.posted_at DESC, j.id DESC
             LIMIT ${} OFFSET ${}",
            JOB_LISTING_COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!(
            "SELECT COUNT(*) FROM jobs j JOIN employers e ON e.id = j.employer_id {}",
            where_clause
        );

        let mut items_statement = sqlx::query_as::<_, JobListing>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(search.limit).bind(search.offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        Ok((items, total))
    }

    async fn list_jobs_for_employer(&self, employer_id: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE employer_id = $1 ORDER BY posted_at DESC, id DESC",
            JOB_COLUMNS
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn find_application(&self, id: i64) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn find_application_for(
        &self,
        job_id: i64,
        candidate_id: i64,
    ) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE job_id = $1 AND candidate_id = $2",
            APPLICATION_COLUMNS
        ))
        .bind(job_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application> {
        let stored = sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (job_id, candidate_id, cv_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(application.job_id)
        .bind(application.candidate_id)
        .bind(application.cv_id)
        .bind(ApplicationStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(on_violation(PG_UNIQUE_VIOLATION, DUPLICATE_APPLICATION))?;
        Ok(stored)
    }

    async fn set_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn list_applications_for_candidate(
        &self,
        candidate_id: i64,
    ) -> Result<Vec<ApplicationDetail>> {
        let items = sqlx::query_as::<_, ApplicationDetail>(&format!(
            "{} WHERE a.candidate_id = $1 ORDER BY a.applied_at DESC, a.id DESC",
            APPLICATION_DETAIL_SELECT
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_applications_for_job(&self, job_id: i64) -> Result<Vec<ApplicationDetail>> {
        let items = sqlx::query_as::<_, ApplicationDetail>(&format!(
            "{} WHERE a.job_id = $1 ORDER BY a.applied_at DESC, a.id DESC",
            APPLICATION_DETAIL_SELECT
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
