//! Runs the store contract against a live PostgreSQL. Skipped unless
//! `DATABASE_URL` is set.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;

use jobportal_backend::database::pool::{create_pool, run_migrations};
use jobportal_backend::error::Error;
use jobportal_backend::models::application::NewApplication;
use jobportal_backend::models::candidate::CandidateFields;
use jobportal_backend::models::cv::CvFields;
use jobportal_backend::models::employer::EmployerFields;
use jobportal_backend::models::job::{JobFields, JobSearch, JobStatus};
use jobportal_backend::models::user::{User, UserRole};
use jobportal_backend::store::{
    NewAccount, NewProfile, PgStore, PortalStore, CV_IN_USE, DUPLICATE_APPLICATION,
    DUPLICATE_USERNAME,
};

async fn store() -> Option<PgStore> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping PostgreSQL store test");
        return None;
    };
    let pool = create_pool(&database_url).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    Some(PgStore::new(pool))
}

/// Suffix that keeps rows from separate runs apart in a shared database.
fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    format!("{}{}", prefix, nanos)
}

async fn employer(store: &PgStore, username: &str) -> (User, i64) {
    let user = store
        .create_account(NewAccount {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Employer,
            profile: NewProfile::Employer(EmployerFields {
                company_name: format!("{} Ltd", username),
                ..Default::default()
            }),
        })
        .await
        .expect("employer account");
    let profile = store
        .find_employer_by_user(user.id)
        .await
        .expect("lookup")
        .expect("employer profile");
    (user, profile.id)
}

async fn candidate(store: &PgStore, username: &str) -> (User, i64) {
    let user = store
        .create_account(NewAccount {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Candidate,
            profile: NewProfile::Candidate(CandidateFields {
                full_name: "Ann".to_string(),
                email: Some("ann@example.com".to_string()),
                ..Default::default()
            }),
        })
        .await
        .expect("candidate account");
    let profile = store
        .find_candidate_by_user(user.id)
        .await
        .expect("lookup")
        .expect("candidate profile");
    (user, profile.id)
}

fn job_fields(title: &str) -> JobFields {
    JobFields {
        title: title.to_string(),
        description: "desc".to_string(),
        requirements: None,
        location: Some("Tashkent".to_string()),
        salary: None,
    }
}

fn cv_fields() -> CvFields {
    CvFields {
        title: "Backend CV".to_string(),
        position: None,
        full_name: None,
        email: None,
        phone: None,
        objective: None,
        skills: None,
        experience: String::new(),
        education: String::new(),
    }
}

#[tokio::test]
async fn duplicate_username_and_application_are_conflicts() {
    let Some(store) = store().await else { return };
    let employer_name = unique("pg_e");
    let (_, employer_id) = employer(&store, &employer_name).await;
    let (_, candidate_id) = candidate(&store, &unique("pg_a")).await;

    let err = store
        .create_account(NewAccount {
            username: employer_name.clone(),
            password_hash: "hash".to_string(),
            role: UserRole::Employer,
            profile: NewProfile::None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(ref msg) if msg == DUPLICATE_USERNAME));

    let job = store
        .insert_job(employer_id, job_fields("Backend Dev"), JobStatus::Active)
        .await
        .unwrap();
    let cv = store.insert_cv(candidate_id, cv_fields()).await.unwrap();
    let new_application = NewApplication {
        job_id: job.id,
        candidate_id,
        cv_id: cv.id,
    };
    store.insert_application(new_application.clone()).await.unwrap();

    let err = store.insert_application(new_application).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(ref msg) if msg == DUPLICATE_APPLICATION));

    let err = store.delete_cv(cv.id).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(ref msg) if msg == CV_IN_USE));

    let for_job = store.list_applications_for_job(job.id).await.unwrap();
    assert_eq!(for_job.len(), 1);
    assert_eq!(for_job[0].candidate_name, "Ann");
    assert_eq!(for_job[0].cv_title, "Backend CV");
    assert_eq!(for_job[0].company_name, format!("{} Ltd", employer_name));
}

#[tokio::test]
async fn deletes_cascade_to_dependent_rows() {
    let Some(store) = store().await else { return };
    let (employer_user, employer_id) = employer(&store, &unique("pg_e")).await;
    let (_, candidate_id) = candidate(&store, &unique("pg_a")).await;
    let cv = store.insert_cv(candidate_id, cv_fields()).await.unwrap();

    let first = store
        .insert_job(employer_id, job_fields("First"), JobStatus::Active)
        .await
        .unwrap();
    let second = store
        .insert_job(employer_id, job_fields("Second"), JobStatus::Active)
        .await
        .unwrap();
    let mut applications = Vec::new();
    for job_id in [first.id, second.id] {
        let stored = store
            .insert_application(NewApplication {
                job_id,
                candidate_id,
                cv_id: cv.id,
            })
            .await
            .unwrap();
        applications.push(stored.id);
    }

    assert!(store.delete_job(first.id).await.unwrap());
    assert!(store.find_job(first.id).await.unwrap().is_none());
    assert!(store.find_application(applications[0]).await.unwrap().is_none());
    assert!(store.find_application(applications[1]).await.unwrap().is_some());
    assert!(!store.delete_job(first.id).await.unwrap());

    assert!(store.delete_user(employer_user.id).await.unwrap());
    assert!(store.find_user(employer_user.id).await.unwrap().is_none());
    assert!(store.find_employer_by_user(employer_user.id).await.unwrap().is_none());
    assert!(store.find_job(second.id).await.unwrap().is_none());
    assert!(store.find_application(applications[1]).await.unwrap().is_none());
    assert!(store.find_cv(cv.id).await.unwrap().is_some());
}

#[tokio::test]
async fn search_filters_and_pages_active_jobs() {
    let Some(store) = store().await else { return };
    let (_, employer_id) = employer(&store, &unique("pg_e")).await;
    let token = unique("kw");

    for title in ["Rust Dev", "rust lead", "Rust intern"] {
        store
            .insert_job(
                employer_id,
                job_fields(&format!("{} {}", title, token)),
                JobStatus::Active,
            )
            .await
            .unwrap();
    }
    let mut remote = job_fields(&format!("Remote {}", token));
    remote.location = Some("100% remote".to_string());
    remote.salary = Some(Decimal::from_str("999999999999.99").unwrap());
    let remote = store
        .insert_job(employer_id, remote, JobStatus::Active)
        .await
        .unwrap();
    assert_eq!(remote.salary, Some(Decimal::from_str("999999999999.99").unwrap()));
    store
        .insert_job(
            employer_id,
            job_fields(&format!("Hidden {}", token)),
            JobStatus::Inactive,
        )
        .await
        .unwrap();

    let search = |limit, offset| JobSearch {
        keyword: Some(token.to_uppercase()),
        status: Some(JobStatus::Active),
        limit,
        offset,
        ..Default::default()
    };

    let (items, total) = store.search_jobs(search(3, 0)).await.unwrap();
    assert_eq!(total, 4);
    assert_eq!(items.len(), 3);
    assert!(items[0].job.title.starts_with("Remote"));
    assert!(items.iter().all(|l| l.job.status == JobStatus::Active));

    let (items, total) = store.search_jobs(search(3, 3)).await.unwrap();
    assert_eq!(total, 4);
    assert_eq!(items.len(), 1);
    assert!(items[0].job.title.starts_with("Rust Dev"));

    let (items, total) = store.search_jobs(search(3, i64::MAX)).await.unwrap();
    assert_eq!(total, 4);
    assert!(items.is_empty());

    let (items, total) = store
        .search_jobs(JobSearch {
            location: Some("0% rem".to_string()),
            ..search(10, 0)
        })
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].job.id, remote.id);

    let (_, total) = store
        .search_jobs(JobSearch {
            location: Some("_ashkent".to_string()),
            ..search(10, 0)
        })
        .await
        .unwrap();
    assert_eq!(total, 0);
}
