use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::{Candidate, CandidateFields};
use crate::models::employer::{Employer, EmployerFields};
use crate::models::user::{User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterCandidatePayload {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub full_name: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub address: Option<String>,
}

impl RegisterCandidatePayload {
    pub fn profile(&self) -> CandidateFields {
        CandidateFields {
            full_name: self.full_name.trim().to_string(),
            phone: crate::utils::validation::clean_optional(self.phone.clone()),
            email: crate::utils::validation::clean_optional(self.email.clone()),
            address: crate::utils::validation::clean_optional(self.address.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterEmployerPayload {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub company_name: String,
    pub company_address: Option<String>,
    #[validate(length(max = 255))]
    pub contact_person: Option<String>,
}

impl RegisterEmployerPayload {
    pub fn profile(&self) -> EmployerFields {
        EmployerFields {
            company_name: self.company_name.trim().to_string(),
            company_address: crate::utils::validation::clean_optional(
                self.company_address.clone(),
            ),
            contact_person: crate::utils::validation::clean_optional(self.contact_person.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            role: value.role,
            is_active: value.is_active,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredCandidateResponse {
    pub user: UserResponse,
    pub candidate: Candidate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredEmployerResponse {
    pub user: UserResponse,
    pub employer: Employer,
}
