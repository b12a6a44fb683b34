use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::auth_dto::UserResponse;
use crate::models::candidate::Candidate;
use crate::models::employer::Employer;

/// Profile edit body. Candidates send the candidate fields, employers the
/// company fields; fields for the other role are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfilePayload {
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 255))]
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    #[validate(length(max = 255))]
    pub contact_person: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileDetails {
    Candidate(Candidate),
    Employer(Employer),
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub profile: ProfileDetails,
}
