use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::ParseTagError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Candidate,
    Employer,
    Admin,
}

/// Operations guarded by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ApplyToJobs,
    ManageCvs,
    ManageCandidateProfile,
    PostJobs,
    ReviewApplications,
    ManageEmployerProfile,
    Administer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Candidate => "candidate",
            UserRole::Employer => "employer",
            UserRole::Admin => "admin",
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            UserRole::Candidate => matches!(
                capability,
                ApplyToJobs | ManageCvs | ManageCandidateProfile
            ),
            UserRole::Employer => matches!(
                capability,
                PostJobs | ReviewApplications | ManageEmployerProfile
            ),
            UserRole::Admin => matches!(capability, Administer),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidate" => Ok(UserRole::Candidate),
            "employer" => Ok(UserRole::Employer),
            "admin" => Ok(UserRole::Admin),
            _ => Err(ParseTagError::new("role", s)),
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = ParseTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The caller behind a session: the user id and the role read from the user
/// row for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

impl Principal {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }

    pub fn require(&self, capability: Capability) -> crate::error::Result<()> {
        if self.role.allows(capability) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = self.user_id,
                username = %self.username,
                role = %self.role,
                ?capability,
                "Capability denied"
            );
            Err(crate::error::Error::Forbidden(format!(
                "role '{}' is not permitted to perform this action",
                self.role
            )))
        }
    }
}
