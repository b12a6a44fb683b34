use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// CV row as stored. `experience` and `education` hold entry lists encoded
/// by [`crate::utils::entry_codec`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cv {
    pub id: i64,
    pub candidate_id: i64,
    pub title: String,
    pub position: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub objective: Option<String>,
    pub skills: Option<String>,
    pub experience: String,
    pub education: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One experience or education line: where, what, when, details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvEntry {
    pub organization: String,
    pub title: String,
    pub period: String,
    pub description: String,
}

/// Attributes written on create and update, entry blocks already encoded.
#[derive(Debug, Clone)]
pub struct CvFields {
    pub title: String,
    pub position: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub objective: Option<String>,
    pub skills: Option<String>,
    pub experience: String,
    pub education: String,
}
